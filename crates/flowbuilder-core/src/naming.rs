use crate::domain::flow::Flow;
use std::collections::HashSet;

/// First "Flow n" (n >= 1) not already used as a display name
pub fn find_default_flow_display_name(flows: &[Flow]) -> String {
    let taken: HashSet<&str> = flows.iter().map(|flow| flow.display_name()).collect();

    (1..)
        .map(|n| format!("Flow {}", n))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| "Flow".to_string())
}
