//! End-to-end flow run: create, save a dynamic dropdown and execute

use flowbuilder_client::{ExecuteFlowRequest, FlowService};
use flowbuilder_core::{
    Artifact, CollectionVersionId, Config, ConfigSettings, ConfigType, DropdownType, FlowTemplate,
    InstanceRunStatus,
};
use flowbuilder_tests::BuilderSession;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_run_flow_e2e() {
    let session = BuilderSession::start().await;

    let created = session
        .service
        .create_flow_template(FlowTemplate::blank())
        .await
        .unwrap();
    created.trigger_panel.abort();
    let flow = created.flow;

    // === SAVE: a dynamic dropdown travels as its own artifact ===
    let mut version = flow.last_version.clone();
    version.configs.push(Config {
        key: "region".to_string(),
        label: "Region".to_string(),
        config_type: ConfigType::Dropdown,
        value: json!("eu"),
        settings: ConfigSettings {
            dropdown_type: Some(DropdownType::Dynamic),
            artifact_content: Some(Artifact::new(
                "exports.options = async () => [{label: 'EU', value: 'eu'}];",
                "{}",
            )),
            ..ConfigSettings::default()
        },
    });
    assert_eq!(FlowService::dynamic_dropdown_configs_artifacts(&version).len(), 1);

    session.service.update(flow.id, &version).await.unwrap();
    let uploads = session.backend.uploads();
    assert_eq!(uploads.len(), 3);
    assert_eq!(uploads[2].artifact_names(), vec!["region".to_string()]);
    assert_eq!(
        uploads[2].flow_json()["configs"][0]["settings"]["dropdownType"],
        json!("DYNAMIC")
    );

    // === EXECUTE: state comes from the state URL ===
    let collection_version_id = CollectionVersionId::new();
    let mut request = ExecuteFlowRequest {
        trigger: json!({"orderId": 42}),
        ..ExecuteFlowRequest::default()
    };
    request.configs.insert("region".to_string(), json!("eu"));

    let run = session
        .service
        .execute(collection_version_id, version.id, &request)
        .await
        .unwrap();

    assert_eq!(run.status, InstanceRunStatus::Succeeded);
    assert_eq!(run.flow_version_id, version.id);
    assert_eq!(run.collection_version_id, collection_version_id);
    assert_eq!(
        run.state().unwrap().0,
        json!({"trigger": {"orderId": 42}, "steps": {}})
    );

    let executions: Vec<Value> = session.backend.executions();
    assert_eq!(
        executions,
        vec![json!({"configs": {"region": "eu"}, "trigger": {"orderId": 42}})]
    );
}
