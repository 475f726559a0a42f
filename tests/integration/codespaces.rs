//! Integration tests for codespaces machine types

use super::*;
use github::{ListMachineTypesOptions, PrebuildAvailability};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::query_param;

fn machines_json() -> serde_json::Value {
    json!({
        "total_count": 2,
        "machines": [
            {
                "name": "standardLinux",
                "display_name": "4 cores, 8 GB RAM, 64 GB storage",
                "operating_system": "linux",
                "storage_in_bytes": 68719476736i64,
                "memory_in_bytes": 8589934592i64,
                "cpus": 4,
                "prebuild_availability": "ready"
            },
            {
                "name": "premiumLinux",
                "operating_system": "linux",
                "cpus": 8,
                "prebuild_availability": null
            }
        ]
    })
}

#[tokio::test]
async fn test_list_machine_types_for_repository() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/octocat/hello-world/codespaces/machines")
        .and(query_param("location", "WestUs2"))
        .and(query_param("ref", "main"))
        .respond_with(success_response(machines_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListMachineTypesOptions {
        location: Some("WestUs2".into()),
        reference: Some("main".into()),
        ..Default::default()
    };
    let (machines, _) = client
        .codespaces()
        .list_machine_types_for_repository("octocat", "hello-world", Some(&opts))
        .await
        .unwrap();

    assert_eq!(machines.total_count, Some(2));
    assert_eq!(machines.machines[0].cpus, Some(4));
    assert_eq!(
        machines.machines[0].prebuild_availability,
        Some(PrebuildAvailability::Ready)
    );
    assert_eq!(machines.machines[1].prebuild_availability, None);
    assert_eq!(
        github::stringify(&machines.machines[1]),
        r#"github.CodespacesMachine{Name:"premiumLinux", OperatingSystem:"linux", CPUs:8}"#
    );
}

#[tokio::test]
async fn test_list_machine_types_for_codespace() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/user/codespaces/monalisa-octocat-hello-world-g4wpq6h95q/machines")
        .respond_with(success_response(machines_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (machines, _) = client
        .codespaces()
        .list_machine_types_for_codespace("monalisa-octocat-hello-world-g4wpq6h95q")
        .await
        .unwrap();

    assert_eq!(machines.machines.len(), 2);
}
