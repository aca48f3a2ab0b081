//! Commands that must behave without any request reaching the server.

use prompttree_testing::fixtures::{MALFORMED_IMPORT, WRONG_SHAPE_IMPORT};
use prompttree_testing::{StubServer, TestWorld};

#[test]
fn test_init_writes_config_with_given_api_url() {
    let world = TestWorld::new().with_api_url("localhost:7000").with_json();

    let result = world.run(&["init"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let config = std::fs::read_to_string(world.config_file()).unwrap();
    assert!(config.contains("base_url = \"localhost:7000\""), "{}", config);

    let json = result.json().unwrap();
    assert_eq!(json["content"]["created"], true);
    prompttree_testing::assertions::assert_badge_level(&json, "success").unwrap();
}

#[test]
fn test_init_keeps_existing_config_without_force() {
    let world = TestWorld::new().with_json();
    assert!(world.run(&["init"]).unwrap().success());

    let again = world.run(&["init"]).unwrap();

    let json = again.json().unwrap();
    assert_eq!(json["content"]["created"], false);
    prompttree_testing::assertions::assert_badge_level(&json, "info").unwrap();
}

#[test]
fn test_init_rejects_unparseable_url() {
    let world = TestWorld::new().with_api_url("http://[::1");

    let result = world.run(&["init"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("invalid API URL"), "{}", result.stderr);
}

#[test]
fn test_wrong_shape_import_is_rejected_before_any_request() {
    let server = StubServer::start().unwrap();
    let world = TestWorld::new().with_api_url(server.url());
    let file = world.write_file("tree.json", WRONG_SHAPE_IMPORT);

    let result = world.run(&["import", file.to_str().unwrap()]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr.contains("Invalid tree structure"),
        "stderr: {}",
        result.stderr
    );
    assert!(server.requests().is_empty());
}

#[test]
fn test_malformed_import_reports_json_error() {
    let server = StubServer::start().unwrap();
    let world = TestWorld::new().with_api_url(server.url());
    let file = world.write_file("broken.json", MALFORMED_IMPORT);

    let result = world.run(&["import", file.to_str().unwrap()]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("Invalid JSON"), "stderr: {}", result.stderr);
    assert!(server.requests().is_empty());
}

#[test]
fn test_blank_save_name_is_rejected() {
    let server = StubServer::start().unwrap();
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["save", "   "]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr.contains("save name must not be empty"),
        "stderr: {}",
        result.stderr
    );
    assert!(server.requests().is_empty());
}

#[test]
fn test_update_without_fields_is_rejected() {
    let server = StubServer::start().unwrap();
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["prompt", "update", "3"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("Nothing to update"), "{}", result.stderr);
    assert!(server.requests().is_empty());
}

#[test]
fn test_health_fails_when_api_is_unreachable() {
    let world = TestWorld::new().with_json();

    let result = world.run(&["health"]).unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assert_eq!(json["content"]["healthy"], false);
    assert!(json["content"]["error"].as_str().is_some());
    prompttree_testing::assertions::assert_badge_level(&json, "warning").unwrap();
}
