//! End-to-end runs against a stub server speaking the real wire format.

use prompttree_testing::assertions::{
    assert_badge_level, assert_prompt_titles, assert_slot_budget,
};
use prompttree_testing::fixtures::{note, prompt, sample_tree, timestamp, tree};
use prompttree_testing::{StubServer, TestWorld};
use serde_json::json;

fn serve_sample_tree() -> StubServer {
    let server = StubServer::start().unwrap();
    server.route(
        "GET",
        "/tree",
        200,
        serde_json::to_string(&sample_tree()).unwrap(),
    );
    server
}

#[test]
fn test_tree_json_respects_slot_budget() {
    let server = serve_sample_tree();
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["tree", "--width", "46"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let json = result.json().unwrap();
    assert_prompt_titles(&json, &["Setup", "Levels", "Polish"]).unwrap();
    assert_slot_budget(&json).unwrap();
    assert_eq!(json["content"]["max_visible"], 5);
    assert_eq!(json["content"]["width"], 46);

    let setup = &json["content"]["prompts"][0]["branch"];
    assert_eq!(setup["window"]["has_next"], true);
    assert_eq!(setup["slots"][4]["kind"], "next");
    // prompts without nodes have no strip
    assert!(json["content"]["prompts"][1].get("branch").is_none());
}

#[test]
fn test_tree_page_flag_advances_strip() {
    let server = serve_sample_tree();
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["tree", "--width", "46", "--page", "1"]).unwrap();

    let json = result.json().unwrap();
    let window = &json["content"]["prompts"][0]["branch"]["window"];
    assert_eq!(window["offset"], 4);
    assert_eq!(window["has_back"], true);
    assert_eq!(window["start"], 4);
    assert_eq!(window["end"], 7);
    assert_eq!(
        json["content"]["prompts"][0]["branch"]["slots"][0]["kind"],
        "back"
    );
}

#[test]
fn test_tree_page_on_unknown_prompt_fails() {
    let server = serve_sample_tree();
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["tree", "--page", "99"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("Prompt 99 not found"), "{}", result.stderr);
}

#[test]
fn test_tree_collapsed_hides_strips() {
    let server = serve_sample_tree();
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["tree", "--collapsed"]).unwrap();

    let json = result.json().unwrap();
    for row in json["content"]["prompts"].as_array().unwrap() {
        assert_eq!(row["expanded"], false);
        assert!(row.get("branch").is_none());
    }
}

#[test]
fn test_tree_plain_output() {
    let server = serve_sample_tree();
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["tree", "--width", "46"]).unwrap();

    assert!(result.success());
    assert!(result.stdout.contains("Platformer"));
    assert!(result.stdout.contains("1. Setup (12 nodes)"));
    assert!(result.stdout.contains("(1-4 of 12)"));
    assert!(result.stdout.contains("prompttree tree --page 1"));
}

#[test]
fn test_delete_prompt_refetches_tree() {
    let server = StubServer::start().unwrap();
    server
        .route("DELETE", "/prompts/3", 200, "")
        .route(
            "GET",
            "/tree",
            200,
            serde_json::to_string(&tree(
                "Platformer",
                vec![prompt(1, "Setup", 12), prompt(2, "Levels", 0)],
            ))
            .unwrap(),
        );
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["prompt", "delete", "3"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let json = result.json().unwrap();
    assert_eq!(json["content"]["mutation"], "delete prompt");
    assert_eq!(json["content"]["prompt_count"], 2);

    let methods: Vec<String> = server
        .requests()
        .iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(methods, vec!["DELETE /prompts/3", "GET /tree"]);
}

#[test]
fn test_failed_mutation_reports_server_message() {
    let server = StubServer::start().unwrap();
    server.route(
        "POST",
        "/prompts/0",
        422,
        r#"{"detail":"title must not be empty"}"#,
    );
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["prompt", "create", "--title", ""]).unwrap();

    assert!(!result.success());
    assert!(
        result
            .stderr
            .contains("Server error (422): title must not be empty"),
        "stderr: {}",
        result.stderr
    );
    assert_eq!(server.count("GET", "/tree"), 0);
}

#[test]
fn test_stale_reference_is_reported_as_not_found() {
    let server = StubServer::start().unwrap();
    server.route(
        "DELETE",
        "/prompts/1/nodes/101",
        404,
        r#"{"detail":"node not found"}"#,
    );
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["node", "delete", "1", "101"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr.contains("Not found: node not found"), "{}", result.stderr);
}

#[test]
fn test_create_node_sends_draft() {
    let server = StubServer::start().unwrap();
    server
        .route(
            "POST",
            "/prompts/1/nodes",
            200,
            r#"{"id":113,"name":"Boss","action":"fight"}"#,
        )
        .route(
            "GET",
            "/tree",
            200,
            serde_json::to_string(&sample_tree()).unwrap(),
        );
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world
        .run(&["node", "create", "1", "--name", "Boss", "--action", "fight"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let json = result.json().unwrap();
    assert_eq!(json["content"]["id"], 113);
    assert_eq!(json["content"]["prompt_id"], 1);

    let post = &server.requests()[0];
    let body: serde_json::Value = serde_json::from_str(&post.body).unwrap();
    assert_eq!(body, json!({"name": "Boss", "action": "fight"}));
}

#[test]
fn test_note_add_prepends_returned_note() {
    let server = StubServer::start().unwrap();
    server
        .route(
            "GET",
            "/prompts/1/notes",
            200,
            serde_json::to_string(&vec![note(1, "first")]).unwrap(),
        )
        .route(
            "POST",
            "/prompts/1/notes",
            200,
            serde_json::to_string(&note(2, "second")).unwrap(),
        );
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["note", "add", "1", "second"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let json = result.json().unwrap();
    let contents: Vec<&str> = json["content"]["notes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["content"].as_str())
        .collect();
    assert_eq!(contents, vec!["second", "first"]);
    assert_eq!(server.count("GET", "/prompts/1/notes"), 1);
}

#[test]
fn test_note_add_failure_exits_with_reason() {
    let server = StubServer::start().unwrap();
    server
        .route("GET", "/prompts/1/notes", 200, "[]")
        .route(
            "POST",
            "/prompts/1/notes",
            422,
            r#"{"errors":["content must not be empty"]}"#,
        );
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["note", "add", "1", " "]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr.contains("Failed to create note"),
        "stderr: {}",
        result.stderr
    );
    assert!(result.stderr.contains("content must not be empty"));
}

#[test]
fn test_export_without_output_prints_raw_tree() {
    let server = StubServer::start().unwrap();
    server.route(
        "GET",
        "/tree/export",
        200,
        serde_json::to_string(&sample_tree()).unwrap(),
    );
    let world = TestWorld::new().with_api_url(server.url());

    let result = world.run(&["export"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    let exported: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(exported["project"], "Platformer");
    assert_eq!(exported["mainRequest"], "Build Platformer");
    assert_eq!(exported["prompts"].as_array().unwrap().len(), 3);
}

#[test]
fn test_export_to_file_then_import_round_trip() {
    let server = StubServer::start().unwrap();
    let body = serde_json::to_string(&sample_tree()).unwrap();
    server
        .route("GET", "/tree/export", 200, body.clone())
        .route("POST", "/tree/import", 200, "")
        .route("GET", "/tree", 200, body);
    let world = TestWorld::new().with_api_url(server.url()).with_json();
    let path = world.temp_dir().join("backup.json");

    let export = world.run(&["export", "-o", path.to_str().unwrap()]).unwrap();
    assert!(export.success(), "stderr: {}", export.stderr);
    assert_eq!(export.json().unwrap()["content"]["node_count"], 15);

    let import = world.run(&["import", path.to_str().unwrap()]).unwrap();
    assert!(import.success(), "stderr: {}", import.stderr);
    assert_badge_level(&import.json().unwrap(), "success").unwrap();

    let sent = server
        .requests()
        .into_iter()
        .find(|r| r.path == "/tree/import")
        .unwrap();
    let sent: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(sent["tree"]["project"], "Platformer");
}

#[test]
fn test_saves_list_and_load() {
    let server = serve_sample_tree();
    server
        .route(
            "GET",
            "/tree/saves",
            200,
            json!({"trees": [{"name": "v1 final", "updated_at": timestamp(0)}]}).to_string(),
        )
        .route("POST", "/tree/load/v1%20final", 200, "");
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let saves = world.run(&["saves"]).unwrap();
    assert!(saves.success(), "stderr: {}", saves.stderr);
    assert_eq!(saves.json().unwrap()["content"]["saves"][0]["name"], "v1 final");

    let load = world.run(&["load", "v1 final"]).unwrap();
    assert!(load.success(), "stderr: {}", load.stderr);
    assert_eq!(load.json().unwrap()["content"]["prompt_count"], 3);
}

#[test]
fn test_save_trims_name_before_sending() {
    let server = StubServer::start().unwrap();
    server
        .route("POST", "/tree/save", 200, "")
        .route("GET", "/tree/saves", 200, r#"{"trees":[]}"#);
    let world = TestWorld::new().with_api_url(server.url()).with_json();

    let result = world.run(&["save", "  nightly  "]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr);
    assert_eq!(result.json().unwrap()["content"]["target"], "nightly");
    let body: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
    assert_eq!(body, json!({"name": "nightly"}));
}
