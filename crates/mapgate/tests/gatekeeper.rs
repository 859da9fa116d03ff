//! Integration tests for loading, sharing, and installing a gatekeeper.

use std::path::PathBuf;
use std::sync::Arc;

use mapgate::prelude::*;
use mapgate::{GraphError, generate_username};

// =========================================================================
// Helpers
// =========================================================================

const CONFIG: &str = r#"{
    "authorizer_hash": "e3b0c44298fc1c14",
    "validate_maps": true,
    "max_chain_depth": 16,
    "map_tokens": {
        "hub": "",
        "forest": "hub_clear",
        "temple": "forest_clear",
        "loop_a": "loop_x",
        "loop_b": "loop_y"
    },
    "token_sources": {
        "hub_clear": "hub",
        "forest_clear": "forest",
        "loop_x": "loop_b",
        "loop_y": "loop_a"
    },
    "mixing_groups": [["forest", "forest_rain"], ["temple"]]
}"#;

/// Writes `contents` to a fresh file in the temp dir.
async fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "mapgate-{}-{}-{name}.json",
        std::process::id(),
        rand_suffix()
    ));
    tokio::fs::write(&path, contents)
        .await
        .expect("temp dir should be writable");
    path
}

fn rand_suffix() -> String {
    // Username generation is a handy source of unique lowercase strings.
    generate_username().short().to_owned()
}

fn held(tokens: &[&str]) -> HeldTokens {
    tokens.iter().copied().collect()
}

// =========================================================================
// load()
// =========================================================================

#[tokio::test]
async fn test_load_valid_file_builds_gatekeeper() {
    let path = write_config("valid", CONFIG).await;

    let gate = Gatekeeper::load(&path).await.expect("config should load");

    assert!(gate.has_all_tokens("temple", &held(&["hub_clear", "forest_clear"])));
    assert!(!gate.has_all_tokens("temple", &held(&["forest_clear"])));
    assert!(!gate.has_all_tokens("loop_a", &held(&["loop_x", "loop_y"])));
    assert_eq!(gate.mixing_for_map("forest_rain").len(), 2);
    assert_eq!(gate.chain().max_depth(), 16);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_load_missing_file_returns_io_error() {
    let path = std::env::temp_dir().join("mapgate-does-not-exist.json");

    let result = Gatekeeper::load(&path).await;

    assert!(
        matches!(&result, Err(GateError::Io { path: p, .. }) if *p == path),
        "expected Io error, got {result:?}"
    );
}

#[tokio::test]
async fn test_load_malformed_json_returns_parse_error() {
    let path = write_config("malformed", "{ not json").await;

    let result = Gatekeeper::load(&path).await;

    assert!(matches!(result, Err(GateError::Parse(_))));
    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_load_zero_depth_returns_graph_error() {
    let path = write_config(
        "zero-depth",
        r#"{ "authorizer_hash": "x", "max_chain_depth": 0 }"#,
    )
    .await;

    let result = Gatekeeper::load(&path).await;

    assert!(matches!(result, Err(GateError::Graph(GraphError::ZeroDepth))));
    let _ = tokio::fs::remove_file(&path).await;
}

// =========================================================================
// Shared reads
// =========================================================================

#[tokio::test]
async fn test_concurrent_callers_share_one_gatekeeper() {
    let gate = Arc::new(
        Gatekeeper::from_config(GatekeeperConfig::from_json(CONFIG).unwrap())
            .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..32 {
        let gate = Arc::clone(&gate);
        handles.push(tokio::spawn(async move {
            // Half the callers hold the chain, half don't.
            let tokens = if i % 2 == 0 {
                held(&["hub_clear", "forest_clear"])
            } else {
                held(&["forest_clear"])
            };
            (i, gate.has_all_tokens("temple", &tokens))
        }));
    }

    for handle in handles {
        let (i, granted) = handle.await.expect("task should not panic");
        assert_eq!(granted, i % 2 == 0, "caller {i}");
    }
}

// =========================================================================
// Full request flow + install()
// =========================================================================

#[test]
fn test_install_once_then_read_anywhere() {
    // The only test in this binary that touches the process-wide slot.
    let first = Gatekeeper::from_config(
        GatekeeperConfig::from_json(CONFIG).unwrap(),
    )
    .unwrap();
    let installed = first.install().expect("first install succeeds");

    let second = Gatekeeper::from_config(
        GatekeeperConfig::from_json(CONFIG).unwrap(),
    )
    .unwrap();
    assert!(matches!(second.install(), Err(GateError::AlreadyInstalled)));

    let global = gatekeeper().expect("installed");
    assert!(std::ptr::eq(installed, global));

    // A player request end to end.
    let name = generate_username();
    let caller = global
        .admit(&[("ed", "0")], name.as_str())
        .expect("well-formed name");
    assert!(!caller.authorized);
    assert!(global.has_all_tokens("forest", &held(&["hub_clear"])));

    // The name survives the wire encoding.
    let wire = global.encode_identity(&caller.username).unwrap();
    assert_eq!(global.decode_identity(&wire).unwrap(), caller.username);
}

#[test]
fn test_editor_request_flow() {
    let gate =
        Gatekeeper::from_config(GatekeeperConfig::from_json(CONFIG).unwrap())
            .unwrap();
    let request = [("ed", "1"), ("au", "e3b0c44298fc1c14")];

    let caller = gate.admit(&request, "editor").expect("editor admitted");

    assert!(caller.authorized);
    // Being an editor doesn't grant map access; tokens still decide.
    // The deepest missing link (forest's requirement) is reported.
    assert_eq!(
        gate.evaluate("temple", &held(&[])),
        Err(ChainDenial::MissingToken {
            map: MapId::from("forest"),
            token: TokenId::from("hub_clear"),
        })
    );
}
