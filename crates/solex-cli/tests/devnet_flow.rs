//! devnet_flow.rs
//!
//! Optional devnet registration flow test.
//!
//! This test is skipped by default. To enable, set:
//! - SOLEX_RUN_DEVNET_TESTS=1
//! - SOLEX_REGISTRY_PROGRAM_ID: id of a deployed user registry program
//! - SOLANA_URL (optional): defaults to https://api.devnet.solana.com
//!
//! A random username is registered, so repeated runs do not collide.

use std::env;

use assert_cmd::Command;

#[test]
fn register_random_username_on_devnet() {
    if env::var("SOLEX_RUN_DEVNET_TESTS").ok().as_deref() != Some("1") {
        eprintln!("skip: set SOLEX_RUN_DEVNET_TESTS=1 to enable devnet flow test");
        return;
    }
    let Ok(program_id) = env::var("SOLEX_REGISTRY_PROGRAM_ID") else {
        eprintln!("skip: SOLEX_REGISTRY_PROGRAM_ID not set");
        return;
    };
    let url = env::var("SOLANA_URL").unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    let username = format!("solex-{}", std::process::id());

    let out = Command::cargo_bin("user_registry")
        .unwrap()
        .args([program_id.as_str(), username.as_str(), "--url", url.as_str(), "--json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "user_registry failed: {}", String::from_utf8_lossy(&out.stderr));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["username"], username);
    assert_eq!(v["instructions"], 2);
    assert!(v["signature"].as_str().is_some_and(|s| !s.is_empty()));
}
