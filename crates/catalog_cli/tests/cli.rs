use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use catalog_core::catalog_api::CatalogDocument;
use serde_json::Value;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn legacy_fixture_path() -> String {
    workspace_root()
        .join("tests/fixtures/legacy_catalog.json")
        .to_string_lossy()
        .to_string()
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_underground-catalog"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run underground-catalog CLI")
}

fn temp_output_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.json", std::process::id(), nanos))
}

fn converted_document_path(prefix: &str) -> PathBuf {
    let out = temp_output_path(prefix);
    let out_str = out.to_string_lossy().to_string();
    let output = run_cli(&["convert", &legacy_fixture_path(), "--output", &out_str]);
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    out
}

#[test]
fn convert_writes_a_loadable_document() {
    let out = converted_document_path("catalog_convert");
    let text = fs::read_to_string(&out).expect("converted document should exist");
    let document = CatalogDocument::from_json_str(&text).expect("output should parse");
    let _ = fs::remove_file(&out);

    assert_eq!(document.record_count(), 17);
    let mc = document.vehicles.get("mc").expect("mc");
    assert_eq!(mc[0].id.as_deref(), Some("mc_001"));
    assert_eq!(mc[0].price, Some(45_000));
}

#[test]
fn convert_prints_to_stdout_without_output() {
    let output = run_cli(&["convert", &legacy_fixture_path()]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["config"]["currency"], "USD");
    assert_eq!(json["services"]["laundering"][0]["price_percentage"], 15);
}

#[test]
fn convert_report_lists_fallback_categories() {
    let output = run_cli(&["convert", &legacy_fixture_path(), "--report"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("records converted"));
    assert!(stderr.contains("Prototype sans nom"));
}

#[test]
fn rust_log_enables_debug_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_underground-catalog"))
        .args(["convert", &legacy_fixture_path()])
        .env("RUST_LOG", "debug")
        .output()
        .expect("failed to run underground-catalog CLI");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no category token matched"));
}

#[test]
fn quiet_by_default() {
    let output = run_cli(&["convert", &legacy_fixture_path()]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("no category token matched"));
}

#[test]
fn convert_rejects_a_missing_section() {
    let input = temp_output_path("catalog_partial");
    fs::write(&input, r#"{ "vehicles": {}, "weapons": {} }"#).expect("write input");
    let input_str = input.to_string_lossy().to_string();
    let output = run_cli(&["convert", &input_str]);
    let _ = fs::remove_file(&input);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error converting"));
}

#[test]
fn render_outputs_one_block_per_container() {
    let document = converted_document_path("catalog_render_html");
    let document_str = document.to_string_lossy().to_string();
    let output = run_cli(&["render", &document_str, "--section", "blackmarket"]);
    let _ = fs::remove_file(&document);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!-- #drugs .cars-grid -->"));
    assert!(stdout.contains("<!-- #catalyst .cars-grid -->"));
    assert!(!stdout.contains("#mc .cars-grid"));
    assert!(stdout.contains("Ressource à découvrir"));
}

#[test]
fn render_json_carries_the_report() {
    let document = converted_document_path("catalog_render_json");
    let document_str = document.to_string_lossy().to_string();
    let output = run_cli(&["render", &document_str, "--json"]);
    let _ = fs::remove_file(&document);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["report"]["rendered_cards"], 17);
    assert_eq!(json["containers"][0]["key"], "#mc .cars-grid");
    assert_eq!(json["containers"].as_array().map(Vec::len), Some(13));
}

#[test]
fn render_fails_on_unreadable_document() {
    let output = run_cli(&["render", "/definitely/not/here/data.json"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn contact_uses_the_section_seller() {
    let output = run_cli(&["contact", "Molotov", "--section", "weapons"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Contact pour: Molotov\n"));
    assert!(stdout.contains("Vous souhaitez contacter le fournisseur d'armes pour: Molotov"));
    assert!(stdout.contains("💬 En jeu: Shadow"));
}

#[test]
fn contact_without_section_uses_the_generic_text() {
    let output = run_cli(&["contact", "Tornado"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("📱 Discord: Gally"));
}

#[test]
fn theme_prints_color_variables() {
    let output = run_cli(&["theme", "Services"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("title=🏠 UNDERGROUND SERVICES"));
    assert!(stdout.contains("--primary-color=#44ff88"));
}

#[test]
fn theme_json_is_structured() {
    let output = run_cli(&["theme", "vehicles", "--json"]);
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["pageTitle"], "Motors Underground - Véhicules Discrets");
    assert_eq!(json["footer"]["ingame"], "Gally");
}

#[test]
fn unknown_section_is_a_usage_error() {
    let output = run_cli(&["theme", "armory"]);
    assert_eq!(output.status.code(), Some(2));
}
