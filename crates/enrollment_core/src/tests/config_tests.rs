use super::*;

use std::{
    collections::HashMap,
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn temp_settings_file(contents: &str) -> (PathBuf, PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("enrollment_core_config_test_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    let path = root.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    (root, path)
}

#[test]
fn missing_file_and_env_yield_demo_mode_defaults() {
    let settings =
        load_settings_from(Path::new("/nonexistent/funnel.toml"), no_env).expect("settings");

    assert!(settings.is_demo_mode());
    assert_eq!(settings.demo_save_delay, Duration::from_millis(1500));
    assert_eq!(settings.plan_settle_delay, Duration::from_millis(800));
    assert_eq!(settings.interest_close_delay, Duration::from_millis(2000));
    assert_eq!(settings.enrollment_dispatch, DispatchPolicy::Detached);
    assert_eq!(settings.interest_confirmation, ConfirmationPolicy::Optimistic);
}

#[test]
fn file_values_are_applied() {
    let (root, path) = temp_settings_file(
        r#"
script_url = "https://script.google.com/macros/s/abc/exec"
demo_save_delay_ms = 10
interest_confirmation = "require_saved"
enrollment_dispatch = "awaited"
"#,
    );

    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(
        settings.script_url.as_ref().map(Url::as_str),
        Some("https://script.google.com/macros/s/abc/exec")
    );
    assert_eq!(settings.demo_save_delay, Duration::from_millis(10));
    assert_eq!(settings.interest_confirmation, ConfirmationPolicy::RequireSaved);
    assert_eq!(settings.enrollment_dispatch, DispatchPolicy::Awaited);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let (root, path) = temp_settings_file("script_url = \"https://file.example/exec\"\n");

    let settings = load_settings_from(
        &path,
        env_from(&[
            ("SHEET_SCRIPT_URL", "https://plain.example/exec"),
            ("APP__SCRIPT_URL", "https://app.example/exec"),
            ("APP__PLAN_SETTLE_DELAY_MS", "0"),
        ]),
    )
    .expect("settings");

    assert_eq!(
        settings.script_url.as_ref().map(Url::as_str),
        Some("https://app.example/exec")
    );
    assert_eq!(settings.plan_settle_delay, Duration::ZERO);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn empty_env_url_switches_back_to_demo_mode() {
    let (root, path) = temp_settings_file("script_url = \"https://file.example/exec\"\n");

    let settings =
        load_settings_from(&path, env_from(&[("APP__SCRIPT_URL", "  ")])).expect("settings");
    assert!(settings.is_demo_mode());

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_url_fails_fast() {
    let err = load_settings_from(
        Path::new("/nonexistent/funnel.toml"),
        env_from(&[("SHEET_SCRIPT_URL", "not a url")]),
    )
    .expect_err("must fail");
    assert!(format!("{err:#}").contains("SHEET_SCRIPT_URL"));

    assert!(parse_script_url("ftp://example.com/exec").is_err());
}

#[test]
fn unparsable_delay_is_ignored() {
    let settings = load_settings_from(
        Path::new("/nonexistent/funnel.toml"),
        env_from(&[("APP__DEMO_SAVE_DELAY_MS", "soon")]),
    )
    .expect("settings");
    assert_eq!(settings.demo_save_delay, Duration::from_millis(1500));
}

#[test]
fn policies_parse_from_env_strings() {
    assert_eq!("Awaited".parse::<DispatchPolicy>().expect("policy"), DispatchPolicy::Awaited);
    assert_eq!(
        "require-saved".parse::<ConfirmationPolicy>().expect("policy"),
        ConfirmationPolicy::RequireSaved
    );
    assert!("eventually".parse::<DispatchPolicy>().is_err());
}

#[test]
fn mistyped_file_field_fails_instead_of_dropping_the_endpoint() {
    let (root, path) = temp_settings_file(
        r#"
script_url = "https://script.google.com/macros/s/abc/exec"
demo_save_delay_ms = "fast"
"#,
    );

    let err = load_settings_from(&path, no_env).expect_err("must fail");
    assert!(format!("{err:#}").contains("invalid settings in"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn unknown_policy_in_file_fails_fast() {
    let (root, path) = temp_settings_file(
        r#"
script_url = "https://script.google.com/macros/s/abc/exec"
enrollment_dispatch = "eventually"
"#,
    );

    let err = load_settings_from(&path, no_env).expect_err("must fail");
    assert!(format!("{err:#}").contains(SETTINGS_FILE));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_url_fails_fast() {
    let (root, path) = temp_settings_file("script_url = \"not a url\"\n");

    assert!(load_settings_from(&path, no_env).is_err());

    fs::remove_dir_all(root).expect("cleanup");
}
