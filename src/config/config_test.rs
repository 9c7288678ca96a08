use std::io::Write;

use crate::Settings;

/// # Case 1: Defaults apply when no file and no environment are given
#[test]
fn test_load_case1() {
    let settings = temp_env::with_vars_unset(
        ["PUSHCONF__CACHE__LOCK_STRIPES", "PUSHCONF__LOOKUP__REQUEST_TIMEOUT_IN_MS"],
        || Settings::load(None).expect("should succeed"),
    );

    assert_eq!(settings.cache.lock_stripes, 64);
    assert_eq!(settings.lookup.request_timeout_in_ms, 3000);
}

/// # Case 2: A TOML file overrides the defaults
#[test]
fn test_load_case2() {
    let dir = tempfile::tempdir().expect("should succeed");
    let path = dir.path().join("pushconf.toml");
    let mut file = std::fs::File::create(&path).expect("should succeed");
    writeln!(
        file,
        "[cache]\nlock_stripes = 8\n\n[lookup]\nrequest_timeout_in_ms = 150\n"
    )
    .expect("should succeed");

    let settings = temp_env::with_vars_unset(
        ["PUSHCONF__CACHE__LOCK_STRIPES", "PUSHCONF__LOOKUP__REQUEST_TIMEOUT_IN_MS"],
        || Settings::load(path.to_str()).expect("should succeed"),
    );

    assert_eq!(settings.cache.lock_stripes, 8);
    assert_eq!(settings.lookup.request_timeout_in_ms, 150);
}

/// # Case 3: Environment variables take the highest priority
#[test]
fn test_load_case3() {
    let dir = tempfile::tempdir().expect("should succeed");
    let path = dir.path().join("pushconf.toml");
    let mut file = std::fs::File::create(&path).expect("should succeed");
    writeln!(file, "[lookup]\nrequest_timeout_in_ms = 150\n").expect("should succeed");

    let settings = temp_env::with_var(
        "PUSHCONF__LOOKUP__REQUEST_TIMEOUT_IN_MS",
        Some("250"),
        || Settings::load(path.to_str()).expect("should succeed"),
    );

    assert_eq!(settings.lookup.request_timeout_in_ms, 250);
    assert_eq!(settings.cache.lock_stripes, 64);
}

/// # Case 4: A named but missing file is an error, not a silent default
#[test]
fn test_load_case4() {
    assert!(Settings::load(Some("/definitely/not/here/pushconf.toml")).is_err());
}
