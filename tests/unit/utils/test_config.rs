use std::env;
use tasks_client::application::config::Config;
use tasks_client::utils::config::{get_env_or_default, get_env_or_none};

#[test]
fn test_get_env_or_default_with_existing_var() {
    unsafe {
        env::set_var("TASKS_TEST_VAR_STRING", "test_value");
        let result: String = get_env_or_default("TASKS_TEST_VAR_STRING", "default".to_string());
        assert_eq!(result, "test_value");
        env::remove_var("TASKS_TEST_VAR_STRING");
    }
}

#[test]
fn test_get_env_or_default_with_missing_var() {
    unsafe {
        env::remove_var("TASKS_TEST_MISSING_VAR");
        let result: String = get_env_or_default("TASKS_TEST_MISSING_VAR", "default".to_string());
        assert_eq!(result, "default");
    }
}

#[test]
fn test_get_env_or_default_with_invalid_parse() {
    unsafe {
        env::set_var("TASKS_TEST_VAR_INVALID", "not_a_number");
        let result: u64 = get_env_or_default("TASKS_TEST_VAR_INVALID", 99);
        assert_eq!(result, 99); // Should return default
        env::remove_var("TASKS_TEST_VAR_INVALID");
    }
}

#[test]
fn test_get_env_or_none_with_existing_var() {
    unsafe {
        env::set_var("TASKS_TEST_VAR_OPTION", "123");
        let result: Option<i32> = get_env_or_none("TASKS_TEST_VAR_OPTION");
        assert_eq!(result, Some(123));
        env::remove_var("TASKS_TEST_VAR_OPTION");
    }
}

#[test]
fn test_get_env_or_none_with_blank_var() {
    unsafe {
        env::set_var("TASKS_TEST_VAR_BLANK", "  ");
        let result: Option<String> = get_env_or_none("TASKS_TEST_VAR_BLANK");
        assert_eq!(result, None);
        env::remove_var("TASKS_TEST_VAR_BLANK");
    }
}

#[test]
fn test_config_builders() {
    let config = Config::new()
        .with_base_url("http://127.0.0.1:9000/api")
        .with_token_file("/tmp/tasks-session.json");

    assert_eq!(config.rest_api.base_url, "http://127.0.0.1:9000/api");
    assert_eq!(
        config.storage.token_file.as_deref(),
        Some("/tmp/tasks-session.json")
    );
    assert_eq!(
        config.endpoint_url("tasks/statistics/"),
        "http://127.0.0.1:9000/api/tasks/statistics/"
    );
}
