use pizza_backend::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 7] = [
    "APP_ENV",
    "JWT_SECRET",
    "TOKEN_TTL_HOURS",
    "BIND_ADDR",
    "ADMIN_USERNAME",
    "ADMIN_PASSWORD",
    "SEED_MENU",
];

/// Runs `test` with every config variable cleared first, then restores the
/// original environment even if the test panicked.
fn run_with_env<T, R>(test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    // JWT_SECRET is missing, so loading must panic.
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("APP_ENV", "production");
            }
            AppConfig::load()
        })
    });

    assert!(
        result.is_err(),
        "Production config loading should panic on a missing JWT secret"
    );
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "local");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.jwt_secret, "super-secure-test-secret-value-local");
    assert_eq!(config.token_ttl_hours, 24);
    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.admin_credentials(), Some(("admin", "admin")));
    assert!(config.seed_menu);
}

#[test]
#[serial]
fn test_app_config_production_reads_everything() {
    let config = run_with_env(|| {
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("JWT_SECRET", "prod-secret");
            env::set_var("TOKEN_TTL_HOURS", "2");
            env::set_var("BIND_ADDR", "127.0.0.1:9000");
        }
        AppConfig::load()
    });

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret, "prod-secret");
    assert_eq!(config.token_ttl_hours, 2);
    assert_eq!(config.bind_addr, "127.0.0.1:9000");
    // No admin unless explicitly configured, and no demo menu.
    assert_eq!(config.admin_credentials(), None);
    assert!(!config.seed_menu);
}

#[test]
#[serial]
fn test_app_config_rejects_bad_token_ttl() {
    let result = run_with_env(|| {
        panic::catch_unwind(|| {
            unsafe {
                env::set_var("TOKEN_TTL_HOURS", "forever");
            }
            AppConfig::load()
        })
    });

    assert!(result.is_err());
}

#[test]
fn test_default_config_is_safe_for_tests() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert!(!config.seed_menu);
    assert_eq!(config.admin_credentials(), Some(("admin", "admin")));
}
