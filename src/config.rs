use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded and
/// carried in `AppState` for the services and the admin middleware.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and local conveniences.
    pub env: Env,
    // HS256 secret used to sign and verify auth tokens.
    pub jwt_secret: String,
    // Lifetime of an issued token, in hours.
    pub token_ttl_hours: i64,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Administrator account created at startup, if both fields are present.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    // Preload the demo menu into the pizza repository.
    pub seed_menu: bool,
}

/// Env
///
/// Defines the runtime context: a developer machine or a production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

impl Default for AppConfig {
    /// default
    ///
    /// Safe, non-panicking values for test setup; never reads the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bind_addr: "127.0.0.1:0".to_string(),
            admin_username: Some("admin".to_string()),
            admin_password: Some("admin".to_string()),
            seed_menu: false,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from environment variables and implements the
    /// **fail-fast** principle.
    ///
    /// # Panics
    /// Panics in `Env::Production` if `JWT_SECRET` is not set, and in any
    /// environment if `TOKEN_TTL_HOURS` is set but is not a positive integer.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // The production secret is mandatory and must be explicitly set.
        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => match raw.parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => panic!("FATAL: TOKEN_TTL_HOURS must be a positive integer, got '{}'", raw),
            },
            Err(_) => DEFAULT_TOKEN_TTL_HOURS,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        // Local runs always get a usable admin; production only seeds one on request.
        let (admin_username, admin_password) = match env {
            Env::Local => (
                Some(env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string())),
                Some(env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string())),
            ),
            Env::Production => (env::var("ADMIN_USERNAME").ok(), env::var("ADMIN_PASSWORD").ok()),
        };

        let seed_menu = match env::var("SEED_MENU") {
            Ok(raw) => matches!(raw.as_str(), "1" | "true" | "yes"),
            Err(_) => env == Env::Local,
        };

        Self {
            env,
            jwt_secret,
            token_ttl_hours,
            bind_addr,
            admin_username,
            admin_password,
            seed_menu,
        }
    }

    /// The admin credentials to seed, only when both halves are configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}
