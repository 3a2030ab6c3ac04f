use crate::app_config::{AppConfig, Environment, KakaoCredentials, NaverCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let credential = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !is_placeholder(v))
    };

    let bind_raw = or_default("PLACEPICK_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = bind_raw
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "PLACEPICK_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let timeout_raw = or_default("PLACEPICK_UPSTREAM_TIMEOUT_SECS", "10");
    let upstream_timeout_secs = match timeout_raw.parse::<u64>() {
        Ok(0) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEPICK_UPSTREAM_TIMEOUT_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            })
        }
        Ok(secs) => secs,
        Err(e) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "PLACEPICK_UPSTREAM_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            })
        }
    };

    let env = parse_environment(&or_default("PLACEPICK_ENV", "development"));
    let log_level = or_default("PLACEPICK_LOG_LEVEL", "info");
    let user_agent = or_default("PLACEPICK_USER_AGENT", "placepick/0.1 (place-discovery)");

    let kakao = credential("KAKAO_REST_API_KEY").map(|rest_api_key| KakaoCredentials { rest_api_key });

    // Naver needs both halves; one without the other is as good as none.
    let naver = match (credential("NAVER_CLIENT_ID"), credential("NAVER_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(NaverCredentials {
            client_id,
            client_secret,
        }),
        _ => None,
    };

    let kakao_base_url = lookup("KAKAO_BASE_URL").ok().filter(|v| !v.is_empty());
    let naver_base_url = lookup("NAVER_BASE_URL").ok().filter(|v| !v.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_timeout_secs,
        user_agent,
        kakao,
        naver,
        kakao_base_url,
        naver_base_url,
    })
}

/// Empty values and the `your_..._here` samples shipped in `.env.example`
/// count as unset.
fn is_placeholder(value: &str) -> bool {
    value.is_empty() || (value.starts_with("your_") && value.ends_with("_here"))
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
