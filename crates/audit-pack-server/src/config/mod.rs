use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub discovery_ttl: Duration,
    pub enable_debug_sessions: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            discovery_ttl: Duration::from_secs(30),
            enable_debug_sessions: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    pub idle_ttl: Duration,
    pub max_sessions: usize,
    pub eviction_check_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(1800),
            max_sessions: 256,
            eviction_check_interval: Duration::from_secs(30),
        }
    }
}

pub fn validate_startup_config(
    api: &ApiConfig,
    sessions: &SessionConfig,
) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("api body limit must be > 0".to_string());
    }
    if api.discovery_ttl.is_zero() {
        return Err("discovery ttl must be > 0".to_string());
    }
    if sessions.max_sessions == 0 {
        return Err("session capacity must be > 0".to_string());
    }
    if sessions.idle_ttl.is_zero() || sessions.eviction_check_interval.is_zero() {
        return Err("session ttl and eviction interval must be > 0".to_string());
    }
    if sessions.eviction_check_interval > sessions.idle_ttl {
        return Err("session contract requires eviction interval <= idle ttl".to_string());
    }
    Ok(())
}
