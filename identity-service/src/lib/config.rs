use std::env;
use std::time::Duration;

use auth::HashingCost;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 3000 }
    }
}

/// Limits applied to every credential and session store call.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub timeout_ms: u64,
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

/// Argon2id cost factor and hashing worker limits.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    /// Upper bound on hashes computed at the same time.
    pub max_concurrent: usize,
    pub timeout_ms: u64,
}

impl PasswordConfig {
    pub fn cost(&self) -> HashingCost {
        HashingCost {
            memory_kib: self.memory_kib,
            iterations: self.iterations,
            parallelism: self.parallelism,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = HashingCost::default();
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
            max_concurrent: 4,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    /// Session lifetime; zero disables expiry.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl SessionConfig {
    pub fn ttl(&self) -> Option<chrono::Duration> {
        (self.ttl_hours > 0).then(|| chrono::Duration::hours(self.ttl_hours))
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }
}

/// Longest accepted session lifetime, one hundred years.
const MAX_TTL_HOURS: i64 = 24 * 365 * 100;

fn default_max_connections() -> u32 {
    5
}

fn default_ttl_hours() -> i64 {
    24
}

fn default_cookie_name() -> String {
    "identity_session".to_string()
}

fn default_purge_interval_secs() -> u64 {
    600
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SESSION__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SESSION__TTL_HOURS=12 overrides session.ttl_hours
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        Self::from_built(configuration)
    }

    fn from_built(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that deserialize fine but cannot drive the service.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_TTL_HOURS).contains(&self.session.ttl_hours) {
            return Err(ConfigError::Message(format!(
                "session.ttl_hours must be between 0 and {}, got {}",
                MAX_TTL_HOURS, self.session.ttl_hours
            )));
        }

        if self.session.purge_interval_secs == 0 {
            return Err(ConfigError::Message(
                "session.purge_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Config::from_built(configuration)
    }

    fn session_section(extra: &str) -> String {
        format!(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [session]
            secret = "test-secret-key-for-session-digests-32b"
            {}
            "#,
            extra
        )
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [session]
            secret = "test-secret-key-for-session-digests-32b"
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.store.timeout(), Duration::from_secs(5));
        assert_eq!(config.password.cost(), HashingCost::default());
        assert_eq!(config.session.ttl(), Some(chrono::Duration::hours(24)));
        assert_eq!(config.session.cookie_name, "identity_session");
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [password]
            memory_kib = 65536
            iterations = 3
            parallelism = 2
            max_concurrent = 8
            timeout_ms = 2000

            [session]
            secret = "test-secret-key-for-session-digests-32b"
            ttl_hours = 1
            cookie_name = "sid"
            purge_interval_secs = 30
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(
            config.password.cost(),
            HashingCost {
                memory_kib: 65536,
                iterations: 3,
                parallelism: 2,
            }
        );
        assert_eq!(config.password.max_concurrent, 8);
        assert_eq!(config.session.ttl(), Some(chrono::Duration::hours(1)));
        assert_eq!(config.session.purge_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_ttl_disables_expiry() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [session]
            secret = "test-secret-key-for-session-digests-32b"
            ttl_hours = 0
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.session.ttl(), None);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [password]
            iterations = 4

            [session]
            secret = "test-secret-key-for-session-digests-32b"
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.password.iterations, 4);
        assert_eq!(config.password.max_concurrent, 4);
        assert_eq!(config.password.memory_kib, HashingCost::default().memory_kib);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_ttl_beyond_calendar_range_is_rejected() {
        let result = from_toml(&session_section("ttl_hours = 9000000000"));
        assert!(result.unwrap_err().to_string().contains("session.ttl_hours"));
    }

    #[test]
    fn test_negative_ttl_is_rejected() {
        assert!(from_toml(&session_section("ttl_hours = -1")).is_err());
    }

    #[test]
    fn test_longest_ttl_is_accepted() {
        let config = from_toml(&session_section(&format!("ttl_hours = {}", MAX_TTL_HOURS)))
            .expect("Failed to parse config");
        assert_eq!(
            config.session.ttl(),
            Some(chrono::Duration::hours(MAX_TTL_HOURS))
        );
    }

    #[test]
    fn test_zero_purge_interval_is_rejected() {
        let result = from_toml(&session_section("purge_interval_secs = 0"));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("session.purge_interval_secs"));
    }
}
