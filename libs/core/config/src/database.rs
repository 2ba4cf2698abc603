use crate::{env_optional, env_parse, ConfigError};

/// Postgres connection settings.
///
/// The database is optional for this service: when `DATABASE_URL` is not
/// set the API runs against in-memory stores.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            run_migrations: true,
        }
    }

    /// Reads `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_RUN_MIGRATIONS`.
    /// Returns `Ok(None)` when no URL is configured.
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        let Some(url) = env_optional("DATABASE_URL") else {
            return Ok(None);
        };

        Ok(Some(Self {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 10u32)?,
            run_migrations: env_parse("DB_RUN_MIGRATIONS", true)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_absent() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(DatabaseConfig::from_env_optional().unwrap().is_none());
        });
    }

    #[test]
    fn test_database_config_present() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/skills")),
                ("DB_MAX_CONNECTIONS", Some("4")),
                ("DB_RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = DatabaseConfig::from_env_optional().unwrap().unwrap();
                assert_eq!(config.url, "postgres://localhost/skills");
                assert_eq!(config.max_connections, 4);
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_database_config_bad_pool_size() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/skills")),
                ("DB_MAX_CONNECTIONS", Some("many")),
            ],
            || {
                let err = DatabaseConfig::from_env_optional().unwrap_err();
                assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
            },
        );
    }
}
