use axum_helpers::JwtConfig;
use core_config::{
    AppInfo, FromEnv, app_info, database::DatabaseConfig, env_flag, env_or_default,
    server::ServerConfig,
};

pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    /// `None` runs the service on in-memory stores
    pub database: Option<DatabaseConfig>,
    /// Allowed CORS origin and base for links in e-mails
    pub frontend_url: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let jwt = JwtConfig::from_env()?; // JWT_SECRET is required
        let database = DatabaseConfig::from_env_optional()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            jwt,
            database,
            frontend_url: env_or_default("FRONTEND_URL", "http://localhost:8080"),
            seed_demo_data: env_flag("SEED_DEMO_DATA"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-with-32-characters!";

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", None),
                ("FRONTEND_URL", None),
                ("SEED_DEMO_DATA", None),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
                assert_eq!(config.frontend_url, "http://localhost:8080");
                assert!(!config.seed_demo_data);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.app.name, "skills_api");
            },
        );
    }

    #[test]
    fn test_missing_secret_fails() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_database_and_seed() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("DATABASE_URL", Some("postgres://localhost/skills")),
                ("SEED_DEMO_DATA", Some("true")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database.unwrap().url, "postgres://localhost/skills");
                assert!(config.seed_demo_data);
            },
        );
    }
}
