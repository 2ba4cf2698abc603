use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_learning::LearningRepository;
use domain_scores::ScoreRepository;
use domain_skills::SkillRepository;
use domain_users::UserRepository;
use skills_api::{AppState, Config, Stores, build_app, db, seed};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    match config.database.clone() {
        Some(database) => {
            let connection = db::connect(&database).await?;
            serve(Stores::postgres(&connection), &config).await?;

            match connection.close().await {
                Ok(()) => info!("PostgreSQL connection closed"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            serve(Stores::in_memory(), &config).await?;
        }
    }

    info!("Skills API shutdown complete");
    Ok(())
}

async fn serve<U, K, S, L>(stores: Stores<U, K, S, L>, config: &Config) -> eyre::Result<()>
where
    U: UserRepository + 'static,
    K: SkillRepository + 'static,
    S: ScoreRepository + 'static,
    L: LearningRepository + 'static,
{
    let state = AppState::new(stores, config)?;

    if config.seed_demo_data {
        seed::seed_demo_data(&state).await?;
    }

    let app = build_app(&state, config)?;

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))
}
