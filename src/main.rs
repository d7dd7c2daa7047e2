use dotenvy::dotenv;
use stock_buddy::{
    bot::{self, BotData},
    config,
    core::tracker::Tracker,
    errors::{Error, Result},
    store::DatabaseStore,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog = config::catalog::load_default_catalog()
        .inspect_err(|e| error!("Failed to load product catalog: {}", e))?;

    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    let tracker = Tracker::load(DatabaseStore::new(db), catalog).await?;

    let token = std::env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(tracker)).await
}
