//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `StockBuddy`: slash commands,
//! autocomplete handlers, the shared bot context, and the client start-up.

/// Discord command implementations (stock, history, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::tracker::Tracker,
    errors::{Error, Result},
    store::DatabaseStore,
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Default number of history entries shown per page.
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;

/// Shared data available to all bot commands.
///
/// The tracker sits behind a mutex so that each command runs its whole
/// read-modify-persist cycle before the next one starts.
pub struct BotData {
    /// Inventory tracker backed by the database
    pub tracker: Mutex<Tracker<DatabaseStore>>,
    /// Entries per page in `/history`
    pub history_page_size: usize,
}

impl BotData {
    /// Creates a new `BotData` instance around a loaded tracker.
    #[must_use]
    pub fn new(tracker: Tracker<DatabaseStore>) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
        }
    }
}

pub use commands::*;
pub use handlers::*;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or exits with an error.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::products(),
                commands::stock(),
                commands::import(),
                commands::export(),
                commands::history(),
                commands::history_delete(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
