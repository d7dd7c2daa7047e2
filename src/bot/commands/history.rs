//! History Discord commands - `history` and `history_delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{history::paginate, report},
        errors::{Error, Result},
    };
    use tracing::info;

    /// Shows the movement history, most recent first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page number (default 1)"] page: Option<u32>,
        #[description = "Only show movements of this product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: Option<String>,
    ) -> Result<()> {
        let page = page.map_or(1, |p| p as usize);
        let page_size = ctx.data().history_page_size;
        let tracker = ctx.data().tracker.lock().await;
        let log = tracker.inventory().history();

        let text = if let Some(name) = product {
            let Ok(product) = tracker.catalog().resolve(&name) else {
                drop(tracker);
                ctx.say(format!("❌ Product '{name}' not found.")).await?;
                return Ok(());
            };
            let entries: Vec<_> = log.for_product(product.id).cloned().collect();
            report::format_history_page(
                &paginate(&entries, page, page_size),
                tracker.catalog(),
            )
        } else {
            report::format_history_page(&log.page(page, page_size), tracker.catalog())
        };
        drop(tracker);

        ctx.say(text).await?;
        Ok(())
    }

    /// Deletes a history entry. Stock levels are not changed.
    #[poise::command(slash_command, prefix_command)]
    pub async fn history_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "ID of the history entry"] id: u64,
    ) -> Result<()> {
        info!("history_delete from {}: id={}", ctx.author().name, id);

        let removed = ctx.data().tracker.lock().await.delete_history(id).await?;

        ctx.say(report::format_deletion(removed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
