//! General Discord commands - ping, help, and the product list.
//! These commands don't modify any state.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**StockBuddy Help**\n\
        Track bags, packets, and cartons for each product.\n\n\
        **Movement Commands**\n\
        • `/import <product> <quantity> [unit] [note]` - Adds stock.\n\
        • `/export <product> <quantity> [unit] [note]` - Removes stock (only if enough is on hand).\n\n\
        **Viewing**\n\
        • `/stock [product]` - Shows current stock levels.\n\
        • `/products` - Lists the product catalog.\n\
        • `/history [page] [product]` - Shows the movement history, most recent first.\n\
        • `/history_delete <id>` - Removes a history entry (stock is not changed).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Unit defaults to bags.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists the products stock can be tracked for.
    #[poise::command(slash_command, prefix_command)]
    pub async fn products(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let tracker = ctx.data().tracker.lock().await;

        let lines: Vec<String> = tracker
            .catalog()
            .products()
            .iter()
            .map(|product| format!("• {} (ID {})", product.name, product.id))
            .collect();
        drop(tracker);

        let out = format!("**Products**\n{}", lines.join("\n"));

        ctx.say(out).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
