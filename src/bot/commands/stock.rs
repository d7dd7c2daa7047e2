//! Stock Discord commands - `stock`, `import`, and `export`.
//!
//! Movement commands fill in the product's inputs on the tracker and submit
//! them; all rules live in the core.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{inventory::Outcome, movement::MovementAction, report, stock::UnitType},
        errors::{Error, Result},
    };
    use tracing::info;

    /// Shows current stock levels for one product or the whole catalog.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to show (all products if omitted)"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: Option<String>,
    ) -> Result<()> {
        let tracker = ctx.data().tracker.lock().await;
        let ledger = tracker.inventory().stock();

        let text = if let Some(name) = product {
            let Ok(product) = tracker.catalog().resolve(&name) else {
                drop(tracker);
                ctx.say(format!(
                    "❌ Product '{name}' not found. Use `/products` to see available products."
                ))
                .await?;
                return Ok(());
            };
            report::format_stock(product, ledger.record(product.id))
        } else {
            tracker
                .catalog()
                .products()
                .iter()
                .map(|p| report::format_stock(p, ledger.record(p.id)))
                .collect::<Vec<_>>()
                .join("\n")
        };
        drop(tracker);

        ctx.say(text).await?;
        Ok(())
    }

    /// Records stock coming in.
    #[poise::command(slash_command, prefix_command)]
    pub async fn import(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product receiving stock"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "How many units"] quantity: i64,
        #[description = "bags, packets, or cartons (default bags)"]
        #[autocomplete = "autocomplete::autocomplete_unit_type"]
        unit: Option<String>,
        #[description = "Optional note"] note: Option<String>,
    ) -> Result<()> {
        record_movement(ctx, MovementAction::Import, product, quantity, unit, note).await
    }

    /// Records stock going out. Refused when not enough is on hand.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product losing stock"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "How many units"] quantity: i64,
        #[description = "bags, packets, or cartons (default bags)"]
        #[autocomplete = "autocomplete::autocomplete_unit_type"]
        unit: Option<String>,
        #[description = "Optional note"] note: Option<String>,
    ) -> Result<()> {
        record_movement(ctx, MovementAction::Export, product, quantity, unit, note).await
    }

    async fn record_movement(
        ctx: poise::Context<'_, BotData, Error>,
        action: MovementAction,
        product_name: String,
        quantity: i64,
        unit: Option<String>,
        note: Option<String>,
    ) -> Result<()> {
        info!(
            "{} command from {}: product='{}', quantity={}, unit={:?}, note={:?}",
            action,
            ctx.author().name,
            product_name,
            quantity,
            unit,
            note
        );

        let unit = match unit.as_deref().map(str::parse::<UnitType>).transpose() {
            Ok(unit) => unit.unwrap_or_default(),
            Err(e) => {
                ctx.say(format!("❌ {e}. Use bags, packets, or cartons."))
                    .await?;
                return Ok(());
            }
        };

        let mut tracker = ctx.data().tracker.lock().await;

        let Ok(product) = tracker.catalog().resolve(&product_name).cloned() else {
            drop(tracker);
            ctx.say(format!(
                "❌ Product '{product_name}' not found. Use `/products` to see available products."
            ))
            .await?;
            return Ok(());
        };

        if action == MovementAction::Export && !tracker.export_enabled(product.id, unit) {
            drop(tracker);
            ctx.say(format!(
                "❌ Export disabled: {} has no {unit} in stock.",
                product.name
            ))
            .await?;
            return Ok(());
        }

        let outcome = tracker
            .record(
                product.id,
                action,
                &quantity.to_string(),
                unit,
                note.as_deref().unwrap_or_default(),
            )
            .await?;
        let level = tracker.stock_for(product.id).get(unit);
        drop(tracker);

        let mut reply = report::format_outcome(&outcome, &product);
        if matches!(outcome, Outcome::Ignored) {
            reply.push_str(" Quantity must be a positive whole number.");
        }
        reply.push_str(&format!("\n{level} {unit} now on hand."));
        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
