//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests product names from the catalog and the fixed unit types.

use crate::{bot::BotData, core::stock::UnitType, errors::Error};

/// Provides autocomplete suggestions for product names.
///
/// Returns up to 25 catalog products whose name contains the partial input
/// (case-insensitive), in catalog order.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let tracker = ctx.data().tracker.lock().await;
    let partial_lower = partial.to_lowercase();

    tracker
        .catalog()
        .products()
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&partial_lower))
        .map(|p| p.name.clone())
        .take(25) // Discord autocomplete limit
        .collect()
}

/// Provides autocomplete suggestions for unit types.
pub async fn autocomplete_unit_type(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    UnitType::ALL
        .into_iter()
        .map(UnitType::as_str)
        .filter(|name| name.contains(partial_lower.as_str()))
        .map(str::to_string)
        .collect()
}
