use serde_json::Value;
use tracing::{debug, trace};

use crate::error::RecommendError;
use crate::list::ShoppingList;

/// Remove one markdown code fence around the model output.
///
/// Handles a leading "```json" or plain "```" opener and a trailing "```".
/// Text without an opening fence is returned trimmed. Prose before or after
/// the fence, or nested fences, are not handled.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

/// Turn raw completion text into a validated [`ShoppingList`].
///
/// Parsing failures are `MalformedOutput`; valid JSON with the wrong shape or
/// out-of-range counts is `SchemaMismatch`.
pub fn parse_shopping_list(raw: &str) -> Result<ShoppingList, RecommendError> {
    let text = strip_code_fence(raw);
    trace!(text = %text, "normalized model output");

    let value: Value =
        serde_json::from_str(text).map_err(|e| RecommendError::MalformedOutput(e.to_string()))?;
    let list: ShoppingList =
        serde_json::from_value(value).map_err(|e| RecommendError::SchemaMismatch(e.to_string()))?;
    list.validate()?;

    debug!(
        categories = list.categories.len(),
        items = list.item_count(),
        "parsed shopping list"
    );
    Ok(list)
}
