use tracing::{info, instrument};

use crate::ai::normalize::parse_shopping_list;
use crate::ai::prompts::build_prompt;
use crate::ai::TextGenerator;
use crate::error::RecommendError;
use crate::list::ShoppingList;

/// Build a prompt for `user_input`, ask the generator, and parse its answer.
///
/// One outbound call, no retries. Any failure is returned as is; turning it
/// into a fallback body is the caller's job.
#[instrument(level = "debug", skip(generator, user_input), fields(model = generator.model(), input_len = user_input.len()))]
pub async fn generate_shopping_list<G: TextGenerator>(
    generator: &G,
    user_input: &str,
) -> Result<ShoppingList, RecommendError> {
    let prompt = build_prompt(user_input);
    let raw = generator.generate(&prompt).await?;
    let list = parse_shopping_list(&raw)?;
    info!(
        model = generator.model(),
        categories = list.categories.len(),
        items = list.item_count(),
        "Generated shopping list"
    );
    Ok(list)
}
