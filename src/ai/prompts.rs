//! Prompt sent to the generation provider.
//!
//! The JSON skeleton embedded here is the contract the response normalizer
//! validates against, so changes to one must be mirrored in
//! [`crate::list::ShoppingList`].

/// Role and tone of the assistant.
pub const PERSONA: &str = "You are TotsyList, a baby product shopping expert. Your task is to help a parent find all the products they need for their planned activity in one place. Be comprehensive: the parent is relying on you and should not have to go anywhere else. Think of yourself as their best friend who has a baby and wants to make sure they are covered.";

/// Expected output document. Field names match [`crate::list::ShoppingList`].
pub const RESPONSE_SKELETON: &str = r#"{
  "summary": {
    "due_date": "The main activity or situation from the input (e.g. 'Having a baby', 'Baby shower', 'First month with newborn')",
    "budget": "Budget from the input, or \"unknown\"",
    "key_prefs": ["preferences from the input"],
    "disclaimers": ["Generated recommendations based on the parent's needs"]
  },
  "categories": [
    {
      "category": "Category Name",
      "priority": "essential",
      "items": [
        {
          "name": "Product Name",
          "brand": "Brand Name",
          "why": "Brief reason why this product fits their needs",
          "eco_friendly": true,
          "est_price_usd": 25,
          "url": "https://www.amazon.com/product-link"
        }
      ]
    }
  ]
}"#;

/// Ranking and selection rules.
pub const RULES: &str = "IMPORTANT:
- In \"due_date\", summarize the main activity or situation from the parent's input.
- Create between 3 and 10 categories that are MOST RELEVANT to their situation.
- Categories can be anything appropriate, for example \"Feeding\", \"Sleep\", \"Diapering\", \"Travel\", \"Safety\", \"Clothing\", \"Bath Time\", \"Nursery Setup\", \"Postpartum Care\". You are not limited to these.
- Set \"priority\" to exactly \"essential\" or \"nice_to_have\" based on their situation.
- For each category, rank all relevant products from most to least important and return only the TOP 10 in that order.
- Give every product a \"url\" with a direct purchase link (prefer Amazon, Target or other major retailers).
- \"est_price_usd\" is a plain number without a currency sign.
- Respect any budget and preferences in the input.";

/// Build the full prompt for `user_input`.
///
/// The input is embedded verbatim.
pub fn build_prompt(user_input: &str) -> String {
    format!(
        "{PERSONA}\n\nGenerate a comprehensive baby product list for: \"{user_input}\"\n\n\
         Return ONLY valid JSON with this exact structure (no markdown, no extra text):\n\
         {RESPONSE_SKELETON}\n\n{RULES}\n\nReturn ONLY the JSON, no other text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_input_verbatim() {
        let input = "due in March, twins, budget $500 \"quoted\"";
        let prompt = build_prompt(input);
        assert!(prompt.contains(input));
        assert!(prompt.starts_with(PERSONA));
    }

    #[test]
    fn prompt_describes_schema_and_limits() {
        let prompt = build_prompt("x");
        for field in ["\"est_price_usd\"", "\"eco_friendly\"", "\"key_prefs\"", "nice_to_have"] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("between 3 and 10 categories"));
        assert!(prompt.contains("TOP 10"));
        assert!(prompt.ends_with("Return ONLY the JSON, no other text."));
    }

    #[test]
    fn skeleton_parses_as_a_shopping_list() {
        let list: crate::list::ShoppingList = serde_json::from_str(RESPONSE_SKELETON).unwrap();
        assert_eq!(list.categories.len(), 1);
    }
}
