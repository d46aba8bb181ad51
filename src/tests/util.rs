use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::ai::TextGenerator;
use crate::error::RecommendError;

/// Generator that returns a canned reply and records every prompt it gets.
#[derive(Clone)]
pub struct FakeGenerator {
    reply: Result<String, RecommendError>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn replying(reply: Result<String, RecommendError>) -> Self {
        Self {
            reply,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone()
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    fn has_credentials(&self) -> bool {
        true
    }
}

/// A schema-valid list with `categories` categories of `items` products each.
pub fn sample_list(categories: usize, items: usize) -> Value {
    let cats: Vec<Value> = (0..categories)
        .map(|c| {
            let products: Vec<Value> = (0..items)
                .map(|i| {
                    json!({
                        "name": format!("Product {c}-{i}"),
                        "brand": "Graco",
                        "why": "Keeps two babies safe on the road",
                        "eco_friendly": i % 2 == 0,
                        "est_price_usd": 25 + i,
                        "url": format!("https://www.amazon.com/dp/B0{c}{i}")
                    })
                })
                .collect();
            json!({
                "category": format!("Category {c}"),
                "priority": if c == 0 { "essential" } else { "nice_to_have" },
                "items": products
            })
        })
        .collect();

    json!({
        "summary": {
            "due_date": "Expecting twins in March",
            "budget": "$500",
            "key_prefs": ["twins", "budget-conscious"],
            "disclaimers": ["Generated recommendations based on the parent's needs"]
        },
        "categories": cats
    })
}

pub fn sample_list_json(categories: usize, items: usize) -> String {
    sample_list(categories, items).to_string()
}

/// Wrap completion text the way the Gemini API returns it.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": { "parts": [ { "text": text } ], "role": "model" },
                "finishReason": "STOP"
            }
        ]
    })
}
