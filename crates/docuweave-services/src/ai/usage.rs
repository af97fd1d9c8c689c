//! Token usage estimation and cost accounting.
//!
//! Rough heuristics when the model API returns no usage metadata: Korean text
//! runs ~1.5 tokens per syllable, English ~4 characters per token.

use docuweave_core::models::TokenUsage;

struct ModelCost {
    model: &'static str,
    input_per_1m: f64,
    output_per_1m: f64,
}

/// USD per 1M tokens, per model.
const MODEL_COSTS: &[ModelCost] = &[
    ModelCost {
        model: "gemini-2.5-flash-lite",
        input_per_1m: 0.10,
        output_per_1m: 0.40,
    },
    ModelCost {
        model: "gemini-2.5-pro",
        input_per_1m: 1.25,
        output_per_1m: 5.00,
    },
    ModelCost {
        model: "gemini-2.0-flash",
        input_per_1m: 0.075,
        output_per_1m: 0.30,
    },
];

/// Approximate token count for a prompt or answer.
pub fn estimate_tokens(text: &str) -> u64 {
    let mut korean = 0usize;
    let mut english = 0usize;
    let mut other = 0usize;
    for c in text.chars() {
        if ('가'..='힣').contains(&c) {
            korean += 1;
        } else if c.is_ascii_alphabetic() {
            english += 1;
        } else {
            other += 1;
        }
    }
    (korean as f64 * 1.5 + english as f64 * 0.25 + other as f64 * 0.5).ceil() as u64
}

/// Cost in USD for one call; zero for unknown models.
pub fn calculate_cost(input_tokens: u64, output_tokens: u64, model: &str) -> f64 {
    let Some(cost) = MODEL_COSTS.iter().find(|c| c.model == model) else {
        tracing::warn!(model = %model, "Unknown model, reporting zero cost");
        return 0.0;
    };
    let input = input_tokens as f64 / 1_000_000.0 * cost.input_per_1m;
    let output = output_tokens as f64 / 1_000_000.0 * cost.output_per_1m;
    input + output
}

pub fn usage_for(input_tokens: u64, output_tokens: u64, model: &str) -> TokenUsage {
    TokenUsage {
        input_tokens,
        output_tokens,
        total_tokens: input_tokens + output_tokens,
        cost_usd: calculate_cost(input_tokens, output_tokens, model),
    }
}
