//! Rough cost estimates for log output.
//!
//! Prices are USD and only cover the models the application offers. They are
//! informational; nothing is billed or limited from them.

/// Estimated USD cost of a chat completion, or `None` for unpriced models.
pub fn chat_cost(model: &str, input_tokens: u64, output_tokens: u64) -> Option<f64> {
    // (input, output) per million tokens. Check the mini model first: its
    // name also starts with "gpt-4o".
    let (input_rate, output_rate) = if model.contains("gpt-4o-mini") {
        (0.15, 0.60)
    } else if model == "gpt-4o" {
        (2.50, 10.00)
    } else {
        return None;
    };

    Some(per_million(input_tokens, input_rate) + per_million(output_tokens, output_rate))
}

/// Estimated USD cost of synthesizing `characters` characters.
///
/// Unknown models are priced like `tts-1`.
pub fn speech_cost(model: &str, characters: usize) -> f64 {
    let per_thousand = if model == "tts-1-hd" { 0.030 } else { 0.015 };
    #[allow(clippy::cast_precision_loss)]
    let characters = characters as f64;
    characters / 1000.0 * per_thousand
}

/// Format a cost the way it is logged, e.g. `$0.0123`.
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.4}")
}

#[allow(clippy::cast_precision_loss)]
fn per_million(tokens: u64, rate: f64) -> f64 {
    tokens as f64 * rate / 1_000_000.0
}
