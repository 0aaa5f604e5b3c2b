//! Token suggestions for hardcoded style values.

use tokendrift_core::constants::{
    DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_SUGGESTION_CONFIDENCE, REM_BASE_PX,
};
use tokendrift_core::types::drift::TokenSuggestion;
use tokendrift_core::types::token::{DesignToken, TokenValue};

use crate::normalize::{color_similarity, normalize_color, normalize_spacing, spacing_similarity};

/// Ranked replacement tokens for one hardcoded value.
///
/// A token whose value is identical to the captured one scores 1.0
/// outright; otherwise confidence is the color or spacing similarity.
/// Results below `min_confidence` drop, equal confidences order by
/// ascending token name, and the list is capped at `max`.
pub fn suggest_tokens(
    value: &str,
    tokens: &[DesignToken],
    min_confidence: f64,
    max: usize,
) -> Vec<TokenSuggestion> {
    let mut out: Vec<TokenSuggestion> = Vec::new();
    for token in tokens {
        let Some(confidence) = value_confidence(value, token) else { continue };
        if confidence < min_confidence {
            continue;
        }
        out.push(TokenSuggestion {
            token_id: token.id.clone(),
            token_name: token.name.clone(),
            token_value: token.value.to_string(),
            confidence,
        });
    }
    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.token_name.cmp(&b.token_name))
    });
    out.truncate(max);
    out
}

/// Same ranking with the compiled default threshold and cap.
pub fn suggest_tokens_default(value: &str, tokens: &[DesignToken]) -> Vec<TokenSuggestion> {
    suggest_tokens(value, tokens, DEFAULT_MIN_SUGGESTION_CONFIDENCE, DEFAULT_MAX_SUGGESTIONS)
}

fn value_confidence(value: &str, token: &DesignToken) -> Option<f64> {
    match &token.value {
        TokenValue::Color { hex } => {
            let candidate = normalize_color(value)?;
            if candidate == *hex {
                return Some(1.0);
            }
            color_similarity(&candidate, hex)
        }
        TokenValue::Spacing { value: amount, unit } => {
            let candidate_px = normalize_spacing(value)?;
            let token_px = if matches!(unit.as_str(), "rem" | "em") {
                amount * REM_BASE_PX
            } else {
                *amount
            };
            Some(spacing_similarity(candidate_px, token_px))
        }
        TokenValue::Raw { text } => value.trim().eq_ignore_ascii_case(text.trim()).then_some(1.0),
    }
}
