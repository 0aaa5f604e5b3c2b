//! Property tests for the normalization, comparison, and suggestion
//! invariants the drift engine leans on.

use proptest::prelude::*;

use tokendrift_analysis::compare::{compare_tokens, name_similarity, suggest_tokens};
use tokendrift_analysis::drift::canonical_key;
use tokendrift_analysis::normalize::{
    color_similarity, normalize_color, normalize_spacing, spacing_similarity,
};
use tokendrift_core::types::token::{DesignToken, TokenCategory, TokenSource, TokenValue};

fn color_token(name: &str, hex: &str) -> DesignToken {
    DesignToken::new(
        name,
        TokenCategory::Color,
        TokenValue::Color { hex: hex.into() },
        hex,
        TokenSource { path: "tokens.json".into(), line: 1, format: "json".into() },
    )
}

// Value normalization.
proptest! {
    #[test]
    fn normalized_colors_renormalize_to_themselves(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
    ) {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        let normalized = normalize_color(&hex);
        prop_assert_eq!(normalized.as_deref(), Some(hex.as_str()));
    }

    #[test]
    fn color_normalization_is_idempotent(s in ".{0,24}") {
        if let Some(first) = normalize_color(&s) {
            prop_assert_eq!(normalize_color(&first), Some(first.clone()));
        }
    }

    #[test]
    fn color_self_similarity_is_one(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        prop_assert_eq!(color_similarity(&hex, &hex), Some(1.0));
    }

    #[test]
    fn color_similarity_is_symmetric_and_bounded(a in "#[0-9a-f]{6}", b in "#[0-9a-f]{6}") {
        let forward = color_similarity(&a, &b);
        prop_assert_eq!(forward, color_similarity(&b, &a));
        let value = forward.unwrap();
        prop_assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn spacing_parsing_never_panics(s in ".{0,40}") {
        if let Some(px) = normalize_spacing(&s) {
            prop_assert!(px.is_finite());
        }
    }

    #[test]
    fn pixel_values_round_trip(v in -10_000.0f64..10_000.0) {
        prop_assert_eq!(normalize_spacing(&format!("{v}px")), Some(v));
    }

    #[test]
    fn spacing_similarity_is_bounded_and_symmetric(
        a in -10_000.0f64..10_000.0,
        b in -10_000.0f64..10_000.0,
    ) {
        let similarity = spacing_similarity(a, b);
        prop_assert!((0.0..=1.0).contains(&similarity));
        prop_assert_eq!(similarity, spacing_similarity(b, a));
    }
}

// Name matching.
proptest! {
    #[test]
    fn name_similarity_is_bounded_and_symmetric(
        a in "[A-Za-z0-9_.-]{0,24}",
        b in "[A-Za-z0-9_.-]{0,24}",
    ) {
        let forward = name_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert_eq!(forward, name_similarity(&b, &a));
    }

    #[test]
    fn every_name_matches_itself(s in "[A-Za-z][A-Za-z0-9_-]{0,24}") {
        prop_assert_eq!(name_similarity(&s, &s), 1.0);
    }

    #[test]
    fn canonical_keys_are_stable(s in "[A-Za-z][A-Za-z0-9-]{0,24}") {
        let key = canonical_key(&s);
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        prop_assert_eq!(canonical_key(&key), key);
    }
}

// Comparison accounting and suggestion ranking.
proptest! {
    #[test]
    fn comparison_accounts_for_every_token(
        design_ids in prop::collection::btree_set(0u8..24, 0..12),
        code_ids in prop::collection::btree_set(0u8..24, 0..12),
    ) {
        let palette = ["#ff0000", "#00ff00", "#0000ff", "#808080"];
        let design: Vec<DesignToken> = design_ids
            .iter()
            .map(|i| color_token(&format!("--token-{i}"), palette[*i as usize % palette.len()]))
            .collect();
        let code: Vec<DesignToken> = code_ids
            .iter()
            .map(|i| color_token(&format!("--token-{i}"), palette[*i as usize % palette.len()]))
            .collect();

        let result = compare_tokens(&design, &code).unwrap();
        prop_assert_eq!(result.summary.design_total, design.len());
        prop_assert_eq!(result.summary.code_total, code.len());
        prop_assert_eq!(result.summary.matched + result.summary.missing, design.len());
        prop_assert_eq!(result.summary.matched + result.summary.orphans, code.len());
        prop_assert_eq!(result.matches.len(), result.summary.matched);
        prop_assert!(result.summary.matched_with_drift <= result.summary.matched);

        // No code token may be consumed twice.
        let mut seen = std::collections::BTreeSet::new();
        for m in &result.matches {
            prop_assert!(seen.insert(m.code.name.clone()));
        }
    }

    #[test]
    fn suggestions_rank_by_confidence_then_name(
        channels in prop::collection::vec((any::<u8>(), any::<u8>(), any::<u8>()), 0..16),
        max in 0usize..6,
    ) {
        let tokens: Vec<DesignToken> = channels
            .iter()
            .enumerate()
            .map(|(i, (r, g, b))| {
                color_token(&format!("--c-{i:02}"), &format!("#{r:02x}{g:02x}{b:02x}"))
            })
            .collect();

        let suggestions = suggest_tokens("#808080", &tokens, 0.0, max);
        prop_assert_eq!(suggestions.len(), tokens.len().min(max));
        for s in &suggestions {
            prop_assert!((0.0..=1.0).contains(&s.confidence));
        }
        for pair in suggestions.windows(2) {
            let ordered = pair[0].confidence > pair[1].confidence
                || (pair[0].confidence == pair[1].confidence
                    && pair[0].token_name <= pair[1].token_name);
            prop_assert!(ordered, "{} before {}", pair[0].token_name, pair[1].token_name);
        }
    }
}
