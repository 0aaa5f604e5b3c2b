//! Design-vs-code token comparison.
//!
//! Matching runs in three passes, each consuming its pairs before the
//! next: exact names, then identical values under different names, then
//! fuzzy names. Leftover design tokens are missing, leftover code
//! tokens are orphans, and the summary is an exact accounting of both
//! input sets.

use tokendrift_core::constants::FUZZY_NAME_THRESHOLD;
use tokendrift_core::errors::CompareError;
use tokendrift_core::types::collections::FxHashMap;
use tokendrift_core::types::compare::{MatchType, TokenComparisonResult, TokenMatch};
use tokendrift_core::types::token::{DesignToken, TokenValue};

use super::name_similarity::name_similarity;

/// Tuning knobs for token comparison.
#[derive(Debug, Clone, Copy)]
pub struct TokenCompareOptions {
    /// Minimum normalized-name similarity for a fuzzy pair.
    pub fuzzy_threshold: f64,
}

impl Default for TokenCompareOptions {
    fn default() -> Self {
        Self { fuzzy_threshold: FUZZY_NAME_THRESHOLD }
    }
}

/// Compare a design token set against code-declared tokens with the
/// default options.
pub fn compare_tokens(
    design: &[DesignToken],
    code: &[DesignToken],
) -> Result<TokenComparisonResult, CompareError> {
    compare_tokens_with(design, code, TokenCompareOptions::default())
}

pub fn compare_tokens_with(
    design: &[DesignToken],
    code: &[DesignToken],
    options: TokenCompareOptions,
) -> Result<TokenComparisonResult, CompareError> {
    if !(0.0..=1.0).contains(&options.fuzzy_threshold) {
        return Err(CompareError::InvalidThreshold {
            name: "fuzzy",
            value: options.fuzzy_threshold,
        });
    }
    for token in design.iter().chain(code) {
        validate_value(token)?;
    }

    let mut code_taken = vec![false; code.len()];
    let mut design_match: Vec<Option<(usize, MatchType)>> = vec![None; design.len()];

    // Pass 1: exact names.
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, t) in code.iter().enumerate() {
        by_name.entry(t.name.as_str()).or_insert(i);
    }
    for (d_idx, d) in design.iter().enumerate() {
        if let Some(&c_idx) = by_name.get(d.name.as_str()) {
            if !code_taken[c_idx] {
                code_taken[c_idx] = true;
                design_match[d_idx] = Some((c_idx, MatchType::Exact));
            }
        }
    }

    // Pass 2: identical values under different names.
    let mut by_fingerprint: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (i, t) in code.iter().enumerate() {
        if !code_taken[i] {
            by_fingerprint.entry(t.value.fingerprint()).or_default().push(i);
        }
    }
    for (d_idx, d) in design.iter().enumerate() {
        if design_match[d_idx].is_some() {
            continue;
        }
        if let Some(candidates) = by_fingerprint.get(&d.value.fingerprint()) {
            if let Some(&c_idx) = candidates.iter().find(|&&i| !code_taken[i]) {
                code_taken[c_idx] = true;
                design_match[d_idx] = Some((c_idx, MatchType::Value));
            }
        }
    }

    // Pass 3: fuzzy names. Equal-value pairs were consumed above, so
    // these are renames with drifted values. Ties go to the lowest
    // code-token name.
    for (d_idx, d) in design.iter().enumerate() {
        if design_match[d_idx].is_some() {
            continue;
        }
        let mut best: Option<(f64, usize)> = None;
        for (c_idx, c) in code.iter().enumerate() {
            if code_taken[c_idx] {
                continue;
            }
            let similarity = name_similarity(&d.name, &c.name);
            if similarity < options.fuzzy_threshold {
                continue;
            }
            let better = match best {
                None => true,
                Some((s, b_idx)) => {
                    similarity > s || (similarity == s && c.name < code[b_idx].name)
                }
            };
            if better {
                best = Some((similarity, c_idx));
            }
        }
        if let Some((_, c_idx)) = best {
            code_taken[c_idx] = true;
            design_match[d_idx] = Some((c_idx, MatchType::Fuzzy));
        }
    }

    let mut result = TokenComparisonResult::default();
    for (d_idx, d) in design.iter().enumerate() {
        match design_match[d_idx] {
            Some((c_idx, match_type)) => {
                let c = &code[c_idx];
                result.matches.push(TokenMatch {
                    design: d.clone(),
                    code: c.clone(),
                    match_type,
                    value_drift: d.value.fingerprint() != c.value.fingerprint(),
                });
            }
            None => result.missing.push(d.clone()),
        }
    }
    for (c_idx, c) in code.iter().enumerate() {
        if !code_taken[c_idx] {
            result.orphans.push(c.clone());
        }
    }
    result.tally();
    Ok(result)
}

fn validate_value(token: &DesignToken) -> Result<(), CompareError> {
    match &token.value {
        TokenValue::Color { hex } if hex.is_empty() => Err(CompareError::MalformedValue {
            token: token.name.clone(),
            detail: "empty color hex".to_string(),
        }),
        TokenValue::Spacing { value, .. } if !value.is_finite() => {
            Err(CompareError::MalformedValue {
                token: token.name.clone(),
                detail: format!("non-finite spacing {value}"),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokendrift_core::types::token::{TokenCategory, TokenSource};

    fn src() -> TokenSource {
        TokenSource { path: "design/tokens.json".into(), line: 1, format: "json".into() }
    }

    fn color(name: &str, hex: &str) -> DesignToken {
        DesignToken::new(
            name,
            TokenCategory::Color,
            TokenValue::Color { hex: hex.into() },
            hex,
            src(),
        )
    }

    fn spacing(name: &str, value: f64, unit: &str) -> DesignToken {
        DesignToken::new(
            name,
            TokenCategory::Spacing,
            TokenValue::Spacing { value, unit: unit.into() },
            format!("{value}{unit}"),
            src(),
        )
    }

    #[test]
    fn exact_name_match_reports_value_drift() {
        let design = vec![color("--color-primary", "#ff0000")];
        let code = vec![color("--color-primary", "#ee0000")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].match_type, MatchType::Exact);
        assert!(result.matches[0].value_drift);
        assert_eq!(result.summary.matched_with_drift, 1);
    }

    #[test]
    fn equal_value_matches_under_a_different_name() {
        let design = vec![color("brand.blue", "#0055ff")];
        let code = vec![color("--primary-blue", "#0055ff")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.matches[0].match_type, MatchType::Value);
        assert!(!result.matches[0].value_drift);
    }

    #[test]
    fn rem_and_px_values_fingerprint_equal() {
        let design = vec![spacing("spacing.md", 1.0, "rem")];
        let code = vec![spacing("--space-md", 16.0, "px")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.matches[0].match_type, MatchType::Value);
        assert!(!result.matches[0].value_drift);
    }

    #[test]
    fn fuzzy_name_pairs_drifted_values() {
        let design = vec![color("--color-primary", "#ff0000")];
        let code = vec![color("--color-primery", "#cc0000")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.matches[0].match_type, MatchType::Fuzzy);
        assert!(result.matches[0].value_drift);
    }

    #[test]
    fn exact_name_wins_over_equal_value() {
        let design = vec![color("--primary", "#ff0000")];
        let code = vec![color("--primary", "#00ff00"), color("--primarx", "#ff0000")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.matches[0].match_type, MatchType::Exact);
        assert_eq!(result.matches[0].code.name, "--primary");
        assert_eq!(result.orphans.len(), 1);
        assert_eq!(result.orphans[0].name, "--primarx");
    }

    #[test]
    fn leftovers_account_exactly() {
        let design = vec![color("--a", "#111111"), color("--b", "#222222")];
        let code = vec![color("--a", "#111111"), color("--zebra", "#333333")];
        let result = compare_tokens(&design, &code).unwrap();
        assert_eq!(result.summary.matched, 1);
        assert_eq!(result.summary.missing, 1);
        assert_eq!(result.summary.orphans, 1);
        assert_eq!(result.summary.matched + result.summary.missing, result.summary.design_total);
        assert_eq!(result.summary.matched + result.summary.orphans, result.summary.code_total);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = compare_tokens_with(
            &[],
            &[],
            TokenCompareOptions { fuzzy_threshold: 1.5 },
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::InvalidThreshold { .. }));
    }

    #[test]
    fn malformed_values_fail_loudly() {
        let empty_hex = vec![color("--broken", "")];
        let err = compare_tokens(&empty_hex, &[]).unwrap_err();
        assert!(matches!(err, CompareError::MalformedValue { .. }));

        let nan = vec![spacing("--nan", f64::NAN, "px")];
        let err = compare_tokens(&[], &nan).unwrap_err();
        assert!(matches!(err, CompareError::MalformedValue { .. }));
    }
}
