//! Token comparison result shapes.

use serde::{Deserialize, Serialize};

use super::token::DesignToken;

/// How a design token was paired with a code token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// Names identical.
    Exact,
    /// Values identical under a different name.
    Value,
    /// Names similar after normalization, values differ.
    Fuzzy,
}

/// One matched pair of tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMatch {
    pub design: DesignToken,
    pub code: DesignToken,
    pub match_type: MatchType,
    /// True when the pair's values differ.
    pub value_drift: bool,
}

/// Tallies for one comparison run.
///
/// Exact accounting holds: `matched + missing == design_total` and
/// `matched + orphans == code_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComparisonSummary {
    pub design_total: usize,
    pub code_total: usize,
    pub matched: usize,
    pub matched_with_drift: usize,
    pub missing: usize,
    pub orphans: usize,
}

/// Output of comparing a design-token set against code-declared tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TokenComparisonResult {
    pub matches: Vec<TokenMatch>,
    /// Design tokens with no code counterpart.
    pub missing: Vec<DesignToken>,
    /// Code tokens with no design counterpart.
    pub orphans: Vec<DesignToken>,
    pub summary: ComparisonSummary,
}

impl TokenComparisonResult {
    /// Recount the summary from the result's own lists.
    pub fn tally(&mut self) {
        self.summary.matched = self.matches.len();
        self.summary.matched_with_drift = self.matches.iter().filter(|m| m.value_drift).count();
        self.summary.missing = self.missing.len();
        self.summary.orphans = self.orphans.len();
        self.summary.design_total = self.summary.matched + self.summary.missing;
        self.summary.code_total = self.summary.matched + self.summary.orphans;
    }
}
