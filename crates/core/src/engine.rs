//! Total computation and verdict labels.

use std::collections::BTreeMap;

use crate::rubric::Rubric;

/// Score submission keyed by criterion key.
pub type ScoreSheet = BTreeMap<String, i64>;

/// The four recommendation labels, lowest tier first.
pub const VERDICTS: [&str; 4] = [
    "Có lẽ không nên chơi.",
    "Có thể thử.",
    "Rất nên chơi.",
    "Chắc chắn là lựa chọn tốt.",
];

/// Sum the submitted scores over the rubric's criteria, in criteria order.
///
/// A key absent from the submission counts as 0. Values outside 0-5 are
/// summed as-is; the range is a form-level constraint, not enforced here.
pub fn compute_total(scores: &ScoreSheet, rubric: &Rubric) -> i64 {
    rubric
        .criteria()
        .iter()
        .map(|criterion| scores.get(&criterion.key).copied().unwrap_or(0))
        .sum()
}

/// Classify a total into one of the four verdict tiers using the rubric's
/// size-proportional breakpoints.
pub fn verdict(total: i64, rubric: &Rubric) -> &'static str {
    let [b1, b2, b3] = rubric.breakpoints();
    if total <= b1 {
        VERDICTS[0]
    } else if total <= b2 {
        VERDICTS[1]
    } else if total <= b3 {
        VERDICTS[2]
    } else {
        VERDICTS[3]
    }
}
