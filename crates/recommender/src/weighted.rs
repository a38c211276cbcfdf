//! Similarity-weighted average shared by both scorers.

/// `sum(sim * rating) / sum(sim)` over the given pairs.
///
/// NaN similarities (including similarities missing from a table) are skipped
/// in both sums. Returns `None` if there are no pairs at all or if the
/// denominator is exactly zero.
pub(crate) fn weighted_average(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<f64> {
    let mut seen = false;
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for (similarity, rating) in pairs {
        seen = true;
        if similarity.is_nan() || rating.is_nan() {
            continue;
        }
        numerator += similarity * rating;
        denominator += similarity;
    }

    if !seen || denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
