/// Euclidean distance, or `None` when the dimensions differ.
///
/// Components are divided by the largest magnitude before squaring, so the
/// result only overflows when the true distance exceeds `f64::MAX`.
pub fn euclidean(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let scale = a.iter().chain(b).fold(0.0_f64, |m, x| m.max(x.abs()));
    if scale == 0.0 {
        return Some(0.0);
    }
    if !scale.is_finite() {
        return Some(sum_of_squares(a, b, 1.0).sqrt());
    }
    Some(scale * sum_of_squares(a, b, scale).sqrt())
}

fn sum_of_squares(a: &[f64], b: &[f64], scale: f64) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x / scale - y / scale;
            diff * diff
        })
        .sum()
}
