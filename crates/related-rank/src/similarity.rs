//! Cosine similarity between weight vectors.

use crate::WeightVector;

/// Cosine similarity of two weight vectors, in `[0, 1]`.
///
/// Keys missing from one vector count as weight 0. If either vector has zero norm the
/// similarity is exactly `0.0`.
pub fn cosine_similarity(a: &WeightVector, b: &WeightVector) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f32 = small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum();

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a * norm_b);
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Euclidean norm.
fn norm(v: &WeightVector) -> f32 {
    v.values().map(|w| w * w).sum::<f32>().sqrt()
}
