//! Dense vector arithmetic over `f32` slices.

/// Euclidean length.
pub fn magnitude(v: &[f32]) -> f32 {
    dot_product(v, v).sqrt()
}

/// Scale `v` in place to unit length. A zero vector stays zero.
pub fn normalize_l2(v: &mut [f32]) {
    let len = magnitude(v);
    if len > 0.0 {
        v.iter_mut().for_each(|x| *x /= len);
    }
}

/// Sum of pairwise products. Extra trailing elements of the longer slice
/// are ignored.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// Anything degenerate scores `0.0`: unequal lengths, empty slices, or a
/// zero-magnitude side.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 {
        0.0
    } else {
        dot_product(a, b) / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_normalize_three_four_five() {
        let mut v = [3.0, 4.0];
        normalize_l2(&mut v);
        assert!((v[0] - 0.6).abs() < EPS && (v[1] - 0.8).abs() < EPS);
        assert!((magnitude(&v) - 1.0).abs() < EPS);

        let mut zero = [0.0; 4];
        normalize_l2(&mut zero);
        assert_eq!(zero, [0.0; 4]);
    }

    #[test]
    fn test_cosine_directions() {
        let east = [2.0, 0.0];
        assert!((cosine_similarity(&east, &[5.0, 0.0]) - 1.0).abs() < EPS);
        assert!(cosine_similarity(&east, &[0.0, 3.0]).abs() < EPS);
        assert!((cosine_similarity(&east, &[-1.0, 0.0]) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_degenerate_inputs_score_zero() {
        let leaf = [0.2, 0.5, 0.1];
        assert_eq!(cosine_similarity(&[0.0; 3], &leaf), 0.0);
        assert_eq!(cosine_similarity(&leaf, &[0.2, 0.5]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
