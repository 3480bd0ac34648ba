//! Vector operations for working with embedding results.

use crate::error::Error;
use crate::Result;

pub type Vector = Vec<f32>;

pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::invalid_request(format!(
            "vector dimensions must match: {} != {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

pub fn normalize_vector(v: &[f32]) -> Vector {
    let mag = magnitude(v);
    if mag == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / mag).collect()
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    let dot = dot_product(a, b)?;
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / (mag_a * mag_b))
}

#[derive(Debug, Clone)]
pub struct SimilarityResult {
    pub index: usize,
    pub score: f32,
}

/// Rank `candidates` against `query` by cosine similarity, best first.
/// Candidates with mismatched dimensions are skipped.
pub fn rank_by_similarity(query: &[f32], candidates: &[Vec<f32>]) -> Vec<SimilarityResult> {
    let mut scores: Vec<SimilarityResult> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, c)| {
            cosine_similarity(query, c)
                .ok()
                .map(|score| SimilarityResult { index, score })
        })
        .collect();
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn dot_product_basic() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!(approx_eq(dot_product(&a, &b).unwrap(), 32.0));
    }

    #[test]
    fn dot_product_dimension_mismatch() {
        assert!(dot_product(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn normalize_produces_unit_magnitude() {
        let normalized = normalize_vector(&[3.0, 4.0]);
        assert!(approx_eq(normalized[0], 0.6));
        assert!(approx_eq(normalized[1], 0.8));
        assert!(approx_eq(magnitude(&normalized), 1.0));
    }

    #[test]
    fn normalize_zero_vector_is_identity() {
        let v = vec![0.0, 0.0];
        assert_eq!(normalize_vector(&v), v);
    }

    #[test]
    fn cosine_similarity_extremes() {
        assert!(approx_eq(
            cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]).unwrap(),
            1.0
        ));
        assert!(approx_eq(
            cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap(),
            -1.0
        ));
        assert!(approx_eq(
            cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(),
            0.0
        ));
    }

    #[test]
    fn zero_vector_similarity_is_zero() {
        assert!(approx_eq(
            cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(),
            0.0
        ));
    }

    #[test]
    fn ranking_orders_best_first_and_skips_mismatched() {
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0, 0.0], // wrong dimension, skipped
            vec![0.7, 0.7],
        ];
        let ranked = rank_by_similarity(&query, &candidates);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].index, 1);
        assert!(approx_eq(ranked[0].score, 1.0));
        assert_eq!(ranked[1].index, 3);
    }
}
