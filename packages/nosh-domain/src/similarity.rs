/// Cosine similarity between two vectors of equal length.
///
/// Returns `0.0` on a length mismatch or when either vector has zero
/// magnitude; embeddings from the same model never legitimately disagree on
/// length, so a mismatch is a caller bug that should rank last rather than
/// poison the whole scan.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
	if a.len() != b.len() || a.is_empty() {
		return 0.0;
	}

	let dot = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum::<f32>();
	let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

	if norm_a == 0.0 || norm_b == 0.0 {
		return 0.0;
	}

	dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_vectors_score_one() {
		let v = [0.5_f32, 0.25, 0.75];

		assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
	}

	#[test]
	fn orthogonal_vectors_score_zero() {
		assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
	}

	#[test]
	fn opposite_vectors_score_negative_one() {
		assert!((cosine(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
	}

	#[test]
	fn mismatched_lengths_score_zero() {
		assert_eq!(cosine(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
	}

	#[test]
	fn zero_vector_scores_zero() {
		assert_eq!(cosine(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
	}
}
