//! One-time recovery codes.

use rand::Rng;

use crate::digest::digest_secret;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// A freshly generated recovery code.
///
/// Shown to the user once and then dropped; only its digest is stored.
/// `Debug` does not reveal the digits.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveryCode(String);

impl RecoveryCode {
	/// Samples a 6-digit code uniformly from `100000..=999999`.
	pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self(rng.gen_range(CODE_MIN..=CODE_MAX).to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn digest(&self) -> String {
		digest_secret(&self.0)
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl std::fmt::Debug for RecoveryCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("RecoveryCode(******)")
	}
}

impl std::fmt::Display for RecoveryCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn codes_are_six_digits() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..500 {
			let code = RecoveryCode::generate(&mut rng);
			assert_eq!(code.as_str().len(), 6);
			assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
			assert_ne!(code.as_str().as_bytes()[0], b'0');
		}
	}

	#[test]
	fn debug_hides_digits() {
		let mut rng = StdRng::seed_from_u64(1);
		let code = RecoveryCode::generate(&mut rng);
		assert!(!format!("{code:?}").contains(code.as_str()));
		assert_eq!(code.digest(), digest_secret(code.as_str()));
	}
}
