// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HMAC-SHA256 webhook signatures.
//!
//! Clubhouse signs each webhook body with the webhook secret and sends the
//! lowercase hex digest in the [`SIGNATURE_HEADER`] header. The HTTP server
//! receiving the webhook passes that header value and the raw body here.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::error::ClubhouseError;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "Payload-Signature";

/// Compute the hex-encoded HMAC-SHA256 of `body` keyed by `secret`.
pub fn compute_signature(secret: &[u8], body: &[u8]) -> String {
	let mut mac = <HmacSha256 as Mac>::new_from_slice(secret).expect("HMAC can take key of any size");
	mac.update(body);
	hex::encode(mac.finalize().into_bytes())
}

/// Check `signature` against the digest of `body`.
///
/// The comparison is exact (lowercase hex, no prefix) and runs in constant
/// time over the digest bytes.
pub fn verify_signature(secret: &[u8], signature: &str, body: &[u8]) -> bool {
	let expected = compute_signature(secret, body);
	expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// [`verify_signature`] as a `Result`, for the client facade.
pub(crate) fn check_signature(
	secret: &[u8],
	signature: &str,
	body: &[u8],
) -> Result<(), ClubhouseError> {
	if verify_signature(secret, signature, body) {
		debug!(body_len = body.len(), "Webhook signature verified");
		Ok(())
	} else {
		warn!(body_len = body.len(), "Webhook signature mismatch");
		Err(ClubhouseError::SignatureMismatch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const SECRET: &[u8] = b"testsecret";
	const BODY: &[u8] = b"ghi890";

	#[test]
	fn matches_independent_hmac() {
		let mut mac = <HmacSha256 as Mac>::new_from_slice(SECRET).unwrap();
		mac.update(BODY);
		let expected = hex::encode(mac.finalize().into_bytes());

		assert_eq!(compute_signature(SECRET, BODY), expected);
		assert_eq!(expected.len(), 64);
	}

	#[test]
	fn valid_signature_verifies() {
		let signature = compute_signature(SECRET, BODY);
		assert!(verify_signature(SECRET, &signature, BODY));
		assert!(check_signature(SECRET, &signature, BODY).is_ok());
	}

	#[test]
	fn signature_from_other_secret_is_mismatch() {
		let signature = compute_signature(b"bad secret", BODY);
		let err = check_signature(SECRET, &signature, BODY).unwrap_err();
		assert!(matches!(err, ClubhouseError::SignatureMismatch));
	}

	#[test]
	fn comparison_is_exact() {
		let signature = compute_signature(SECRET, BODY);

		assert!(!verify_signature(SECRET, &signature.to_uppercase(), BODY));
		assert!(!verify_signature(SECRET, &format!("sha256={signature}"), BODY));
		assert!(!verify_signature(SECRET, &signature[..63], BODY));
		assert!(!verify_signature(SECRET, "", BODY));
	}

	#[test]
	fn empty_body_and_empty_secret_still_sign() {
		let signature = compute_signature(b"", b"");
		assert_eq!(signature.len(), 64);
		assert!(verify_signature(b"", &signature, b""));
	}

	proptest! {
		#[test]
		fn prop_signature_is_deterministic(
			secret in proptest::collection::vec(any::<u8>(), 0..64),
			body in proptest::collection::vec(any::<u8>(), 0..512),
		) {
			let first = compute_signature(&secret, &body);
			let second = compute_signature(&secret, &body);
			prop_assert_eq!(&first, &second);
			prop_assert!(verify_signature(&secret, &first, &body));
		}

		#[test]
		fn prop_flipping_a_byte_changes_digest(
			secret in "[a-zA-Z0-9]{8,64}",
			body in proptest::collection::vec(any::<u8>(), 1..512),
			index in any::<usize>(),
		) {
			let signature = compute_signature(secret.as_bytes(), &body);

			let mut tampered = body.clone();
			let idx = index % tampered.len();
			tampered[idx] ^= 0x01;

			prop_assert_ne!(compute_signature(secret.as_bytes(), &tampered), signature.clone());
			prop_assert!(!verify_signature(secret.as_bytes(), &signature, &tampered));
		}

		#[test]
		fn prop_wrong_secret_fails(
			secret1 in "[a-zA-Z0-9]{8,64}",
			secret2 in "[a-zA-Z0-9]{8,64}",
			body in proptest::collection::vec(any::<u8>(), 1..256),
		) {
			prop_assume!(secret1 != secret2);
			let signature = compute_signature(secret1.as_bytes(), &body);
			prop_assert!(!verify_signature(secret2.as_bytes(), &signature, &body));
		}
	}
}
