// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Clubhouse client.

use thiserror::Error;

/// Errors returned by every [`ClubhouseApi`](crate::ClubhouseApi) operation.
#[derive(Debug, Error)]
pub enum ClubhouseError {
	/// The outbound JSON body could not be serialized.
	#[error("could not create epic body: {0}")]
	Encode(#[source] serde_json::Error),

	/// The HTTP request could not be completed (DNS, connect, timeout).
	#[error("could not send request to the Clubhouse API: {0}")]
	Transport(#[from] reqwest::Error),

	/// Clubhouse answered with something other than the expected status.
	#[error("Clubhouse returned status {status}: {message}")]
	Api { status: u16, message: String },

	/// The webhook body was not a valid webhook document.
	#[error("could not parse webhook body: {0}")]
	Decode(#[source] serde_json::Error),

	/// The supplied webhook signature does not match the payload.
	#[error("signature mismatch")]
	SignatureMismatch,

	/// Signature verification was requested but no webhook secret is set.
	#[error("webhook secret is not configured")]
	MissingWebhookSecret,

	#[error("configuration error: {0}")]
	Config(String),
}

impl ClubhouseError {
	pub fn api_error(status: u16, message: impl Into<String>) -> Self {
		Self::Api {
			status,
			message: message.into(),
		}
	}

	/// The HTTP status carried by an [`ClubhouseError::Api`] error.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			Self::Transport(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	pub fn is_signature_mismatch(&self) -> bool {
		matches!(self, Self::SignatureMismatch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_error_carries_status() {
		let err = ClubhouseError::api_error(401, "Unauthorized");
		assert_eq!(err.status(), Some(401));
		assert_eq!(err.to_string(), "Clubhouse returned status 401: Unauthorized");
	}

	#[test]
	fn signature_mismatch_is_distinguishable() {
		assert!(ClubhouseError::SignatureMismatch.is_signature_mismatch());
		assert!(!ClubhouseError::MissingWebhookSecret.is_signature_mismatch());
		assert!(!ClubhouseError::api_error(400, "").is_signature_mismatch());
		assert_eq!(ClubhouseError::SignatureMismatch.status(), None);
	}

	#[test]
	fn decode_error_wraps_cause() {
		let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let expected = format!("could not parse webhook body: {cause}");

		let err = ClubhouseError::Decode(cause);
		assert_eq!(err.to_string(), expected);
		assert!(std::error::Error::source(&err).is_some());
	}
}
