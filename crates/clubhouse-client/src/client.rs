// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Clubhouse API client implementation.

use std::io::Read;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument};

use crate::config::ClubhouseConfig;
use crate::epic::Epic;
use crate::error::ClubhouseError;
use crate::signature::check_signature;
use crate::webhook::{parse_webhook, Webhook};

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "Clubhouse-Token";

/// Longest error body kept in [`ClubhouseError::Api`], in characters.
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 1024;

/// The operations this crate offers, abstracted for testability.
///
/// [`ClubhouseClient`] talks to the real API; [`MockClubhouseClient`]
/// returns canned results.
///
/// [`MockClubhouseClient`]: crate::MockClubhouseClient
#[async_trait]
pub trait ClubhouseApi: Send + Sync {
	/// Create an Epic. Succeeds only when Clubhouse answers `201 Created`.
	async fn create_epic(&self, name: &str, description: &str) -> Result<Epic, ClubhouseError>;

	/// Decode a webhook body. The reader is consumed and dropped.
	fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> Result<Webhook, ClubhouseError>;

	/// Verify a webhook body against the value of its signature header.
	fn verify_signature(&self, signature: &str, body: &[u8]) -> Result<(), ClubhouseError>;
}

/// Client for the Clubhouse REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ClubhouseClient {
	http_client: Client,
	config: ClubhouseConfig,
}

impl ClubhouseClient {
	pub fn new(config: ClubhouseConfig) -> Result<Self, ClubhouseError> {
		let http_client = crate::http::new_client(config.timeout())?;
		Ok(Self::with_http_client(config, http_client))
	}

	/// Use a caller-built transport (custom TLS roots, proxies).
	///
	/// The configured timeout is not applied to an injected client.
	pub fn with_http_client(config: ClubhouseConfig, http_client: Client) -> Self {
		info!(base_url = %config.base_url(), "Created Clubhouse client");
		Self {
			http_client,
			config,
		}
	}

	pub fn config(&self) -> &ClubhouseConfig {
		&self.config
	}
}

#[async_trait]
impl ClubhouseApi for ClubhouseClient {
	#[instrument(skip(self, description))]
	async fn create_epic(&self, name: &str, description: &str) -> Result<Epic, ClubhouseError> {
		let epic = Epic::new(name, description);

		let body = serde_json::to_vec(&epic).map_err(|e| {
			error!(error = %e, "Failed to serialize epic");
			ClubhouseError::Encode(e)
		})?;

		let url = self.config.epics_url();
		debug!(url = %url, "Sending create epic request to Clubhouse");

		let response = self
			.http_client
			.post(&url)
			.header(TOKEN_HEADER, self.config.token())
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					error!(error = %e, "Create epic request timed out");
				} else {
					error!(error = %e, "Network error during create epic request");
				}
				ClubhouseError::Transport(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from Clubhouse");

		if status != StatusCode::CREATED {
			let status_code = status.as_u16();
			let message = truncate_body(response.text().await.unwrap_or_default());
			error!(status = status_code, body = %message, "Clubhouse rejected create epic");
			return Err(ClubhouseError::Api {
				status: status_code,
				message,
			});
		}

		info!("Created epic");
		Ok(epic)
	}

	fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> Result<Webhook, ClubhouseError> {
		parse_webhook(body)
	}

	fn verify_signature(&self, signature: &str, body: &[u8]) -> Result<(), ClubhouseError> {
		// Empty secrets are filtered out by the config.
		let secret = self.config.webhook_secret().ok_or_else(|| {
			error!("Webhook signature check requested without a webhook secret");
			ClubhouseError::MissingWebhookSecret
		})?;
		check_signature(secret.expose_bytes(), signature, body)
	}
}

/// Cut an error body down to [`MAX_ERROR_BODY_CHARS`] on a char boundary.
fn truncate_body(mut body: String) -> String {
	if let Some((idx, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
		body.truncate(idx);
		body.push_str("...");
	}
	body
}
