// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::io::Read;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::ClubhouseApi;
use crate::epic::Epic;
use crate::error::ClubhouseError;
use crate::webhook::Webhook;

/// Status code carried by the injected create_epic failure.
pub const MOCK_ERROR_STATUS: u16 = 500;

/// Recorded call to the mock client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
	CreateEpic { name: String, description: String },
	ParseWebhook,
	VerifySignature { signature: String },
}

/// Test double for code that depends on [`ClubhouseApi`].
///
/// Returns the canned values below, or an error when the matching flag is
/// set. No network access and no real decoding or hashing happen.
#[derive(Clone, Default)]
pub struct MockClubhouseClient {
	/// Returned from create_epic.
	pub epic: Epic,
	/// Returned from parse_webhook.
	pub webhook: Webhook,
	/// create_epic fails with an API error.
	pub create_epic_error: bool,
	/// parse_webhook fails with a decode error.
	pub parse_webhook_error: bool,
	/// verify_signature fails with a signature mismatch.
	pub verify_signature_error: bool,
	/// Track calls for verification.
	pub calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockClubhouseClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_epic(mut self, epic: Epic) -> Self {
		self.epic = epic;
		self
	}

	pub fn with_webhook(mut self, webhook: Webhook) -> Self {
		self.webhook = webhook;
		self
	}

	pub fn with_create_epic_error(mut self) -> Self {
		self.create_epic_error = true;
		self
	}

	pub fn with_parse_webhook_error(mut self) -> Self {
		self.parse_webhook_error = true;
		self
	}

	pub fn with_verify_signature_error(mut self) -> Self {
		self.verify_signature_error = true;
		self
	}

	/// Returns the recorded calls.
	pub fn get_calls(&self) -> Vec<MockCall> {
		self.calls.lock().unwrap().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.lock().unwrap().clear();
	}

	fn record(&self, call: MockCall) {
		self.calls.lock().unwrap().push(call);
	}
}

#[async_trait]
impl ClubhouseApi for MockClubhouseClient {
	async fn create_epic(&self, name: &str, description: &str) -> Result<Epic, ClubhouseError> {
		self.record(MockCall::CreateEpic {
			name: name.to_string(),
			description: description.to_string(),
		});
		if self.create_epic_error {
			return Err(ClubhouseError::api_error(MOCK_ERROR_STATUS, "mock failure"));
		}
		Ok(self.epic.clone())
	}

	fn parse_webhook(&self, body: Box<dyn Read + Send + '_>) -> Result<Webhook, ClubhouseError> {
		drop(body);
		self.record(MockCall::ParseWebhook);
		if self.parse_webhook_error {
			let cause = <serde_json::Error as serde::de::Error>::custom("mock failure");
			return Err(ClubhouseError::Decode(cause));
		}
		Ok(self.webhook.clone())
	}

	fn verify_signature(&self, signature: &str, _body: &[u8]) -> Result<(), ClubhouseError> {
		self.record(MockCall::VerifySignature {
			signature: signature.to_string(),
		});
		if self.verify_signature_error {
			return Err(ClubhouseError::SignatureMismatch);
		}
		Ok(())
	}
}
