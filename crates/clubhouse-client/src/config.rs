// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the Clubhouse client.

use std::net::IpAddr;
use std::time::Duration;

use clubhouse_secret::SecretString;
use reqwest::Url;
use tracing::warn;

use crate::error::ClubhouseError;

pub const DEFAULT_BASE_URL: &str = "https://api.clubhouse.io/api/v3";

/// Client configuration.
///
/// The API token and webhook secret are stored as [`SecretString`] so they
/// never show up in `Debug` output or logs. A config is immutable once passed
/// to [`ClubhouseClient`](crate::ClubhouseClient).
#[derive(Clone)]
pub struct ClubhouseConfig {
	/// Sent as `Clubhouse-Token` on every API call
	token: SecretString,

	/// Key for webhook signature verification
	webhook_secret: Option<SecretString>,

	/// API root, e.g. `https://api.clubhouse.io/api/v3`
	base_url: Url,

	/// Per-request timeout; `None` keeps the transport default
	timeout: Option<Duration>,
}

impl std::fmt::Debug for ClubhouseConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClubhouseConfig")
			.field("token", &self.token)
			.field("webhook_secret", &self.webhook_secret)
			.field("base_url", &self.base_url.as_str())
			.field("timeout", &self.timeout)
			.finish()
	}
}

impl ClubhouseConfig {
	/// Parse and check a base URL.
	///
	/// - must be a valid URL with a host
	/// - must use `https`, except for loopback hosts where `http` is allowed
	///   so tests can point at a local server
	fn validate_base_url(raw: &str) -> Result<Url, ClubhouseError> {
		let url = Url::parse(raw)
			.map_err(|e| ClubhouseError::Config(format!("Invalid Clubhouse base URL '{raw}': {e}")))?;

		let loopback = url
			.host_str()
			.map(is_loopback)
			.ok_or_else(|| ClubhouseError::Config("Clubhouse base URL must include a host".to_string()))?;

		let allowed = match url.scheme() {
			"https" => true,
			"http" => loopback,
			_ => false,
		};
		if !allowed {
			return Err(ClubhouseError::Config(format!(
				"Clubhouse base URL must use https, got '{}'",
				url.scheme()
			)));
		}

		Ok(url)
	}

	/// Create a configuration for the public Clubhouse API.
	pub fn new(token: impl Into<SecretString>) -> Self {
		Self {
			token: token.into(),
			webhook_secret: None,
			base_url: Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
			timeout: None,
		}
	}

	/// Set a custom base URL.
	///
	/// If the URL fails validation, logs a warning and keeps the previous
	/// value. Use [`try_with_base_url`](Self::try_with_base_url) to get the
	/// error instead.
	pub fn with_base_url(self, url: impl Into<String>) -> Self {
		let url_str = url.into();
		match Self::validate_base_url(&url_str) {
			Ok(validated) => Self {
				base_url: validated,
				..self
			},
			Err(e) => {
				warn!(error = %e, url = %url_str, "Invalid base_url in with_base_url, keeping previous value");
				self
			}
		}
	}

	pub fn try_with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, ClubhouseError> {
		self.base_url = Self::validate_base_url(url.as_ref())?;
		Ok(self)
	}

	pub fn with_webhook_secret(mut self, secret: impl Into<SecretString>) -> Self {
		self.webhook_secret = Some(secret.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub(crate) fn token(&self) -> &str {
		self.token.expose()
	}

	/// The webhook secret, if one is set. An empty secret counts as unset.
	pub(crate) fn webhook_secret(&self) -> Option<&SecretString> {
		self.webhook_secret.as_ref().filter(|s| !s.is_empty())
	}

	pub fn has_webhook_secret(&self) -> bool {
		self.webhook_secret().is_some()
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}

	/// `{base_url}/epics`, without a doubled slash.
	pub fn epics_url(&self) -> String {
		format!("{}/epics", self.base_url.as_str().trim_end_matches('/'))
	}
}

fn is_loopback(host: &str) -> bool {
	if host.eq_ignore_ascii_case("localhost") {
		return true;
	}
	host
		.trim_start_matches('[')
		.trim_end_matches(']')
		.parse::<IpAddr>()
		.map(|ip| ip.is_loopback())
		.unwrap_or(false)
}
