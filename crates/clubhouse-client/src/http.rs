// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::ClubhouseError;

/// Returns `clubhouse-client/{version}`.
pub fn user_agent() -> String {
	format!("clubhouse-client/{}", env!("CARGO_PKG_VERSION"))
}

/// A client builder preset with [`user_agent`].
///
/// Use this when the embedding application needs its own TLS roots or proxy
/// settings, then hand the result to
/// [`ClubhouseClient::with_http_client`](crate::ClubhouseClient::with_http_client).
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Build the default transport. `None` leaves reqwest's default timeout.
pub(crate) fn new_client(timeout: Option<Duration>) -> Result<Client, ClubhouseError> {
	let mut builder = builder();
	if let Some(timeout) = timeout {
		builder = builder.timeout(timeout);
	}
	builder
		.build()
		.map_err(|e| ClubhouseError::Config(format!("Failed to create HTTP client: {e}")))
}
