// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Clubhouse API client.
//!
//! This crate covers the small part of the Clubhouse API a workflow bot
//! needs:
//!
//! - creating Epics (`POST /epics`)
//! - decoding inbound webhook payloads
//! - verifying webhook HMAC-SHA256 signatures
//!
//! All three sit behind the [`ClubhouseApi`] trait, implemented by
//! [`ClubhouseClient`] for the real service and by [`MockClubhouseClient`]
//! for tests.
//!
//! ```no_run
//! use clubhouse_client::{ClubhouseApi, ClubhouseClient, ClubhouseConfig};
//!
//! # async fn run() -> Result<(), clubhouse_client::ClubhouseError> {
//! let config = ClubhouseConfig::new("api-token").with_webhook_secret("webhook-secret");
//! let client = ClubhouseClient::new(config)?;
//!
//! let epic = client.create_epic("Q3 launch", "Everything for the launch").await?;
//! println!("created {}", epic.name);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod client;
pub mod config;
pub mod epic;
pub mod error;
pub mod http;
pub mod mock;
pub mod signature;
pub mod webhook;

pub use client::{ClubhouseApi, ClubhouseClient, TOKEN_HEADER};
pub use clubhouse_secret::{Secret, SecretString};
pub use config::{ClubhouseConfig, DEFAULT_BASE_URL};
pub use epic::{Epic, EpicState};
pub use error::ClubhouseError;
pub use mock::{MockCall, MockClubhouseClient};
pub use signature::{compute_signature, verify_signature, SIGNATURE_HEADER};
pub use webhook::{parse_webhook, Action, Changes, EntityType, StateChange, Webhook, WebhookAction};
