// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Clubhouse webhook payloads.
//!
//! A webhook is a batch of independent change notifications:
//!
//! ```json
//! {
//!   "actions": [
//!     {
//!       "entity_type": "epic",
//!       "action": "update",
//!       "name": "Test Epic",
//!       "changes": { "state": { "old": "in progress", "new": "done" } }
//!     }
//!   ]
//! }
//! ```
//!
//! Fields this client does not model are ignored, missing or `null` fields
//! take their defaults, and unrecognized enum strings land in an `Unknown`
//! variant. Only the first JSON document in a body is read.

use std::io::{self, Read};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, error};

use crate::epic::EpicState;
use crate::error::ClubhouseError;

open_enum! {
	/// Kind of entity a webhook action refers to.
	pub enum EntityType {
		Epic => "epic",
	}
}

open_enum! {
	/// What happened to the entity.
	pub enum Action {
		Create => "create",
		Update => "update",
		Delete => "delete",
	}
}

/// One webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
	pub id: Option<String>,
	pub changed_at: Option<DateTime<Utc>>,
	pub version: Option<String>,
	pub member_id: Option<String>,
	pub primary_id: Option<i64>,
	/// Actions in payload order.
	#[serde(deserialize_with = "null_as_default")]
	pub actions: Vec<WebhookAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookAction {
	pub id: Option<i64>,
	#[serde(deserialize_with = "null_as_default")]
	pub entity_type: EntityType,
	#[serde(deserialize_with = "null_as_default")]
	pub action: Action,
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub changes: Changes,
}

/// Fields changed by an action. Only the Epic state is tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Changes {
	pub state: Option<StateChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateChange {
	pub old: Option<EpicState>,
	pub new: Option<EpicState>,
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl WebhookAction {
	/// The state the entity moved to, if this action changed it.
	pub fn new_state(&self) -> Option<&EpicState> {
		self.changes.state.as_ref().and_then(|s| s.new.as_ref())
	}

	pub fn is_epic_update(&self) -> bool {
		self.entity_type == EntityType::Epic && self.action == Action::Update
	}
}

impl Webhook {
	/// Decode a webhook from a body already held in memory.
	pub fn from_slice(body: &[u8]) -> Result<Self, ClubhouseError> {
		parse_webhook(body)
	}

	/// Epic update actions, in payload order.
	pub fn epic_updates(&self) -> impl Iterator<Item = &WebhookAction> {
		self.actions.iter().filter(|a| a.is_epic_update())
	}
}

/// Decode a webhook body, consuming the reader.
///
/// The reader is dropped before this returns, whether decoding succeeded or
/// not. Anything after the first JSON document is ignored, and a top-level
/// `null` decodes to an empty webhook.
pub fn parse_webhook<R: Read>(body: R) -> Result<Webhook, ClubhouseError> {
	let first = serde_json::Deserializer::from_reader(body)
		.into_iter::<Option<Webhook>>()
		.next()
		.unwrap_or_else(|| Err(serde_json::Error::io(io::ErrorKind::UnexpectedEof.into())));
	let webhook = first.map_err(decode_failed)?.unwrap_or_default();
	debug!(
		webhook_id = webhook.id.as_deref().unwrap_or(""),
		action_count = webhook.actions.len(),
		"Parsed webhook"
	);
	Ok(webhook)
}

fn decode_failed(e: serde_json::Error) -> ClubhouseError {
	error!(error = %e, "Failed to parse webhook body");
	ClubhouseError::Decode(e)
}
