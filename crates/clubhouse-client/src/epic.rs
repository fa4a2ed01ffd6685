// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Epic resource types.

use serde::{Deserialize, Serialize};

/// An Epic as sent to `POST /epics`.
///
/// Only the fields this client writes are modelled; the server-assigned ID in
/// the creation response is not read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
	pub name: String,
	pub description: String,
}

impl Epic {
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
		}
	}
}

open_enum! {
	/// Workflow state of an Epic.
	pub enum EpicState {
		ToDo => "to do",
		InProgress => "in progress",
		Done => "done",
	}
}
