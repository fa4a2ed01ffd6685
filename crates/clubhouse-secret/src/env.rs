// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Load tokens and webhook secrets from the environment.
//!
//! The client itself owns no variable names. Embedding applications pick a
//! name (say `CLUBHOUSE_API_TOKEN`) and call [`load_secret_env`], which also
//! honours `CLUBHOUSE_API_TOKEN_FILE` for Docker and Kubernetes secret mounts.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;
use tracing::debug;

use crate::SecretString;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Error returned by [`require_secret_env`].
#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error("required secret not found: set either {var} or {file_var}")]
	Missing { var: String, file_var: String },

	#[error(transparent)]
	Load(#[from] SecretEnvError),
}

/// Load a secret from `{var}_FILE` or `{var}`, in that order.
///
/// A single trailing newline is stripped from file contents. Returns
/// `Ok(None)` when neither variable is set.
///
/// ```no_run
/// use clubhouse_secret::load_secret_env;
///
/// if let Some(token) = load_secret_env("CLUBHOUSE_API_TOKEN")? {
///     println!("token loaded: {token}"); // prints "[REDACTED]"
/// }
/// # Ok::<(), clubhouse_secret::SecretEnvError>(())
/// ```
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		debug!(var = %file_var, path = %path.display(), "Loaded secret from file");
		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(secret)));
	}

	if let Ok(value) = env::var(var) {
		debug!(var = %var, "Loaded secret from environment");
		return Ok(Some(SecretString::new(value)));
	}

	Ok(None)
}

/// Like [`load_secret_env`], but a missing secret is an error.
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
		file_var: format!("{var}_FILE"),
	})
}
