// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

/// Declares a string enum that Clubhouse may extend at any time.
///
/// Known values get their own variant; anything else decodes to
/// `Unknown(String)` and serializes back unchanged. The default is
/// `Unknown("")`, which is what an absent field decodes to.
macro_rules! open_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum $name {
			$($(#[$vmeta])* $variant,)+
			/// A value this client does not know about yet.
			Unknown(String),
		}

		impl $name {
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $wire,)+
					Self::Unknown(s) => s.as_str(),
				}
			}

			pub fn is_unknown(&self) -> bool {
				matches!(self, Self::Unknown(_))
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::Unknown(String::new())
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				match value.as_str() {
					$($wire => Self::$variant,)+
					_ => Self::Unknown(value),
				}
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::from(value.to_string())
			}
		}

		impl From<$name> for String {
			fn from(value: $name) -> Self {
				match value {
					$name::Unknown(s) => s,
					other => other.as_str().to_string(),
				}
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}
