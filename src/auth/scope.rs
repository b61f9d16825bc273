//! Capability scopes granted to minted tokens.

// std
use std::collections::BTreeSet;
// crates.io
use serde::{Serializer, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
	/// Mapbox scopes are always `resource:action` pairs.
	#[error("Scope is not a `resource:action` pair: {scope}.")]
	MissingAction {
		/// The offending scope string.
		scope: String,
	},
}

/// Deduplicated, sorted list of Mapbox scopes; serializes as a JSON array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeSet(Arc<[String]>);
impl ScopeSet {
	/// Validates every entry and stores the set in sorted order.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut set = BTreeSet::new();

		for scope in scopes {
			let scope = scope.into();

			validate(&scope)?;
			set.insert(scope);
		}

		Ok(Self(set.into_iter().collect()))
	}
}
impl Serialize for ScopeSet {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}

fn validate(scope: &str) -> Result<(), ScopeValidationError> {
	if scope.is_empty() {
		return Err(ScopeValidationError::Empty);
	}
	if scope.chars().any(char::is_whitespace) {
		return Err(ScopeValidationError::ContainsWhitespace { scope: scope.to_owned() });
	}

	match scope.split_once(':') {
		Some((resource, action)) if !resource.is_empty() && !action.is_empty() => Ok(()),
		_ => Err(ScopeValidationError::MissingAction { scope: scope.to_owned() }),
	}
}
