//! Element queries and engine-native element identity.

use serde::{Deserialize, Serialize};

/// Engine-native element identifier.
///
/// A `NodeId` is minted by the engine when a query resolves. It is only
/// meaningful to the session that produced it and does not survive the end
/// of that session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Creates an identifier from an engine-issued token.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the engine-issued token.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// A selector-based element query.
///
/// Describes what the engine should resolve: a selector in the engine's
/// selector syntax, optionally narrowed to a single match index and/or
/// scoped to the descendants of a previously resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeQuery {
	/// Selector string (engine-defined syntax)
	pub selector: String,

	/// Restrict to the n-th match (0-based); `None` resolves all matches
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<usize>,

	/// Search only the descendants of this element
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<NodeId>,
}

impl NodeQuery {
	/// Creates a query resolving every element the selector matches.
	pub fn css(selector: impl Into<String>) -> Self {
		Self {
			selector: selector.into(),
			index: None,
			scope: None,
		}
	}

	/// Restricts the query to the n-th match (0-based).
	pub fn nth(mut self, index: usize) -> Self {
		self.index = Some(index);
		self
	}

	/// Restricts the query to the first match.
	pub fn first(self) -> Self {
		self.nth(0)
	}

	/// Scopes the query to the descendants of `ancestor`.
	pub fn within(mut self, ancestor: NodeId) -> Self {
		self.scope = Some(ancestor);
		self
	}
}
