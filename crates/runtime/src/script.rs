//! Engine-hosted query functions bound to a session.

use std::sync::Arc;

use serde_json::Value;

use crate::session::SessionDriver;
use crate::{Error, Result};

/// An engine-hosted query expression not yet associated with a session.
///
/// A `ClientScript` cannot be invoked directly: it must first be bound to a
/// live session with [`ClientScript::bind`]. Binding-before-use mirrors the
/// engine requirement that every hosted function is associated with the
/// session it runs against.
#[derive(Debug, Clone)]
pub struct ClientScript {
	expression: String,
}

impl ClientScript {
	/// Creates a hosted query from an expression in the engine's scripting
	/// language.
	pub fn new(expression: impl Into<String>) -> Self {
		Self {
			expression: expression.into(),
		}
	}

	/// The expression this script evaluates.
	pub fn expression(&self) -> &str {
		&self.expression
	}

	/// Associates the script with one live session.
	pub fn bind(&self, session: Arc<dyn SessionDriver>) -> BoundScript {
		BoundScript {
			expression: self.expression.clone(),
			session,
		}
	}
}

/// A [`ClientScript`] associated with one live session.
///
/// Holds its session for as long as the script is callable, so a bound
/// script can never outlive the association it was created with.
pub struct BoundScript {
	expression: String,
	session: Arc<dyn SessionDriver>,
}

impl BoundScript {
	/// Evaluates the expression in the bound session's browsing context.
	pub async fn call(&self) -> Result<Value> {
		self.session.eval(&self.expression).await
	}

	/// Evaluates the expression and coerces the result to a string.
	///
	/// # Errors
	///
	/// Returns [`Error::ScriptError`] if the expression resolves to a
	/// non-string value.
	pub async fn call_string(&self) -> Result<String> {
		match self.call().await? {
			Value::String(s) => Ok(s),
			other => Err(Error::ScriptError(format!(
				"expected string result from '{}', got {other}",
				self.expression
			))),
		}
	}
}
