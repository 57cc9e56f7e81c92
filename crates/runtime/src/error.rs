//! Error types for the functional-test runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by automation engine sessions and the test lifecycle.
///
/// Command errors originate inside the engine and are relayed verbatim by
/// the controller layer; the lifecycle variants originate in fixture
/// setup/teardown.
#[derive(Debug, Error)]
pub enum Error {
	/// A selector matched no element when one was required.
	#[error("element not found: selector '{selector}'")]
	ElementNotFound {
		/// Selector that resolved nothing
		selector: String,
	},

	/// No cookie with the given name exists in the session store.
	#[error("cookie not found: '{name}'")]
	CookieNotFound {
		/// Requested cookie name
		name: String,
	},

	/// The target frame does not exist in the current browsing context.
	#[error("frame not found: '{frame}'")]
	FrameNotFound {
		/// Frame selector that resolved nothing
		frame: String,
	},

	/// A simulated input action could not be delivered to its target.
	#[error("element not interactable: {reason}")]
	NotInteractable {
		/// Engine-reported reason (hidden, disabled, obscured, ...)
		reason: String,
	},

	/// The element behind a handle is no longer attached to the document.
	#[error("stale element reference: {node}")]
	StaleElement {
		/// Engine token of the detached element
		node: String,
	},

	/// A navigation command did not complete.
	#[error("navigation to '{url}' failed: {message}")]
	NavigationFailed {
		/// Requested URL
		url: String,
		/// Engine-reported failure detail
		message: String,
	},

	/// Engine-hosted script execution raised an error or never completed.
	#[error("script failed: {0}")]
	ScriptError(String),

	/// The session hand-off peer was dropped before a session moved across.
	#[error("session hand-off closed before a session was exchanged")]
	HandoffClosed,

	/// The session hand-off was already resolved once.
	#[error("session hand-off already fulfilled")]
	HandoffFulfilled,

	/// Fixture setup did not receive a session within the allotted time.
	#[error("no session captured within {waited_ms}ms")]
	SetupTimeout {
		/// How long setup waited
		waited_ms: u64,
	},

	/// The engine runner failed to start.
	#[error("failed to launch engine runner: {0}")]
	LaunchFailed(String),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Returns true if a required lookup resolved nothing.
	pub fn is_resolution(&self) -> bool {
		matches!(
			self,
			Error::ElementNotFound { .. }
				| Error::CookieNotFound { .. }
				| Error::FrameNotFound { .. }
		)
	}

	/// Returns true if a simulated input could not be delivered.
	pub fn is_interaction(&self) -> bool {
		matches!(
			self,
			Error::NotInteractable { .. } | Error::StaleElement { .. }
		)
	}

	/// Returns true if a navigation command failed.
	pub fn is_navigation(&self) -> bool {
		matches!(self, Error::NavigationFailed { .. })
	}

	/// Returns true if engine-hosted script execution failed.
	pub fn is_script(&self) -> bool {
		matches!(self, Error::ScriptError(_))
	}
}
