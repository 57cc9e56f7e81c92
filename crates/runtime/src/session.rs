//! The automation engine session contract.
//!
//! A [`SessionDriver`] is one live connection to an automation engine
//! driving one browser, expressed in the engine's own vocabulary: indexed
//! selector queries, pointer actions, typed text versus global key presses,
//! name-filtered cookie operations, raw screenshot bytes. The normalized
//! WebDriver-shaped commands in `ftc-rs` are translated onto this surface
//! by an adapter that holds the session for the duration of one test.

use async_trait::async_trait;
use ftc_protocol::{Cookie, NodeId, NodeQuery, PointerAction, Rect};
use serde_json::Value;

use crate::Result;

/// One live automation engine session.
///
/// Implementations are provided by engine integrations; this crate and the
/// layers above it only ever hold a session as `Arc<dyn SessionDriver>`.
///
/// Commands issued sequentially against one session are executed by the
/// engine in issue order; nothing here reorders or parallelizes them.
/// Every operation suspends its caller until the engine acknowledges
/// completion, and every failure is reported through [`crate::Error`]
/// without retries.
#[async_trait]
pub trait SessionDriver: Send + Sync {
	// Browsing context

	/// Loads `url` in the session's top-level browsing context.
	async fn navigate(&self, url: &str) -> Result<()>;

	/// Traverses one step backward in the session history.
	async fn history_back(&self) -> Result<()>;

	/// Traverses one step forward in the session history.
	async fn history_forward(&self) -> Result<()>;

	/// Reloads the current document.
	async fn reload(&self) -> Result<()>;

	/// Scopes subsequent commands to the frame matching `selector`.
	///
	/// # Errors
	///
	/// Returns [`Error::FrameNotFound`](crate::Error::FrameNotFound) if no
	/// such frame exists in the current browsing context.
	async fn switch_frame(&self, selector: &str) -> Result<()>;

	/// Returns the command scope to the parent browsing context.
	async fn leave_frame(&self) -> Result<()>;

	// Window geometry

	/// Reads the OS-level bounds of the browser window.
	async fn window_rect(&self) -> Result<Rect>;

	/// Moves and resizes the browser window.
	async fn set_window_rect(&self, rect: Rect) -> Result<()>;

	/// Invokes the window manager's maximize operation.
	async fn maximize_window(&self) -> Result<()>;

	/// Invokes the window manager's fullscreen operation.
	async fn fullscreen_window(&self) -> Result<()>;

	// Element queries

	/// Resolves a query to the elements it matches, in document order.
	///
	/// An empty result is not an error; callers that require a match decide
	/// what missing means.
	async fn query(&self, query: &NodeQuery) -> Result<Vec<NodeId>>;

	/// Resolves the element that currently holds focus.
	async fn focused_node(&self) -> Result<NodeId>;

	// Element state

	/// Reads the rendered text of an element.
	async fn text(&self, node: &NodeId) -> Result<String>;

	/// Reads an attribute value; `None` if the attribute is absent.
	async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>>;

	/// Reads a DOM property value.
	async fn property(&self, node: &NodeId, name: &str) -> Result<Value>;

	/// Reads a computed CSS value.
	async fn css_value(&self, node: &NodeId, name: &str) -> Result<String>;

	/// Reads the tag name of an element.
	async fn tag_name(&self, node: &NodeId) -> Result<String>;

	/// Reads the bounding rectangle of an element.
	async fn node_rect(&self, node: &NodeId) -> Result<Rect>;

	/// Whether a checkbox/radio/option element is currently selected.
	async fn is_selected(&self, node: &NodeId) -> Result<bool>;

	/// Whether an element is enabled (no `disabled` state).
	async fn is_enabled(&self, node: &NodeId) -> Result<bool>;

	// Input

	/// Dispatches a pointer action against an element.
	///
	/// # Errors
	///
	/// Returns [`Error::NotInteractable`](crate::Error::NotInteractable) if
	/// the element is hidden or disabled, or
	/// [`Error::StaleElement`](crate::Error::StaleElement) if it is no
	/// longer attached.
	async fn pointer(&self, node: &NodeId, action: PointerAction) -> Result<()>;

	/// Types `text` into an element, focusing it first.
	async fn type_text(&self, node: &NodeId, text: &str) -> Result<()>;

	/// Dispatches a key press to whatever element currently holds focus.
	async fn press_key(&self, combo: &str) -> Result<()>;

	/// Clears the value of an input element.
	async fn clear_text(&self, node: &NodeId) -> Result<()>;

	// Scripts

	/// Runs an engine-hosted expression in the current browsing context and
	/// returns its result.
	async fn eval(&self, expression: &str) -> Result<Value>;

	// Cookies

	/// Returns cookies visible to the current document, optionally filtered
	/// by name. No ordering guarantee.
	async fn cookies(&self, names: Option<&[String]>) -> Result<Vec<Cookie>>;

	/// Adds or replaces a cookie.
	async fn set_cookie(&self, cookie: Cookie) -> Result<()>;

	/// Deletes the named cookies, or every cookie when `names` is `None`.
	async fn delete_cookies(&self, names: Option<&[String]>) -> Result<()>;

	// Screenshots

	/// Captures an image of the viewport, or of one element's bounding box
	/// when `node` is given. Returns raw encoded image bytes.
	async fn screenshot(&self, node: Option<&NodeId>) -> Result<Vec<u8>>;
}
