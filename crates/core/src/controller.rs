//! The normalized command facade every engine adapter implements.

use async_trait::async_trait;
use ftc_protocol::{Cookie, Rect};
use ftc_runtime::{Error, Result};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::element_handle::ElementHandle;

/// The full normalized vocabulary of browser-automation commands.
///
/// Operations are declared at the semantic level of the WebDriver protocol
/// model, not the level of any one engine's API; adapters translate each
/// command into their engine's native call sequence and return primitives
/// or opaque [`ElementHandle`]s, never engine types.
///
/// Every command suspends its caller until the engine acknowledges
/// completion, and commands issued sequentially against one controller
/// execute in issue order. A command either fully succeeds or fails with
/// the engine's error relayed verbatim; adapters do not retry or recover.
/// The single exception to caller-coupled completion is
/// [`execute_async_script`](Self::execute_async_script), whose result
/// resolves independently of the issuing call.
#[async_trait]
pub trait FunctionalTestController: Send + Sync {
	// Navigation

	/// Navigates to the given URL.
	///
	/// See <https://www.w3.org/TR/webdriver1/#navigate-to>
	async fn navigate_to(&self, url: &str) -> Result<()>;

	/// Retrieves the URL of the current page.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-current-url>
	async fn get_current_url(&self) -> Result<String>;

	/// Traverses one step backward in the browser history.
	///
	/// See <https://www.w3.org/TR/webdriver1/#back>
	async fn back(&self) -> Result<()>;

	/// Traverses one step forward in the browser history.
	///
	/// See <https://www.w3.org/TR/webdriver1/#forward>
	async fn forward(&self) -> Result<()>;

	/// Reloads the current page.
	///
	/// See <https://www.w3.org/TR/webdriver1/#refresh>
	async fn refresh(&self) -> Result<()>;

	/// Returns the document title, as of the time of the call.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-title>
	async fn get_title(&self) -> Result<String>;

	// Frame control

	/// Selects the child browsing context matching `id` as the current
	/// browsing context for subsequent commands.
	///
	/// See <https://www.w3.org/TR/webdriver1/#switch-to-frame>
	///
	/// # Errors
	///
	/// Fails with [`Error::FrameNotFound`] if the target frame does not
	/// exist.
	async fn switch_to_frame(&self, id: &str) -> Result<()>;

	/// Sets the current browsing context for future commands to the parent
	/// of the current browsing context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#switch-to-parent-frame>
	async fn switch_to_parent_frame(&self) -> Result<()>;

	// Window geometry

	/// Returns the size and position of the operating system window for the
	/// current top-level browsing context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-window-rect>
	async fn get_window_rect(&self) -> Result<Rect>;

	/// Alters the size and position of the operating system window for the
	/// current top-level browsing context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#set-window-rect>
	async fn set_window_rect(&self, rect: Rect) -> Result<()>;

	/// Invokes the window manager's maximize operation on the window for
	/// the current top-level browsing context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#maximize-window>
	async fn maximize_window(&self) -> Result<()>;

	/// Invokes the window manager's fullscreen operation on the window for
	/// the current top-level browsing context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#fullscreen-window>
	async fn fullscreen_window(&self) -> Result<()>;

	// Element lookup

	/// Returns the active element of the current browsing context's
	/// document.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-active-element>
	async fn get_active_element(&self) -> Result<ElementHandle>;

	/// Finds the first element matching the given selector in the current
	/// browsing context, for use as the element context of future
	/// element-centric commands.
	///
	/// See <https://www.w3.org/TR/webdriver1/#find-element>
	///
	/// # Errors
	///
	/// Fails with [`Error::ElementNotFound`] if nothing matches; a missing
	/// element never produces a placeholder handle.
	async fn find_element(&self, selector: &str) -> Result<ElementHandle>;

	/// Finds all elements matching the given selector in the current
	/// browsing context. An empty result is not an error.
	///
	/// See <https://www.w3.org/TR/webdriver1/#find-elements>
	async fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>>;

	/// Finds the first descendant of the given element matching the given
	/// selector.
	///
	/// See <https://www.w3.org/TR/webdriver1/#find-element-from-element>
	async fn find_element_from_element(
		&self,
		handle: &ElementHandle,
		selector: &str,
	) -> Result<ElementHandle>;

	/// Finds all descendants of the given element matching the given
	/// selector. An empty result is not an error.
	///
	/// See <https://www.w3.org/TR/webdriver1/#find-elements-from-element>
	async fn find_elements_from_element(
		&self,
		handle: &ElementHandle,
		selector: &str,
	) -> Result<Vec<ElementHandle>>;

	// Element inspection

	/// Determines if the referenced element is selected. Only meaningful
	/// for checkbox and radio inputs and for option elements.
	///
	/// See <https://www.w3.org/TR/webdriver1/#is-element-selected>
	async fn is_element_selected(&self, handle: &ElementHandle) -> Result<bool>;

	/// Returns the value of the given attribute, or `None` if the element
	/// does not carry it.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-attribute>
	async fn get_element_attribute(
		&self,
		handle: &ElementHandle,
		attribute: &str,
	) -> Result<Option<String>>;

	/// Returns the value of the given DOM property.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-property>
	async fn get_element_property(&self, handle: &ElementHandle, property: &str) -> Result<Value>;

	/// Returns the computed value of the given CSS property.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-css-value>
	async fn get_element_css_value(
		&self,
		handle: &ElementHandle,
		style_property: &str,
	) -> Result<String>;

	/// Returns the element's text "as rendered".
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-text>
	async fn get_element_text(&self, handle: &ElementHandle) -> Result<String>;

	/// Returns the element's tag name.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-tag-name>
	async fn get_element_tag_name(&self, handle: &ElementHandle) -> Result<String>;

	/// Returns the dimensions and coordinates of the given element.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-element-rect>
	async fn get_element_rect(&self, handle: &ElementHandle) -> Result<Rect>;

	/// Returns the enabled state of the given element: `false` when the
	/// element is disabled.
	///
	/// See <https://www.w3.org/TR/webdriver1/#is-element-enabled>
	async fn is_element_enabled(&self, handle: &ElementHandle) -> Result<bool>;

	// Script execution

	/// Executes the given expression in the current browsing context and
	/// blocks until execution completes, returning its value.
	///
	/// See <https://www.w3.org/TR/webdriver1/#execute-script>
	async fn execute_script(&self, expression: &str) -> Result<Value>;

	/// Executes the given expression in the current browsing context
	/// without coupling its completion to this call: the returned
	/// [`PendingScript`] resolves once the hosted script signals
	/// completion.
	///
	/// See <https://www.w3.org/TR/webdriver1/#execute-async-script>
	async fn execute_async_script(&self, expression: &str) -> Result<PendingScript>;

	// Cookies

	/// Returns all cookies visible to the document in the current browsing
	/// context. No ordering guarantee.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-all-cookies>
	async fn get_all_cookies(&self) -> Result<Vec<Cookie>>;

	/// Returns the cookie with the given name.
	///
	/// See <https://www.w3.org/TR/webdriver1/#get-named-cookie>
	///
	/// # Errors
	///
	/// Fails with [`Error::CookieNotFound`] if no such cookie exists.
	async fn get_named_cookie(&self, name: &str) -> Result<Cookie>;

	/// Adds the given cookie to the document in the current browsing
	/// context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#add-cookie>
	async fn add_cookie(&self, cookie: Cookie) -> Result<()>;

	/// Deletes the cookie with the given name.
	///
	/// See <https://www.w3.org/TR/webdriver1/#delete-cookie>
	async fn delete_cookie(&self, name: &str) -> Result<()>;

	/// Deletes all cookies for the document in the current browsing
	/// context.
	///
	/// See <https://www.w3.org/TR/webdriver1/#delete-all-cookies>
	async fn delete_all_cookies(&self) -> Result<()>;

	// Screenshots

	/// Takes a screenshot of the visible region encompassed by the
	/// bounding rectangle of the window. Returns base64-encoded image data.
	///
	/// See <https://www.w3.org/TR/webdriver1/#take-screenshot>
	async fn take_screenshot(&self) -> Result<String>;

	/// Takes a screenshot of the visible region encompassed by the
	/// bounding rectangle of an element. Returns base64-encoded image data.
	///
	/// See <https://www.w3.org/TR/webdriver1/#take-element-screenshot>
	async fn take_element_screenshot(&self, handle: &ElementHandle) -> Result<String>;

	// Element interaction
	//
	// Interaction commands fail when the target element is not
	// interactable (hidden, disabled, or detached), and their browser-side
	// effects are not reversible.

	/// Clicks the given element at its center point.
	///
	/// See <https://www.w3.org/TR/webdriver1/#element-click>
	async fn click(&self, handle: &ElementHandle) -> Result<()>;

	/// Double-clicks the given element at its center point.
	async fn double_click(&self, handle: &ElementHandle) -> Result<()>;

	/// Right-clicks the given element at its center point.
	async fn right_click(&self, handle: &ElementHandle) -> Result<()>;

	/// Middle-clicks the given element at its center point.
	async fn middle_click(&self, handle: &ElementHandle) -> Result<()>;

	/// Hovers the given element at its center point.
	async fn hover(&self, handle: &ElementHandle) -> Result<()>;

	/// Executes a drag gesture on the given element, moving it by the
	/// given pixel offset.
	async fn drag(&self, handle: &ElementHandle, dx: i64, dy: i64) -> Result<()>;

	/// Executes a select action on the given element. Only meaningful for
	/// checkbox and radio inputs and for option elements.
	async fn select(&self, handle: &ElementHandle) -> Result<()>;

	/// Sends the provided keys to the given form control element. If no
	/// element is provided, the currently focused element receives the
	/// keys as a global key press.
	///
	/// See <https://www.w3.org/TR/webdriver1/#element-send-keys>
	async fn send_keys(&self, handle: Option<&ElementHandle>, keys: &str) -> Result<()>;

	/// Clears the value of the given input element.
	///
	/// See <https://www.w3.org/TR/webdriver1/#element-clear>
	async fn clear(&self, handle: &ElementHandle) -> Result<()>;

	/// Executes a touch tap on the given element.
	async fn touch(&self, handle: &ElementHandle) -> Result<()>;

	/// Executes a swipe gesture on the given element, moving by the given
	/// pixel offset.
	async fn swipe(&self, handle: &ElementHandle, dx: i64, dy: i64) -> Result<()>;
}

/// Result of [`execute_async_script`](FunctionalTestController::execute_async_script).
///
/// The hosted script keeps running after the issuing command returns; this
/// value resolves once the script signals completion, independent of any
/// further commands issued against the controller in the meantime.
pub struct PendingScript {
	rx: oneshot::Receiver<Result<Value>>,
}

impl PendingScript {
	/// Creates a pending result that resolves when `rx` is fulfilled.
	///
	/// Adapters hand the sender half to whatever executes the script.
	pub fn new(rx: oneshot::Receiver<Result<Value>>) -> Self {
		Self { rx }
	}

	/// Waits for the hosted script to signal completion.
	///
	/// # Errors
	///
	/// Fails with [`Error::ScriptError`] if the script raised, or if its
	/// session ended before the script completed.
	pub async fn resolved(self) -> Result<Value> {
		match self.rx.await {
			Ok(result) => result,
			Err(_) => Err(Error::ScriptError(
				"script host dropped before completion".to_string(),
			)),
		}
	}
}
