//! [`SessionController`]: the adapter binding the command facade to one
//! live engine session.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use ftc_protocol::{Cookie, MouseButton, NodeQuery, PointerAction, Rect};
use ftc_runtime::script::{BoundScript, ClientScript};
use ftc_runtime::session::SessionDriver;
use ftc_runtime::{Error, Result};
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::controller::{FunctionalTestController, PendingScript};
use crate::element_handle::ElementHandle;

/// Hosted query for the current document title.
const TITLE: &str = "document.title";
/// Hosted query for the current document URL.
const CURRENT_URL: &str = "window.location.href";

/// Binds the [`FunctionalTestController`] contract to one live engine
/// session.
///
/// The session reference is captured once at construction and threaded
/// through every delegated engine call for the controller's lifetime; the
/// hosted title and URL queries are bound to that same session up front.
/// Exactly one controller wraps one session at a time, and handles minted
/// by this controller are meaningless once that session ends.
///
/// The controller is a transparent relay: it performs no retries and no
/// local recovery, and engine failures reach the caller verbatim.
pub struct SessionController {
	session: Arc<dyn SessionDriver>,
	title: BoundScript,
	current_url: BoundScript,
}

impl SessionController {
	/// Creates a controller bound to `session`.
	pub fn new(session: Arc<dyn SessionDriver>) -> Self {
		let title = ClientScript::new(TITLE).bind(Arc::clone(&session));
		let current_url = ClientScript::new(CURRENT_URL).bind(Arc::clone(&session));
		debug!("controller bound to session");
		Self {
			session,
			title,
			current_url,
		}
	}

	/// Resolves a first-match query, failing when nothing matches.
	async fn require_first(&self, query: NodeQuery) -> Result<ElementHandle> {
		let selector = query.selector.clone();
		let nodes = self.session.query(&query).await?;
		nodes
			.into_iter()
			.next()
			.map(ElementHandle::new)
			.ok_or(Error::ElementNotFound { selector })
	}

	/// Resolves an all-matches query; empty results are not an error.
	async fn collect_all(&self, query: NodeQuery) -> Result<Vec<ElementHandle>> {
		let nodes = self.session.query(&query).await?;
		Ok(nodes.into_iter().map(ElementHandle::new).collect())
	}
}

#[async_trait]
impl FunctionalTestController for SessionController {
	async fn navigate_to(&self, url: &str) -> Result<()> {
		self.session.navigate(url).await
	}

	async fn get_current_url(&self) -> Result<String> {
		self.current_url.call_string().await
	}

	async fn back(&self) -> Result<()> {
		self.session.history_back().await
	}

	async fn forward(&self) -> Result<()> {
		self.session.history_forward().await
	}

	async fn refresh(&self) -> Result<()> {
		self.session.reload().await
	}

	async fn get_title(&self) -> Result<String> {
		self.title.call_string().await
	}

	async fn switch_to_frame(&self, id: &str) -> Result<()> {
		self.session.switch_frame(id).await
	}

	async fn switch_to_parent_frame(&self) -> Result<()> {
		self.session.leave_frame().await
	}

	async fn get_window_rect(&self) -> Result<Rect> {
		self.session.window_rect().await
	}

	async fn set_window_rect(&self, rect: Rect) -> Result<()> {
		self.session.set_window_rect(rect).await
	}

	async fn maximize_window(&self) -> Result<()> {
		self.session.maximize_window().await
	}

	async fn fullscreen_window(&self) -> Result<()> {
		self.session.fullscreen_window().await
	}

	async fn get_active_element(&self) -> Result<ElementHandle> {
		let node = self.session.focused_node().await?;
		Ok(ElementHandle::new(node))
	}

	async fn find_element(&self, selector: &str) -> Result<ElementHandle> {
		self.require_first(NodeQuery::css(selector).first()).await
	}

	async fn find_elements(&self, selector: &str) -> Result<Vec<ElementHandle>> {
		self.collect_all(NodeQuery::css(selector)).await
	}

	async fn find_element_from_element(
		&self,
		handle: &ElementHandle,
		selector: &str,
	) -> Result<ElementHandle> {
		let query = NodeQuery::css(selector)
			.within(handle.element().clone())
			.first();
		self.require_first(query).await
	}

	async fn find_elements_from_element(
		&self,
		handle: &ElementHandle,
		selector: &str,
	) -> Result<Vec<ElementHandle>> {
		let query = NodeQuery::css(selector).within(handle.element().clone());
		self.collect_all(query).await
	}

	async fn is_element_selected(&self, handle: &ElementHandle) -> Result<bool> {
		self.session.is_selected(handle.element()).await
	}

	async fn get_element_attribute(
		&self,
		handle: &ElementHandle,
		attribute: &str,
	) -> Result<Option<String>> {
		self.session.attribute(handle.element(), attribute).await
	}

	async fn get_element_property(&self, handle: &ElementHandle, property: &str) -> Result<Value> {
		self.session.property(handle.element(), property).await
	}

	async fn get_element_css_value(
		&self,
		handle: &ElementHandle,
		style_property: &str,
	) -> Result<String> {
		self.session.css_value(handle.element(), style_property).await
	}

	async fn get_element_text(&self, handle: &ElementHandle) -> Result<String> {
		self.session.text(handle.element()).await
	}

	async fn get_element_tag_name(&self, handle: &ElementHandle) -> Result<String> {
		self.session.tag_name(handle.element()).await
	}

	async fn get_element_rect(&self, handle: &ElementHandle) -> Result<Rect> {
		self.session.node_rect(handle.element()).await
	}

	async fn is_element_enabled(&self, handle: &ElementHandle) -> Result<bool> {
		self.session.is_enabled(handle.element()).await
	}

	async fn execute_script(&self, expression: &str) -> Result<Value> {
		self.session.eval(expression).await
	}

	async fn execute_async_script(&self, expression: &str) -> Result<PendingScript> {
		let session = Arc::clone(&self.session);
		let expression = expression.to_string();
		let (tx, rx) = oneshot::channel();
		tokio::spawn(async move {
			if tx.send(session.eval(&expression).await).is_err() {
				warn!("async script result dropped before it was awaited");
			}
		});
		Ok(PendingScript::new(rx))
	}

	async fn get_all_cookies(&self) -> Result<Vec<Cookie>> {
		self.session.cookies(None).await
	}

	async fn get_named_cookie(&self, name: &str) -> Result<Cookie> {
		let names = [name.to_string()];
		let cookies = self.session.cookies(Some(&names)).await?;
		cookies
			.into_iter()
			.next()
			.ok_or(Error::CookieNotFound {
				name: name.to_string(),
			})
	}

	async fn add_cookie(&self, cookie: Cookie) -> Result<()> {
		self.session.set_cookie(cookie).await
	}

	async fn delete_cookie(&self, name: &str) -> Result<()> {
		let names = [name.to_string()];
		self.session.delete_cookies(Some(&names)).await
	}

	async fn delete_all_cookies(&self) -> Result<()> {
		self.session.delete_cookies(None).await
	}

	async fn take_screenshot(&self) -> Result<String> {
		let bytes = self.session.screenshot(None).await?;
		Ok(BASE64_STANDARD.encode(bytes))
	}

	async fn take_element_screenshot(&self, handle: &ElementHandle) -> Result<String> {
		let bytes = self.session.screenshot(Some(handle.element())).await?;
		Ok(BASE64_STANDARD.encode(bytes))
	}

	async fn click(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::click())
			.await
	}

	async fn double_click(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::double_click())
			.await
	}

	async fn right_click(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(
				handle.element(),
				PointerAction::click_with(MouseButton::Right),
			)
			.await
	}

	async fn middle_click(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(
				handle.element(),
				PointerAction::click_with(MouseButton::Middle),
			)
			.await
	}

	async fn hover(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::Hover)
			.await
	}

	async fn drag(&self, handle: &ElementHandle, dx: i64, dy: i64) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::Drag { dx, dy })
			.await
	}

	// The engine has no dedicated select primitive; selection state toggles
	// by clicking the checkbox, radio, or option element itself.
	async fn select(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::click())
			.await
	}

	async fn send_keys(&self, handle: Option<&ElementHandle>, keys: &str) -> Result<()> {
		match handle {
			Some(handle) => self.session.type_text(handle.element(), keys).await,
			None => self.session.press_key(keys).await,
		}
	}

	async fn clear(&self, handle: &ElementHandle) -> Result<()> {
		self.session.clear_text(handle.element()).await
	}

	async fn touch(&self, handle: &ElementHandle) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::Tap)
			.await
	}

	async fn swipe(&self, handle: &ElementHandle, dx: i64, dy: i64) -> Result<()> {
		self.session
			.pointer(handle.element(), PointerAction::Swipe { dx, dy })
			.await
	}
}
