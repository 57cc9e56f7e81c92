//! Shared test support: an inert engine session.

use async_trait::async_trait;
use ftc_protocol::{Cookie, NodeId, NodeQuery, PointerAction, Rect};
use serde_json::Value;

use crate::Result;
use crate::session::SessionDriver;

/// A session that acknowledges every command without driving anything.
///
/// Used where tests need a live `Arc<dyn SessionDriver>` but no engine
/// behavior: hand-off plumbing, fixture setup, screenshot placement.
pub(crate) struct InertDriver {
	screenshot_bytes: Vec<u8>,
}

impl InertDriver {
	pub(crate) fn new() -> Self {
		// Smallest payload that still looks like an image file on disk.
		Self {
			screenshot_bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
		}
	}
}

#[async_trait]
impl SessionDriver for InertDriver {
	async fn navigate(&self, _url: &str) -> Result<()> {
		Ok(())
	}

	async fn history_back(&self) -> Result<()> {
		Ok(())
	}

	async fn history_forward(&self) -> Result<()> {
		Ok(())
	}

	async fn reload(&self) -> Result<()> {
		Ok(())
	}

	async fn switch_frame(&self, _selector: &str) -> Result<()> {
		Ok(())
	}

	async fn leave_frame(&self) -> Result<()> {
		Ok(())
	}

	async fn window_rect(&self) -> Result<Rect> {
		Ok(Rect::new(0, 0, 1280, 720))
	}

	async fn set_window_rect(&self, _rect: Rect) -> Result<()> {
		Ok(())
	}

	async fn maximize_window(&self) -> Result<()> {
		Ok(())
	}

	async fn fullscreen_window(&self) -> Result<()> {
		Ok(())
	}

	async fn query(&self, _query: &NodeQuery) -> Result<Vec<NodeId>> {
		Ok(Vec::new())
	}

	async fn focused_node(&self) -> Result<NodeId> {
		Ok(NodeId::new("node@0"))
	}

	async fn text(&self, _node: &NodeId) -> Result<String> {
		Ok(String::new())
	}

	async fn attribute(&self, _node: &NodeId, _name: &str) -> Result<Option<String>> {
		Ok(None)
	}

	async fn property(&self, _node: &NodeId, _name: &str) -> Result<Value> {
		Ok(Value::Null)
	}

	async fn css_value(&self, _node: &NodeId, _name: &str) -> Result<String> {
		Ok(String::new())
	}

	async fn tag_name(&self, _node: &NodeId) -> Result<String> {
		Ok("div".to_string())
	}

	async fn node_rect(&self, _node: &NodeId) -> Result<Rect> {
		Ok(Rect::default())
	}

	async fn is_selected(&self, _node: &NodeId) -> Result<bool> {
		Ok(false)
	}

	async fn is_enabled(&self, _node: &NodeId) -> Result<bool> {
		Ok(true)
	}

	async fn pointer(&self, _node: &NodeId, _action: PointerAction) -> Result<()> {
		Ok(())
	}

	async fn type_text(&self, _node: &NodeId, _text: &str) -> Result<()> {
		Ok(())
	}

	async fn press_key(&self, _combo: &str) -> Result<()> {
		Ok(())
	}

	async fn clear_text(&self, _node: &NodeId) -> Result<()> {
		Ok(())
	}

	async fn eval(&self, _expression: &str) -> Result<Value> {
		Ok(Value::Null)
	}

	async fn cookies(&self, _names: Option<&[String]>) -> Result<Vec<Cookie>> {
		Ok(Vec::new())
	}

	async fn set_cookie(&self, _cookie: Cookie) -> Result<()> {
		Ok(())
	}

	async fn delete_cookies(&self, _names: Option<&[String]>) -> Result<()> {
		Ok(())
	}

	async fn screenshot(&self, _node: Option<&NodeId>) -> Result<Vec<u8>> {
		Ok(self.screenshot_bytes.clone())
	}
}
