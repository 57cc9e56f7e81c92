//! In-memory engine session used by the controller and scenario tests.
//!
//! `StubDriver` behaves like a tiny site: pages registered by URL, nodes
//! matched by selector, focus tracking, a cookie jar, and navigation
//! effects wired to clicks and the enter key. Every executed command is
//! appended to a log so tests can assert issue order.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ftc_protocol::{Cookie, NodeId, NodeQuery, PointerAction, Rect};
use ftc_runtime::session::SessionDriver;
use ftc_runtime::{Error, Result};
use serde_json::Value;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One element of a page fixture.
#[derive(Clone)]
pub struct NodeSpec {
	selectors: Vec<String>,
	text: String,
	tag: String,
	attributes: HashMap<String, String>,
	css: HashMap<String, String>,
	rect: Rect,
	enabled: bool,
	selected: bool,
	parent: Option<String>,
	click_target: Option<String>,
	submit_target: Option<String>,
}

impl NodeSpec {
	pub fn new(selector: &str) -> Self {
		Self {
			selectors: vec![selector.to_string()],
			text: String::new(),
			tag: "div".to_string(),
			attributes: HashMap::new(),
			css: HashMap::new(),
			rect: Rect::default(),
			enabled: true,
			selected: false,
			parent: None,
			click_target: None,
			submit_target: None,
		}
	}

	pub fn selector(mut self, selector: &str) -> Self {
		self.selectors.push(selector.to_string());
		self
	}

	pub fn text(mut self, text: &str) -> Self {
		self.text = text.to_string();
		self
	}

	pub fn tag(mut self, tag: &str) -> Self {
		self.tag = tag.to_string();
		self
	}

	pub fn attribute(mut self, name: &str, value: &str) -> Self {
		self.attributes.insert(name.to_string(), value.to_string());
		self
	}

	pub fn css(mut self, name: &str, value: &str) -> Self {
		self.css.insert(name.to_string(), value.to_string());
		self
	}

	pub fn rect(mut self, rect: Rect) -> Self {
		self.rect = rect;
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	pub fn selected(mut self) -> Self {
		self.selected = true;
		self
	}

	/// Marks this node a descendant of the node matching `parent_selector`.
	pub fn child_of(mut self, parent_selector: &str) -> Self {
		self.parent = Some(parent_selector.to_string());
		self
	}

	/// Clicking this node loads `url`.
	pub fn clicking_navigates_to(mut self, url: &str) -> Self {
		self.click_target = Some(url.to_string());
		self
	}

	/// Pressing enter while this node has focus loads `url`.
	pub fn enter_navigates_to(mut self, url: &str) -> Self {
		self.submit_target = Some(url.to_string());
		self
	}
}

/// A page the stub session can load.
#[derive(Clone, Default)]
pub struct PageSpec {
	title: String,
	nodes: Vec<NodeSpec>,
	scripts: HashMap<String, Value>,
}

impl PageSpec {
	pub fn new(title: &str) -> Self {
		Self {
			title: title.to_string(),
			..Self::default()
		}
	}

	pub fn node(mut self, node: NodeSpec) -> Self {
		self.nodes.push(node);
		self
	}

	/// Registers the result of an engine-hosted expression on this page.
	pub fn script(mut self, expression: &str, result: Value) -> Self {
		self.scripts.insert(expression.to_string(), result);
		self
	}
}

struct LoadedNode {
	id: NodeId,
	spec: NodeSpec,
	value: String,
}

struct BrowserState {
	url: String,
	title: String,
	nodes: Vec<LoadedNode>,
	scripts: HashMap<String, Value>,
	focused: Option<NodeId>,
	cookies: Vec<Cookie>,
	window: Rect,
	frame_depth: usize,
	history: Vec<String>,
	history_pos: usize,
	generation: u64,
	log: Vec<String>,
}

/// In-memory stand-in for a live automation engine session.
pub struct StubDriver {
	pages: HashMap<String, PageSpec>,
	state: Mutex<BrowserState>,
}

impl StubDriver {
	pub fn new() -> Self {
		Self {
			pages: HashMap::new(),
			state: Mutex::new(BrowserState {
				url: "about:blank".to_string(),
				title: String::new(),
				nodes: Vec::new(),
				scripts: HashMap::new(),
				focused: None,
				cookies: Vec::new(),
				window: Rect::new(0, 0, 1280, 720),
				frame_depth: 0,
				history: vec!["about:blank".to_string()],
				history_pos: 0,
				generation: 0,
				log: Vec::new(),
			}),
		}
	}

	/// Registers a page the session can navigate to.
	pub fn page(mut self, url: &str, spec: PageSpec) -> Self {
		self.pages.insert(url.to_string(), spec);
		self
	}

	/// Snapshot of executed commands, in issue order.
	pub fn log(&self) -> Vec<String> {
		self.state.lock().unwrap().log.clone()
	}

	/// Loads a registered page, invalidating every previously minted node.
	fn load(&self, state: &mut BrowserState, url: &str) -> Result<()> {
		let page = self.pages.get(url).ok_or_else(|| Error::NavigationFailed {
			url: url.to_string(),
			message: "unreachable address".to_string(),
		})?;
		state.generation += 1;
		let generation = state.generation;
		state.url = url.to_string();
		state.title = page.title.clone();
		state.scripts = page.scripts.clone();
		state.focused = None;
		state.nodes = page
			.nodes
			.iter()
			.enumerate()
			.map(|(i, spec)| LoadedNode {
				id: NodeId::new(format!("node@{generation}.{i}")),
				spec: spec.clone(),
				value: String::new(),
			})
			.collect();
		Ok(())
	}

	fn position(&self, state: &BrowserState, node: &NodeId) -> Result<usize> {
		state
			.nodes
			.iter()
			.position(|n| &n.id == node)
			.ok_or_else(|| Error::StaleElement {
				node: node.to_string(),
			})
	}

	fn matches(state: &BrowserState, node: &LoadedNode, query: &NodeQuery) -> bool {
		if !node.spec.selectors.iter().any(|s| s == &query.selector) {
			return false;
		}
		match &query.scope {
			None => true,
			Some(scope) => {
				let Some(ancestor) = state.nodes.iter().find(|n| &n.id == scope) else {
					return false;
				};
				node.spec
					.parent
					.as_ref()
					.is_some_and(|p| ancestor.spec.selectors.contains(p))
			}
		}
	}
}

#[async_trait]
impl SessionDriver for StubDriver {
	async fn navigate(&self, url: &str) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("navigate {url}"));
		self.load(&mut state, url)?;
		let pos = state.history_pos;
		state.history.truncate(pos + 1);
		state.history.push(url.to_string());
		state.history_pos += 1;
		Ok(())
	}

	async fn history_back(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("back".to_string());
		if state.history_pos > 0 {
			state.history_pos -= 1;
			let url = state.history[state.history_pos].clone();
			if url != "about:blank" {
				self.load(&mut state, &url)?;
			}
		}
		Ok(())
	}

	async fn history_forward(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("forward".to_string());
		if state.history_pos + 1 < state.history.len() {
			state.history_pos += 1;
			let url = state.history[state.history_pos].clone();
			self.load(&mut state, &url)?;
		}
		Ok(())
	}

	async fn reload(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("reload".to_string());
		let url = state.url.clone();
		self.load(&mut state, &url)
	}

	async fn switch_frame(&self, selector: &str) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("switch_frame {selector}"));
		let found = state
			.nodes
			.iter()
			.any(|n| n.spec.tag == "iframe" && n.spec.selectors.iter().any(|s| s == selector));
		if !found {
			return Err(Error::FrameNotFound {
				frame: selector.to_string(),
			});
		}
		state.frame_depth += 1;
		Ok(())
	}

	async fn leave_frame(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("leave_frame".to_string());
		state.frame_depth = state.frame_depth.saturating_sub(1);
		Ok(())
	}

	async fn window_rect(&self) -> Result<Rect> {
		Ok(self.state.lock().unwrap().window)
	}

	async fn set_window_rect(&self, rect: Rect) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("set_window_rect {rect:?}"));
		state.window = rect;
		Ok(())
	}

	async fn maximize_window(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("maximize".to_string());
		state.window = Rect::new(0, 0, 1920, 1080);
		Ok(())
	}

	async fn fullscreen_window(&self) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("fullscreen".to_string());
		state.window = Rect::new(0, 0, 2560, 1440);
		Ok(())
	}

	async fn query(&self, query: &NodeQuery) -> Result<Vec<NodeId>> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("query {}", query.selector));
		let matched: Vec<NodeId> = state
			.nodes
			.iter()
			.filter(|n| Self::matches(&state, n, query))
			.map(|n| n.id.clone())
			.collect();
		Ok(match query.index {
			Some(i) => matched.into_iter().nth(i).into_iter().collect(),
			None => matched,
		})
	}

	async fn focused_node(&self) -> Result<NodeId> {
		let state = self.state.lock().unwrap();
		state.focused.clone().ok_or(Error::ElementNotFound {
			selector: ":focus".to_string(),
		})
	}

	async fn text(&self, node: &NodeId) -> Result<String> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.text.clone())
	}

	async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.attributes.get(name).cloned())
	}

	async fn property(&self, node: &NodeId, name: &str) -> Result<Value> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		if name == "value" {
			return Ok(Value::String(state.nodes[idx].value.clone()));
		}
		Ok(state.nodes[idx]
			.spec
			.attributes
			.get(name)
			.map(|v| Value::String(v.clone()))
			.unwrap_or(Value::Null))
	}

	async fn css_value(&self, node: &NodeId, name: &str) -> Result<String> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.css.get(name).cloned().unwrap_or_default())
	}

	async fn tag_name(&self, node: &NodeId) -> Result<String> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.tag.clone())
	}

	async fn node_rect(&self, node: &NodeId) -> Result<Rect> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.rect)
	}

	async fn is_selected(&self, node: &NodeId) -> Result<bool> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.selected)
	}

	async fn is_enabled(&self, node: &NodeId) -> Result<bool> {
		let state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		Ok(state.nodes[idx].spec.enabled)
	}

	async fn pointer(&self, node: &NodeId, action: PointerAction) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		if !state.nodes[idx].spec.enabled {
			return Err(Error::NotInteractable {
				reason: "element is disabled".to_string(),
			});
		}
		state.log.push(format!("pointer {node} {action:?}"));
		if matches!(action, PointerAction::Click { .. } | PointerAction::Tap) {
			state.focused = Some(node.clone());
			if let Some(target) = state.nodes[idx].spec.click_target.clone() {
				self.load(&mut state, &target)?;
			}
		}
		Ok(())
	}

	async fn type_text(&self, node: &NodeId, text: &str) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		if !state.nodes[idx].spec.enabled {
			return Err(Error::NotInteractable {
				reason: "element is disabled".to_string(),
			});
		}
		state.log.push(format!("type {node} {text}"));
		state.focused = Some(node.clone());
		state.nodes[idx].value.push_str(text);
		Ok(())
	}

	async fn press_key(&self, combo: &str) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("press {combo}"));
		let Some(node) = state.focused.clone() else {
			return Ok(());
		};
		let idx = self.position(&state, &node)?;
		if combo == "enter" {
			if let Some(target) = state.nodes[idx].spec.submit_target.clone() {
				self.load(&mut state, &target)?;
			}
		} else if combo.chars().count() == 1 {
			// Single characters type into the focused element; named keys
			// and modifier combos have no effect in this stub.
			state.nodes[idx].value.push_str(combo);
		}
		Ok(())
	}

	async fn clear_text(&self, node: &NodeId) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		let idx = self.position(&state, node)?;
		state.log.push(format!("clear {node}"));
		state.nodes[idx].value.clear();
		Ok(())
	}

	async fn eval(&self, expression: &str) -> Result<Value> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("eval {expression}"));
		match expression {
			"document.title" => Ok(Value::String(state.title.clone())),
			"window.location.href" => Ok(Value::String(state.url.clone())),
			other => state
				.scripts
				.get(other)
				.cloned()
				.ok_or_else(|| Error::ScriptError(format!("unknown expression: {other}"))),
		}
	}

	async fn cookies(&self, names: Option<&[String]>) -> Result<Vec<Cookie>> {
		let state = self.state.lock().unwrap();
		Ok(state
			.cookies
			.iter()
			.filter(|c| names.is_none_or(|ns| ns.contains(&c.name)))
			.cloned()
			.collect())
	}

	async fn set_cookie(&self, cookie: Cookie) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push(format!("set_cookie {}", cookie.name));
		state.cookies.retain(|c| c.name != cookie.name);
		state.cookies.push(cookie);
		Ok(())
	}

	async fn delete_cookies(&self, names: Option<&[String]>) -> Result<()> {
		let mut state = self.state.lock().unwrap();
		state.log.push("delete_cookies".to_string());
		match names {
			Some(names) => state.cookies.retain(|c| !names.contains(&c.name)),
			None => state.cookies.clear(),
		}
		Ok(())
	}

	async fn screenshot(&self, node: Option<&NodeId>) -> Result<Vec<u8>> {
		let mut state = self.state.lock().unwrap();
		let subject = match node {
			Some(node) => {
				self.position(&state, node)?;
				node.to_string()
			}
			None => "viewport".to_string(),
		};
		state.log.push(format!("screenshot {subject}"));
		Ok(format!("PNG:{}:{subject}", state.url).into_bytes())
	}
}
