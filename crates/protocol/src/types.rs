//! Core protocol types used across the engine boundary.
//!
//! These types represent primitive values and enums exchanged with an
//! automation engine session.

use serde::{Deserialize, Serialize};

/// Window or element geometry in screen pixels.
///
/// A plain value describing bounds returned by window and element rect
/// queries. No identity, no lifecycle beyond the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
	/// X coordinate of the top-left corner
	pub x: i64,
	/// Y coordinate of the top-left corner
	pub y: i64,
	/// Width in pixels
	pub width: i64,
	/// Height in pixels
	pub height: i64,
}

impl Rect {
	/// Creates a rectangle from origin and size.
	pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}
}

/// Mouse button for pointer actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
	/// Left mouse button (default)
	#[default]
	Left,
	/// Right mouse button
	Right,
	/// Middle mouse button
	Middle,
}

/// Simulated pointer input dispatched against one element.
///
/// This is the engine-side input vocabulary; each normalized interaction
/// command (`click`, `double_click`, `hover`, ...) maps onto exactly one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerAction {
	/// Press and release a mouse button `count` times at the element center.
	Click {
		/// Button to press
		button: MouseButton,
		/// Number of presses (2 for a double click)
		count: u32,
	},
	/// Move the pointer over the element center without pressing.
	Hover,
	/// Press at the element center, move by the given offset, release.
	Drag {
		/// Horizontal offset in pixels
		dx: i64,
		/// Vertical offset in pixels
		dy: i64,
	},
	/// Single touch contact at the element center.
	Tap,
	/// Touch contact moved by the given offset before release.
	Swipe {
		/// Horizontal offset in pixels
		dx: i64,
		/// Vertical offset in pixels
		dy: i64,
	},
}

impl PointerAction {
	/// Single primary-button click.
	pub const fn click() -> Self {
		Self::Click {
			button: MouseButton::Left,
			count: 1,
		}
	}

	/// Single click with an explicit button.
	pub const fn click_with(button: MouseButton) -> Self {
		Self::Click { button, count: 1 }
	}

	/// Primary-button double click.
	pub const fn double_click() -> Self {
		Self::Click {
			button: MouseButton::Left,
			count: 2,
		}
	}
}
