//! Key names for global key presses.
//!
//! These follow the engine's key vocabulary and are accepted by
//! [`send_keys`](crate::FunctionalTestController::send_keys) when no
//! element handle is given.

/// Enter key
pub const ENTER: &str = "enter";
/// Tab key
pub const TAB: &str = "tab";
/// Escape key
pub const ESC: &str = "esc";
/// Backspace key
pub const BACKSPACE: &str = "backspace";
/// Delete key
pub const DELETE: &str = "delete";
/// Space bar
pub const SPACE: &str = "space";
