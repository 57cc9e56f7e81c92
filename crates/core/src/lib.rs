//! ftc: engine-agnostic functional test controller for browser automation.
//!
//! Test suites drive a browser through [`FunctionalTestController`], a
//! normalized, WebDriver-shaped command vocabulary: navigation, element
//! lookup, element state, simulated input, script execution, cookies, and
//! screenshots. One adapter per automation engine implements that contract,
//! so a suite written against the trait runs unchanged when the engine
//! underneath is swapped.
//!
//! [`SessionController`] is the adapter over a live
//! [`SessionDriver`](ftc_runtime::SessionDriver) session. Element lookups
//! return [`ElementHandle`] values: opaque carriers for engine-native
//! element references that test code can hold and pass back into later
//! commands without ever seeing engine state.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use ftc::{FunctionalTestController, SessionController, keys};
//! use ftc_runtime::{Fixture, FixtureSpec, Launcher};
//!
//! async fn search(launcher: Arc<dyn Launcher>) -> ftc::Result<()> {
//!     let fixture = Fixture::set_up(
//!         FixtureSpec::new("search", vec!["chrome".to_string()]),
//!         launcher,
//!     )
//!     .await?;
//!     let controller = SessionController::new(fixture.session());
//!
//!     controller.navigate_to("https://forge.test/").await?;
//!
//!     let input = controller.find_element(".header-search-input").await?;
//!     controller.send_keys(Some(&input), "test-runner").await?;
//!     controller.send_keys(None, keys::ENTER).await?;
//!
//!     let title = controller.get_title().await?;
//!     assert!(title.contains("test-runner"));
//!
//!     fixture.tear_down()?;
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod element_handle;
pub mod keys;
pub mod session;

pub use controller::{FunctionalTestController, PendingScript};
pub use element_handle::ElementHandle;
pub use session::SessionController;

// Re-export protocol types for convenience
pub use ftc_protocol;
pub use ftc_protocol::{Cookie, MouseButton, Rect, SameSite};

// Re-export the runtime for adapter implementors
pub use ftc_runtime;

// Re-export Error and Result from ftc-runtime
pub use ftc_runtime::{Error, Result};
