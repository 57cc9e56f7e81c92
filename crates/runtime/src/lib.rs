//! Session runtime for engine-agnostic functional testing.
//!
//! This crate owns everything between a test harness and a concrete
//! automation engine: the [`SessionDriver`] contract a live engine session
//! implements, client scripts bound to one session before use, the one-shot
//! session hand-off used while a runner boots, fixture setup/teardown, and
//! the error taxonomy shared by every layer above.
//!
//! The normalized command facade built on top of a session lives in
//! `ftc-rs`.

pub mod error;
pub mod fixture;
pub mod handoff;
pub mod script;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
pub use fixture::{
	Fixture, FixtureSpec, Launcher, PortAllocator, PortPair, RunConfig, TestArtifact,
	failure_screenshot,
};
pub use handoff::{SessionCapture, SessionIntake};
pub use script::{BoundScript, ClientScript};
pub use session::SessionDriver;
