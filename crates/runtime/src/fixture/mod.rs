//! Fixture lifecycle: definition artifact, runner launch, session intake.
//!
//! Setting up a fixture means writing the transient test-definition file
//! the engine runner consumes, reserving a disjoint port pair for its
//! servers, starting the runner, and suspending until the runner hands a
//! live session across the one-shot [`handoff`]. Teardown deletes the
//! artifact. The runner itself is an external collaborator reached through
//! the [`Launcher`] trait; it owns browser processes and the per-test
//! timeout.


use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::handoff::{self, SessionCapture};
use crate::session::SessionDriver;
use crate::{Error, Result};

/// Directory name constants for test run output.
///
/// These match the layout the engine runner is configured with and are used
/// consistently by fixture setup and failure screenshot placement.
pub mod dirs {
	/// Root directory for run output
	pub const REPORTS: &str = "reports";
	/// Screenshot directory name (inside reports/)
	pub const SCREENSHOTS: &str = "screenshots";
}

/// First port handed out by the process-wide allocator.
const BASE_PORT: u16 = 1338;

/// Default time to wait for the runner to capture a session.
const SETUP_TIMEOUT: Duration = Duration::from_secs(20);

/// Process-wide allocator backing [`Fixture::set_up`].
static PORTS: PortAllocator = PortAllocator::starting_at(BASE_PORT);

/// Renders the definition the engine runner loads for one fixture: a single
/// test whose body is the session capture hook, with an after-hook that
/// records a screenshot when the body failed.
fn definition(fixture_name: &str) -> String {
	format!(
		"fixture('{fixture_name}')\n\
		 test('test', captureSession)\n\
		 \t.after(async t => {{\n\
		 \t\tawait screenshotOnFailure(t);\n\
		 \t}});\n"
	)
}

/// Transient test-definition artifact consumed by the engine runner.
///
/// Exists only for the duration of one fixture: removed explicitly by
/// [`cleanup`](TestArtifact::cleanup), best-effort on drop.
pub struct TestArtifact {
	path: PathBuf,
	removed: bool,
}

impl TestArtifact {
	/// Writes the definition for `fixture_name` into `dir`.
	pub fn create(dir: &Path, fixture_name: &str) -> Result<Self> {
		let path = dir.join(format!("{fixture_name}.test.js"));
		std::fs::write(&path, definition(fixture_name))?;
		debug!(path = %path.display(), "test definition written");
		Ok(Self {
			path,
			removed: false,
		})
	}

	/// Path to the definition file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Removes the definition file.
	pub fn cleanup(mut self) -> Result<()> {
		self.removed = true;
		std::fs::remove_file(&self.path)?;
		debug!(path = %self.path.display(), "test definition removed");
		Ok(())
	}
}

impl Drop for TestArtifact {
	fn drop(&mut self) {
		if !self.removed {
			let _ = std::fs::remove_file(&self.path);
		}
	}
}

/// A pair of adjacent network ports reserved for one engine runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
	/// Primary server port
	pub primary: u16,
	/// Secondary server port
	pub secondary: u16,
}

/// Hands out disjoint adjacent port pairs so concurrent sessions never
/// collide on their runner servers.
pub struct PortAllocator {
	base: u16,
	iteration: AtomicU16,
}

impl PortAllocator {
	/// Creates an allocator whose first pair starts at `base`.
	pub const fn starting_at(base: u16) -> Self {
		Self {
			base,
			iteration: AtomicU16::new(0),
		}
	}

	/// Reserves the next unused pair.
	pub fn next_pair(&self) -> PortPair {
		let i = self.iteration.fetch_add(1, Ordering::SeqCst);
		PortPair {
			primary: self.base + i * 2,
			secondary: self.base + i * 2 + 1,
		}
	}
}

impl Default for PortAllocator {
	fn default() -> Self {
		Self::starting_at(BASE_PORT)
	}
}

/// Configuration handed to the engine runner for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
	/// Hostname the runner servers bind to
	pub host: String,
	/// Reserved port pair for the runner servers
	pub ports: PortPair,
	/// Path to the test-definition artifact
	pub src: PathBuf,
	/// Browser targets to run against
	pub browsers: Vec<String>,
	/// Directory failure screenshots are written under
	pub screenshots_dir: PathBuf,
	/// Capture a screenshot when the test body fails
	pub screenshot_on_failure: bool,
}

/// Entry point of the external engine runner.
///
/// Implementations start the engine against `config` and fulfill `capture`
/// exactly once a live session exists. The runner owns browser processes
/// and the per-test timeout; nothing in this crate cancels a launched run.
#[async_trait]
pub trait Launcher: Send + Sync {
	/// Starts the runner and keeps it alive until its run completes.
	async fn launch(&self, config: RunConfig, capture: SessionCapture) -> Result<()>;
}

/// What to set up for one fixture.
#[derive(Debug, Clone)]
pub struct FixtureSpec {
	/// Fixture name; also names the definition artifact
	pub name: String,
	/// Browser targets
	pub browsers: Vec<String>,
	/// Directory the artifact is written into
	pub dir: PathBuf,
	/// How long to wait for the runner to capture a session
	pub setup_timeout: Duration,
}

impl FixtureSpec {
	/// Creates a spec with the working directory and default timeout.
	pub fn new(name: impl Into<String>, browsers: Vec<String>) -> Self {
		Self {
			name: name.into(),
			browsers,
			dir: PathBuf::from("."),
			setup_timeout: SETUP_TIMEOUT,
		}
	}

	/// Writes the artifact into `dir` instead of the working directory.
	pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.dir = dir.into();
		self
	}

	/// Overrides the session capture timeout.
	pub fn setup_timeout(mut self, timeout: Duration) -> Self {
		self.setup_timeout = timeout;
		self
	}
}

/// One set-up fixture: a live session plus the artifact backing it.
pub struct Fixture {
	session: Arc<dyn SessionDriver>,
	artifact: TestArtifact,
}

impl Fixture {
	/// Sets up a fixture: writes the definition artifact, reserves ports,
	/// starts the runner, and waits for the session hand-off.
	///
	/// # Errors
	///
	/// Returns [`Error::SetupTimeout`] if no session is captured within the
	/// spec's timeout, or [`Error::HandoffClosed`] if the runner exits
	/// without capturing one.
	pub async fn set_up(spec: FixtureSpec, launcher: Arc<dyn Launcher>) -> Result<Self> {
		let artifact = TestArtifact::create(&spec.dir, &spec.name)?;
		let ports = PORTS.next_pair();
		let config = RunConfig {
			host: "localhost".to_string(),
			ports,
			src: artifact.path().to_path_buf(),
			browsers: spec.browsers.clone(),
			screenshots_dir: Path::new(dirs::REPORTS).join(dirs::SCREENSHOTS),
			screenshot_on_failure: true,
		};

		let (capture, intake) = handoff::pair();
		info!(
			fixture = %spec.name,
			primary = ports.primary,
			secondary = ports.secondary,
			"starting engine runner"
		);
		tokio::spawn(async move {
			if let Err(err) = launcher.launch(config, capture).await {
				error!(%err, "engine runner exited with error");
			}
		});

		let session = tokio::time::timeout(spec.setup_timeout, intake.session())
			.await
			.map_err(|_| Error::SetupTimeout {
				waited_ms: spec.setup_timeout.as_millis() as u64,
			})??;
		debug!(fixture = %spec.name, "session captured");

		Ok(Self { session, artifact })
	}

	/// The captured session.
	pub fn session(&self) -> Arc<dyn SessionDriver> {
		Arc::clone(&self.session)
	}

	/// Tears the fixture down, removing the definition artifact.
	///
	/// The session itself belongs to the runner and ends with its run; only
	/// the artifact is this crate's to delete.
	pub fn tear_down(self) -> Result<()> {
		self.artifact.cleanup()
	}
}

/// Captures a full-viewport screenshot and writes it under `reports_dir`.
///
/// Invoked by test harnesses when a test body fails; the controller layer
/// never triggers this on its own.
pub async fn failure_screenshot(
	session: &dyn SessionDriver,
	reports_dir: &Path,
	test_name: &str,
) -> Result<PathBuf> {
	let bytes = session.screenshot(None).await?;

	let dir = reports_dir.join(dirs::SCREENSHOTS);
	tokio::fs::create_dir_all(&dir).await?;
	let path = dir.join(format!("{}.png", sanitize(test_name)));
	tokio::fs::write(&path, &bytes).await?;
	info!(path = %path.display(), "failure screenshot written");
	Ok(path)
}

/// Flattens a test name into a filesystem-safe file stem.
fn sanitize(name: &str) -> String {
	name.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
				c
			} else {
				'_'
			}
		})
		.collect()
}
