//! One-shot session hand-off between the engine runner and test code.
//!
//! While a runner boots, the session it will eventually produce does not
//! exist yet. The hand-off bridges that gap: the engine invokes the capture
//! half exactly once when a session goes live, and the fixture suspends on
//! the intake half until that happens. The value is set once and read once;
//! the intake is consumed on use and a second capture is rejected, so a
//! second resolution cannot occur.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use crate::session::SessionDriver;
use crate::{Error, Result};

/// Creates a connected capture/intake pair.
pub fn pair() -> (SessionCapture, SessionIntake) {
	let (tx, rx) = oneshot::channel();
	(
		SessionCapture {
			tx: Mutex::new(Some(tx)),
		},
		SessionIntake { rx },
	)
}

/// Producer half: hands a live session to the waiting consumer.
///
/// The engine runner invokes [`fulfill`](SessionCapture::fulfill) from its
/// capture hook, which only sees `&self`; the sender inside is taken on
/// first use so later calls cannot resolve the hand-off again.
pub struct SessionCapture {
	tx: Mutex<Option<oneshot::Sender<Arc<dyn SessionDriver>>>>,
}

impl SessionCapture {
	/// Fulfills the hand-off with a live session.
	///
	/// # Errors
	///
	/// Returns [`Error::HandoffFulfilled`] if a session was already handed
	/// over, or [`Error::HandoffClosed`] if the intake half is gone.
	pub fn fulfill(&self, session: Arc<dyn SessionDriver>) -> Result<()> {
		let tx = self.tx.lock().take().ok_or(Error::HandoffFulfilled)?;
		tx.send(session).map_err(|_| Error::HandoffClosed)?;
		debug!("session handed off");
		Ok(())
	}
}

/// Consumer half: suspends until the engine captures a session.
pub struct SessionIntake {
	rx: oneshot::Receiver<Arc<dyn SessionDriver>>,
}

impl SessionIntake {
	/// Waits for the session the runner will capture.
	///
	/// # Errors
	///
	/// Returns [`Error::HandoffClosed`] if the capture half was dropped
	/// without fulfilling.
	pub async fn session(self) -> Result<Arc<dyn SessionDriver>> {
		self.rx.await.map_err(|_| Error::HandoffClosed)
	}
}
