//! Browser-relayed transport.
//!
//! Some pages only answer a real browser session. The relay hands each URL to
//! a browser-side agent, waits for the body it fetched, and returns it. The
//! agent is reached through [`RelaySession`]; [`BrowserRelay`] is the
//! in-process session that queues URLs for whatever bridge drives the browser
//! (the bridge pulls with [`BrowserRelay::next_request`] and answers with
//! [`RelayRequest::respond`]).
//!
//! Lifecycle: one session per process. `start()` may be called any number of
//! times; `stop()` is final.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, mpsc, oneshot};
use tracing::{debug, info, warn};

use super::{Payload, Transport, TransportError};

/// A long-lived browser session that fetches URLs on request.
#[async_trait]
pub trait RelaySession: Send + Sync {
    /// Starts the session; a no-op when already running.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::RelayStopped`] after [`RelaySession::stop`].
    fn start(&self) -> Result<(), TransportError>;

    /// Tears the session down. Later requests fail with
    /// [`TransportError::RelayStopped`]. A request the browser already holds
    /// still completes when the browser answers or drops it.
    fn stop(&self);

    /// Sends `url` to the browser and waits for the fetched body.
    async fn send_and_wait(&self, url: &str) -> Result<String, TransportError>;
}

/// A URL waiting for the browser to fetch it.
#[derive(Debug)]
pub struct RelayRequest {
    url: String,
    reply: oneshot::Sender<String>,
}

impl RelayRequest {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Delivers the fetched body to the waiting caller.
    pub fn respond(self, body: impl Into<String>) {
        if self.reply.send(body.into()).is_err() {
            warn!(url = %self.url, "relay caller went away before the answer arrived");
        }
    }
}

#[derive(Debug)]
enum RelayState {
    Idle(mpsc::Sender<RelayRequest>),
    Running(mpsc::Sender<RelayRequest>),
    Stopped,
}

/// In-process relay session: a one-slot queue between the crawler and a
/// browser bridge.
#[derive(Debug)]
pub struct BrowserRelay {
    state: Mutex<RelayState>,
    inbox: AsyncMutex<mpsc::Receiver<RelayRequest>>,
    in_flight: AsyncMutex<()>,
}

static SHARED_RELAY: OnceLock<Arc<BrowserRelay>> = OnceLock::new();

impl BrowserRelay {
    /// Creates an idle relay. Most callers want [`BrowserRelay::shared`].
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            state: Mutex::new(RelayState::Idle(tx)),
            inbox: AsyncMutex::new(rx),
            in_flight: AsyncMutex::new(()),
        }
    }

    /// The process-wide relay instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED_RELAY.get_or_init(|| Arc::new(Self::new())))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(*self.lock_state(), RelayState::Running(_))
    }

    /// Waits for the next URL to fetch in the browser.
    ///
    /// Returns `None` once the relay is stopped.
    pub async fn next_request(&self) -> Option<RelayRequest> {
        self.inbox.lock().await.recv().await
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RelayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sender(&self) -> Result<mpsc::Sender<RelayRequest>, TransportError> {
        match &*self.lock_state() {
            RelayState::Running(tx) => Ok(tx.clone()),
            RelayState::Idle(_) => Err(TransportError::RelayNotRunning),
            RelayState::Stopped => Err(TransportError::RelayStopped),
        }
    }
}

impl Default for BrowserRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelaySession for BrowserRelay {
    fn start(&self) -> Result<(), TransportError> {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, RelayState::Stopped) {
            RelayState::Idle(tx) => {
                *state = RelayState::Running(tx);
                info!("browser relay started");
                Ok(())
            }
            running @ RelayState::Running(_) => {
                *state = running;
                Ok(())
            }
            RelayState::Stopped => Err(TransportError::RelayStopped),
        }
    }

    fn stop(&self) {
        let mut state = self.lock_state();
        if matches!(*state, RelayState::Running(_)) {
            info!("browser relay stopped");
        }
        *state = RelayState::Stopped;
    }

    async fn send_and_wait(&self, url: &str) -> Result<String, TransportError> {
        let _serial = self.in_flight.lock().await;
        let tx = self.sender()?;
        let (reply, answer) = oneshot::channel();
        tx.send(RelayRequest {
            url: url.to_string(),
            reply,
        })
        .await
        .map_err(|_| TransportError::relay_closed(url))?;
        debug!(url = %url, "waiting for browser relay");
        answer.await.map_err(|_| TransportError::relay_closed(url))
    }
}

/// Transport that fetches through a browser session.
pub struct RelayedTransport {
    session: Arc<dyn RelaySession>,
}

impl RelayedTransport {
    /// Wraps `session`, starting it if it is not running yet.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::RelayStopped`] when the session was already torn down.
    pub fn new(session: Arc<dyn RelaySession>) -> Result<Self, TransportError> {
        session.start()?;
        Ok(Self { session })
    }
}

impl std::fmt::Debug for RelayedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayedTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for RelayedTransport {
    fn name(&self) -> &'static str {
        "relay"
    }

    #[tracing::instrument(skip(self), fields(transport = "relay"))]
    async fn request(&self, url: &str) -> Result<Payload, TransportError> {
        let text = self.session.send_and_wait(url).await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Payload::Json(value)),
            Err(_) => {
                debug!(url = %url, "relay body is not JSON; returning raw text");
                Ok(Payload::Text(text))
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        self.session.send_and_wait(url).await
    }
}
