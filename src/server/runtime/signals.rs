//! OS signals that trigger graceful shutdown.
use std::{fmt, str::FromStr};

use tokio::sync::mpsc;
use tracing::warn;

/// Signals the default builder listens for.
pub const DEFAULT_SHUTDOWN_SIGNALS: &[ShutdownSignal] =
    &[ShutdownSignal::Terminate, ShutdownSignal::Interrupt];

/// Termination signal forwarded to the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    Terminate,
    Interrupt,
    Hangup,
    Quit,
    User1,
    User2,
}

impl ShutdownSignal {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShutdownSignal::Terminate => "SIGTERM",
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Hangup => "SIGHUP",
            ShutdownSignal::Quit => "SIGQUIT",
            ShutdownSignal::User1 => "SIGUSR1",
            ShutdownSignal::User2 => "SIGUSR2",
        }
    }

    #[cfg(unix)]
    fn kind(&self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            ShutdownSignal::Terminate => SignalKind::terminate(),
            ShutdownSignal::Interrupt => SignalKind::interrupt(),
            ShutdownSignal::Hangup => SignalKind::hangup(),
            ShutdownSignal::Quit => SignalKind::quit(),
            ShutdownSignal::User1 => SignalKind::user_defined1(),
            ShutdownSignal::User2 => SignalKind::user_defined2(),
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized signal name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shutdown signal `{0}`")]
pub struct UnknownSignal(pub String);

impl FromStr for ShutdownSignal {
    type Err = UnknownSignal;

    /// Accepts `SIGTERM`, `sigterm`, and `term` spellings.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        match bare {
            "TERM" => Ok(ShutdownSignal::Terminate),
            "INT" => Ok(ShutdownSignal::Interrupt),
            "HUP" => Ok(ShutdownSignal::Hangup),
            "QUIT" => Ok(ShutdownSignal::Quit),
            "USR1" => Ok(ShutdownSignal::User1),
            "USR2" => Ok(ShutdownSignal::User2),
            _ => Err(UnknownSignal(value.to_owned())),
        }
    }
}

/// Handlers for a set of shutdown signals, installed on construction.
///
/// Signals delivered before [`ShutdownListener::recv`] is polled are queued,
/// so the process never falls back to the default signal action once the
/// listener exists. Dropping the listener removes the forwarding tasks.
pub struct ShutdownListener {
    receiver: mpsc::Receiver<ShutdownSignal>,
    listeners: Vec<tokio::task::JoinHandle<()>>,
}

impl ShutdownListener {
    /// Install a handler for each of `signals`. Must be called inside a
    /// tokio runtime.
    pub fn install(signals: &[ShutdownSignal]) -> Self {
        let (sender, receiver) = mpsc::channel(signals.len().max(1));
        let mut listeners = Vec::with_capacity(signals.len());

        for &signal in signals {
            match listen(signal, sender.clone()) {
                Ok(handle) => listeners.push(handle),
                Err(err) => warn!(
                    target: "fast_mcp::runtime",
                    signal = signal.as_str(),
                    error = %err,
                    "Failed to install shutdown signal handler"
                ),
            }
        }

        Self {
            receiver,
            listeners,
        }
    }

    /// Resolve with the next delivered signal.
    ///
    /// Never resolves when no handler is installed. Cancel safe.
    pub async fn recv(&mut self) -> ShutdownSignal {
        match self.receiver.recv().await {
            Some(signal) => signal,
            None => std::future::pending().await,
        }
    }
}

impl Drop for ShutdownListener {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

impl fmt::Debug for ShutdownListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownListener")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Resolve with the first of `signals` delivered to the process.
///
/// Never resolves when `signals` is empty or no handler could be installed.
pub async fn wait_for_any(signals: &[ShutdownSignal]) -> ShutdownSignal {
    ShutdownListener::install(signals).recv().await
}

#[cfg(unix)]
fn listen(
    signal: ShutdownSignal,
    sender: mpsc::Sender<ShutdownSignal>,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    let mut stream = tokio::signal::unix::signal(signal.kind())?;
    Ok(tokio::spawn(async move {
        if stream.recv().await.is_some() {
            let _ = sender.send(signal).await;
        }
    }))
}

#[cfg(not(unix))]
fn listen(
    signal: ShutdownSignal,
    sender: mpsc::Sender<ShutdownSignal>,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = sender.send(signal).await;
        }
    }))
}
