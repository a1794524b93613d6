//! WebSocket listener and reconnect loop
//!
//! One background tokio task owns the connect/receive/reconnect cycle.
//! Received text frames are pushed into an unbounded channel; the
//! receiving half is handed to the caller by [`WsListener::connect_and_listen`].
//! Cancellation is cooperative: [`WsListener::dispose`] flips a watch flag
//! that the task observes at the top of the loop and at every await point,
//! so an in-flight receive may complete once before the task stops.

use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_with_config, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::WsListenerConfig;
use crate::{Result, WsError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ----------------------------------------------------------------------------
// WsListener
// ----------------------------------------------------------------------------

/// Handle onto the background listening task.
///
/// Owns at most one session loop at a time; starting a new one tears the
/// previous one down first.
pub struct WsListener {
    config: WsListenerConfig,
    cancel_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl WsListener {
    /// Validate the configuration and create a listener.
    ///
    /// This is the only point where errors surface synchronously: an
    /// unparsable or non-WebSocket URL and a zero message size bound are
    /// fatal configuration errors.
    pub fn new(config: WsListenerConfig) -> Result<Self> {
        let url = Url::parse(&config.url)?;
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(WsError::Configuration(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }
        if config.max_message_size == 0 {
            return Err(WsError::Configuration(
                "max_message_size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            config,
            cancel_tx: None,
            task: None,
        })
    }

    /// Start the background connect/receive/reconnect loop.
    ///
    /// Any previously started loop is cancelled first. Returns immediately
    /// with the receiving half of the frame channel; the channel closes
    /// when the loop terminates (single-shot exhaustion or disposal).
    pub fn connect_and_listen(&mut self) -> mpsc::UnboundedReceiver<String> {
        self.dispose();

        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let config = self.config.clone();

        self.task = Some(tokio::spawn(listener_loop(config, frame_tx, cancel_rx)));
        self.cancel_tx = Some(cancel_tx);

        frame_rx
    }

    /// Request cancellation of the background loop.
    ///
    /// Safe to call repeatedly. Cancellation is best-effort: an in-flight
    /// receive may complete once before the loop observes the signal.
    pub fn dispose(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(true);
        }
        self.task = None;
    }
}

impl Drop for WsListener {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ----------------------------------------------------------------------------
// Session Loop
// ----------------------------------------------------------------------------

async fn listener_loop(
    config: WsListenerConfig,
    frame_tx: mpsc::UnboundedSender<String>,
    mut cancel_rx: watch::Receiver<bool>,
) {
    let ws_config = WebSocketConfig {
        max_message_size: Some(config.max_message_size),
        ..Default::default()
    };

    loop {
        if *cancel_rx.borrow() {
            break;
        }

        match connect_async_with_config(config.url.as_str(), Some(ws_config), false).await {
            Ok((stream, _response)) => {
                info!("Connected to {}", config.url);
                run_session(stream, &frame_tx, &mut cancel_rx, config.read_delay).await;
                debug!("Session with {} ended", config.url);
            }
            Err(e) => {
                warn!("Connection to {} failed: {}", config.url, e);
            }
        }

        match config.reconnect_interval {
            Some(interval) => {
                tokio::select! {
                    _ = sleep(interval) => {}
                    _ = cancel_rx.changed() => break,
                }
            }
            None => break,
        }
    }

    debug!("Listener loop for {} terminated", config.url);
}

/// Receive frames from one open session until it closes, errors, or
/// cancellation is observed. The session socket is dropped on return.
async fn run_session(
    mut stream: WsStream,
    frame_tx: &mpsc::UnboundedSender<String>,
    cancel_rx: &mut watch::Receiver<bool>,
    read_delay: Duration,
) {
    loop {
        let frame = tokio::select! {
            _ = cancel_rx.changed() => {
                let _ = stream.close(None).await;
                return;
            }
            frame = stream.next() => frame,
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                debug!("Received text frame ({} bytes)", text.len());
                if frame_tx.send(text).is_err() {
                    // Receiver dropped, nobody is listening anymore
                    let _ = stream.close(None).await;
                    return;
                }
                sleep(read_delay).await;
            }
            Some(Ok(Message::Close(_))) => {
                let _ = stream.close(None).await;
                return;
            }
            Some(Ok(_)) => {
                // Binary, ping and pong frames are out of scope
            }
            Some(Err(e)) => {
                debug!("Receive error, treating as connection loss: {}", e);
                return;
            }
            None => return,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_url() {
        let config = WsListenerConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            WsListener::new(config),
            Err(WsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_non_websocket_scheme() {
        let config = WsListenerConfig {
            url: "http://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            WsListener::new(config),
            Err(WsError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_message_size() {
        let config = WsListenerConfig {
            max_message_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            WsListener::new(config),
            Err(WsError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_dispose_is_idempotent() {
        let mut listener = WsListener::new(WsListenerConfig::default()).unwrap();
        listener.dispose();
        listener.dispose();
    }
}
