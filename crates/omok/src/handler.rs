//! Per-connection handler: auth loop, writer task, inbound routing.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Loop: receive lines, honoring only `AUTH` until the client is
//!      seated. A failed `AUTH` answers `AUTH_FAIL` and keeps the
//!      connection open for another try.
//!   2. Once seated, spawn a writer task pumping the seat's outbound
//!      queue onto the socket.
//!   3. Loop: parse inbound lines and forward them to the coordinator.
//!      Unparseable lines are logged and dropped, never fatal.

use std::sync::Arc;

use omok_protocol::{AuthMode, ClientMessage, ServerMessage, Slot};
use omok_session::{AccountStore, SessionError, SessionHandle};
use omok_transport::{Channel, WsChannel};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::OmokError;

/// Drop guard that releases a player's seat when the handler exits.
///
/// This ensures cleanup happens even if the handler panics. `leave` is
/// a plain channel send, so no task needs to be spawned from `Drop`.
struct SeatGuard {
    slot: Slot,
    session: SessionHandle,
}

impl Drop for SeatGuard {
    fn drop(&mut self) {
        self.session.leave(self.slot);
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<S: AccountStore>(
    conn: WsChannel,
    state: Arc<ServerState<S>>,
) -> Result<(), OmokError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");
    let conn = Arc::new(conn);

    // --- Step 1: authenticate and claim a seat ---
    let Some((slot, name, outbound)) = authenticate(&conn, &state).await? else {
        // Closed before authenticating, or the server was full.
        return Ok(());
    };
    tracing::info!(%conn_id, %slot, name, "player seated");

    let _guard = SeatGuard {
        slot,
        session: state.session.clone(),
    };

    // --- Step 2: writer task ---
    // The coordinator pushes into `outbound`; this task owns the only
    // send path for the rest of the connection's life.
    let writer_conn = Arc::clone(&conn);
    let writer = tokio::spawn(async move {
        let mut outbound = outbound;
        while let Some(message) = outbound.recv().await {
            if let Err(e) = writer_conn.send(&message.to_string()).await {
                tracing::debug!(error = %e, "outbound write failed");
                break;
            }
        }
    });

    // --- Step 3: inbound loop ---
    loop {
        match conn.recv().await {
            Ok(Some(line)) => match line.parse::<ClientMessage>() {
                Ok(message) => state.session.inbound(slot, message),
                Err(e) => {
                    tracing::debug!(%slot, error = %e, "ignoring unparseable line");
                }
            },
            Ok(None) => {
                tracing::info!(%slot, name, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%slot, error = %e, "recv error");
                break;
            }
        }
    }

    // Release the seat now; the coordinator then drops our outbound
    // sender, which lets the writer task drain and exit.
    drop(_guard);
    let _ = writer.await;
    Ok(())
}

/// Runs the pre-seat loop: only `AUTH` is honored, anything else is
/// dropped. Returns `None` when the client goes away or the server is
/// full (in which case `SERVER_FULL` was sent and the socket closed).
async fn authenticate<S: AccountStore>(
    conn: &Arc<WsChannel>,
    state: &Arc<ServerState<S>>,
) -> Result<Option<(Slot, String, mpsc::UnboundedReceiver<ServerMessage>)>, OmokError> {
    loop {
        let line = match conn.recv().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::debug!(error = %e, "recv error before auth");
                return Ok(None);
            }
        };

        let message = match line.parse::<ClientMessage>() {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable line before auth");
                continue;
            }
        };
        let ClientMessage::Auth { mode, user, pass } = message else {
            tracing::debug!("ignoring command from unauthenticated client");
            continue;
        };

        let accepted = match mode {
            AuthMode::Login => state.accounts.authenticate(&user, &pass).await,
            AuthMode::Register => state.accounts.register(&user, &pass).await,
        };
        let accepted = match accepted {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "account store failure");
                false
            }
        };

        if !accepted {
            let reason = match mode {
                AuthMode::Login => "invalid credentials",
                AuthMode::Register => "name already taken",
            };
            let fail = ServerMessage::AuthFail {
                reason: reason.to_string(),
            };
            conn.send(&fail.to_string()).await?;
            continue;
        }

        let (sender, outbound) = mpsc::unbounded_channel();
        match state.session.join(user.clone(), sender).await {
            Ok(slot) => return Ok(Some((slot, user, outbound))),
            Err(SessionError::ServerFull) => {
                conn.send(&ServerMessage::ServerFull.to_string()).await?;
                let _ = conn.close().await;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
    }
}
