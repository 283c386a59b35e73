//! `OmokServer` builder and accept loop.
//!
//! This is the entry point for running the match server. It ties the
//! layers together: transport → protocol → session.

use std::sync::Arc;

use omok_session::{spawn_session, AccountStore, MatchLedger, SessionConfig, SessionHandle};
use omok_transport::{Transport, WsTransport};

use crate::handler::handle_connection;
use crate::OmokError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// session handle is itself cloneable; the account store is only ever
/// used through `&self`.
pub(crate) struct ServerState<S: AccountStore> {
    pub(crate) accounts: S,
    pub(crate) session: SessionHandle,
}

/// Builder for configuring and starting an Omok server.
///
/// # Example
///
/// ```rust,ignore
/// let server = OmokServerBuilder::new()
///     .bind("0.0.0.0:5000")
///     .build(accounts, ledger)
///     .await?;
/// server.run().await
/// ```
pub struct OmokServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
}

impl OmokServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration (turn limit, chat history cap).
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Binds the listener, spawns the session coordinator, and returns
    /// the server ready to [`run`](OmokServer::run).
    pub async fn build<S: AccountStore, L: MatchLedger>(
        self,
        accounts: S,
        ledger: L,
    ) -> Result<OmokServer<S>, OmokError> {
        let transport = WsTransport::bind(&self.bind_addr).await?;
        let session = spawn_session(self.session_config, ledger);

        let state = Arc::new(ServerState { accounts, session });
        Ok(OmokServer { transport, state })
    }
}

impl Default for OmokServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Omok match server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct OmokServer<S: AccountStore> {
    transport: WsTransport,
    state: Arc<ServerState<S>>,
}

impl<S: AccountStore> OmokServer<S> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), OmokError> {
        tracing::info!("omok server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
