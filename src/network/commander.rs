//! Commander
//!
//! Client for the Matisse Commander TCP server: connection lifecycle plus
//! the query/set request-response exchange.

use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::{MatisseError, Result};
use crate::protocol::{parse_response, Command, SetValue, Value, SERVER_ALIVE, SET_OK};
use super::Connection;

/// Blocking client for Matisse Commander
///
/// ## Exchange Model
/// Every operation sends one frame and waits for exactly one reply before
/// returning. Replies carry no request identifier, so a `Commander` must not
/// be shared between threads without external locking.
///
/// ## Lifecycle
/// ```text
/// Disconnected ──connect()──▶ Connected ──disconnect()──▶ Disconnected
/// ```
/// `connect` while connected and `disconnect` while disconnected do nothing.
/// A failed send or receive drops the socket: the stream may still hold a
/// late reply, and replies cannot be matched to requests, so the caller
/// must reconnect.
pub struct Commander {
    /// Connection settings
    config: Config,

    /// Open stream, `None` while disconnected
    connection: Option<Connection>,
}

impl Commander {
    /// Create a disconnected client
    pub fn new(config: Config) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Establish the TCP connection
    pub fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Ok(());
        }

        let connection = Connection::open(&self.config)?;
        tracing::debug!("Connected to Matisse Commander at {}", connection.peer_addr());
        self.connection = Some(connection);

        Ok(())
    }

    /// Close the connection using the configured settling delay
    pub fn disconnect(&mut self) -> Result<()> {
        self.disconnect_with_delay(self.config.close_delay)
    }

    /// Close the connection
    ///
    /// Sends `Close_Network_Connection`, waits `delay`, then drops the
    /// socket. The socket is released even when the notification cannot be
    /// sent; that failure is returned after the teardown.
    pub fn disconnect_with_delay(&mut self, delay: Duration) -> Result<()> {
        let mut connection = match self.connection.take() {
            Some(connection) => connection,
            None => return Ok(()),
        };

        let notified = connection.send(&Command::CloseConnection.payload());
        if let Err(ref e) = notified {
            tracing::warn!(
                "Close notification to {} failed: {}",
                connection.peer_addr(),
                e
            );
        }

        thread::sleep(delay);

        tracing::debug!("Disconnected from {}", connection.peer_addr());
        connection.close();

        notified.map(|_| ())
    }

    /// True while a socket is held
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    // =========================================================================
    // Raw Frames
    // =========================================================================

    /// Send a raw command, returning the number of bytes written
    pub fn send(&mut self, command: &str) -> Result<usize> {
        self.on_connection(|connection| connection.send(command))
    }

    /// Receive a raw response
    pub fn receive(&mut self) -> Result<String> {
        self.on_connection(|connection| connection.receive())
    }

    // =========================================================================
    // Request/Response
    // =========================================================================

    /// Query a variable
    ///
    /// A trailing `?` on `variable` is optional. The echoed name in the reply
    /// is discarded.
    pub fn query(&mut self, variable: &str) -> Result<Value> {
        self.send(&Command::query(variable).payload())?;
        let response = self.receive()?;
        let (_, value) = parse_response(&response)?;

        Ok(value)
    }

    /// Set a variable
    ///
    /// Returns true if the device acknowledged with `OK`. Any other reply is
    /// reported as `false`, not as an error.
    pub fn set(&mut self, variable: &str, value: impl Into<SetValue>) -> Result<bool> {
        let response = self.exchange_set(variable, value.into())?;
        Ok(response == SET_OK)
    }

    /// Set a variable, failing with `SetRejected` unless the device replies `OK`
    pub fn set_checked(&mut self, variable: &str, value: impl Into<SetValue>) -> Result<()> {
        let response = self.exchange_set(variable, value.into())?;

        if response == SET_OK {
            Ok(())
        } else {
            Err(MatisseError::SetRejected {
                variable: variable.to_string(),
                response,
            })
        }
    }

    /// Send `VARIABLE VALUE` and return the raw, unenveloped reply
    fn exchange_set(&mut self, variable: &str, value: SetValue) -> Result<String> {
        self.send(&Command::set(variable, value).payload())?;
        let response = self.receive()?;

        if response != SET_OK {
            tracing::debug!("Set {} answered with {:?}", variable, response);
        }

        Ok(response)
    }

    /// Check whether the server still answers
    ///
    /// Never fails: a disconnected client, a failed send, or a failed or
    /// unexpected reply all yield `false`.
    pub fn server_alive(&mut self) -> bool {
        let connection = match self.connection.as_mut() {
            Some(connection) => connection,
            None => return false,
        };

        let reply = connection
            .send(&Command::ConnectionValid.payload())
            .and_then(|_| connection.receive());

        match reply {
            Ok(text) => text == SERVER_ALIVE,
            Err(e) => {
                tracing::warn!("Liveness check failed: {}", e);
                self.drop_connection();
                false
            }
        }
    }

    /// Run one frame operation, dropping the socket if it fails
    fn on_connection<T>(
        &mut self,
        operation: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let connection = self.connection.as_mut().ok_or(MatisseError::NotConnected)?;

        operation(connection).map_err(|e| {
            tracing::warn!("Dropping connection after failed exchange: {}", e);
            self.drop_connection();
            e
        })
    }

    /// Release the socket without the close handshake
    fn drop_connection(&mut self) {
        if let Some(connection) = self.connection.take() {
            tracing::debug!("Disconnected from {} without handshake", connection.peer_addr());
            connection.close();
        }
    }
}

impl Default for Commander {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
