//! Configuration for the Matisse Commander client
//!
//! Centralized configuration with the defaults Matisse Commander ships with.

use std::time::Duration;

use crate::error::{MatisseError, Result};

/// Connection settings for a [`Commander`](crate::Commander)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Host of the Matisse Commander TCP server
    pub host: String,

    /// Port of the Matisse Commander TCP server
    pub port: u16,

    /// Timeout applied to connect, send and receive
    pub timeout: Duration,

    // -------------------------------------------------------------------------
    // Close Handshake
    // -------------------------------------------------------------------------
    /// Wait between sending the close notification and dropping the socket.
    /// Matisse Commander drops the notification if the stream goes away sooner.
    pub close_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 30000,
            timeout: Duration::from_secs(1),
            close_delay: Duration::from_millis(300),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` as accepted by `ToSocketAddrs`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host name or IP address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the network timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the network timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout = Duration::from_millis(ms);
        self
    }

    /// Set the settling delay used by `disconnect`
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.config.close_delay = delay;
        self
    }

    /// Finish the config
    ///
    /// Sockets reject a zero timeout, so it is refused here rather than at
    /// connect time.
    pub fn build(self) -> Result<Config> {
        if self.config.host.is_empty() {
            return Err(MatisseError::Config("host must not be empty".to_string()));
        }
        if self.config.timeout.is_zero() {
            return Err(MatisseError::Config("timeout must be non-zero".to_string()));
        }

        Ok(self.config)
    }
}
