//! Connection
//!
//! Owns the TCP stream to Matisse Commander and moves frames across it.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{MatisseError, Result};
use crate::protocol::{read_frame, write_frame};

/// An open stream to Matisse Commander
pub struct Connection {
    /// TCP stream reader (buffered)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered, flushed after every frame)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a stream to `config.addr()`
    ///
    /// `config.timeout` bounds the connect attempt and every later read and
    /// write on the stream.
    pub fn open(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let stream = connect_any(&addr, config.timeout)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| addr.clone());

        // Disable Nagle's algorithm, every frame is a complete request
        stream.set_nodelay(true).map_err(connection_error)?;
        stream
            .set_read_timeout(Some(config.timeout))
            .map_err(connection_error)?;
        stream
            .set_write_timeout(Some(config.timeout))
            .map_err(connection_error)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone().map_err(connection_error)?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Send one command frame, returning the bytes written
    pub fn send(&mut self, payload: &str) -> Result<usize> {
        let sent = write_frame(&mut self.writer, payload)?;
        tracing::trace!("Sent {:?} ({} bytes) to {}", payload, sent, self.peer_addr);
        Ok(sent)
    }

    /// Receive one response frame
    pub fn receive(&mut self) -> Result<String> {
        let payload = read_frame(&mut self.reader)?;
        tracing::trace!("Received {:?} from {}", payload, self.peer_addr);
        Ok(payload)
    }

    /// Shut down both directions of the stream
    ///
    /// Errors are ignored: the peer may already have gone away.
    pub fn close(self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Try every address `addr` resolves to, returning the first that connects
fn connect_any(addr: &str, timeout: Duration) -> Result<TcpStream> {
    let candidates = addr
        .to_socket_addrs()
        .map_err(|e| MatisseError::Connection(format!("Cannot resolve {}: {}", addr, e)))?;

    let mut last_error = None;
    for candidate in candidates {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", candidate, e);
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => MatisseError::Connection(format!("Cannot connect to {}: {}", addr, e)),
        None => MatisseError::Connection(format!("{} resolved to no addresses", addr)),
    })
}

fn connection_error(e: std::io::Error) -> MatisseError {
    MatisseError::Connection(e.to_string())
}
