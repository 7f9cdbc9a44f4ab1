//! Frame codec
//!
//! Encoding and decoding of length-prefixed frames.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (4)  │         Payload             │
//! └──────────┴─────────────────────────────┘
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MatisseError, Result};

/// Header size: 4 bytes big-endian payload length
pub const HEADER_SIZE: usize = 4;

/// Unenveloped reply acknowledging a set request
pub const SET_OK: &str = "OK";

/// Unenveloped reply to the liveness check
pub const SERVER_ALIVE: &str = "Server alive";

// =============================================================================
// Pure Encoding/Decoding
// =============================================================================

/// Encode a payload into a frame
///
/// Format: payload_len (4) + payload
pub fn encode_frame(payload: &[u8]) -> Result<Bytes> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        MatisseError::Transmission(format!(
            "Payload too large: {} bytes (max {})",
            payload.len(),
            u32::MAX
        ))
    })?;

    let mut frame = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    frame.put_u32(len);
    frame.put_slice(payload);

    Ok(frame.freeze())
}

/// Interpret a frame header as the big-endian payload length
pub fn decode_length(header: [u8; HEADER_SIZE]) -> u32 {
    u32::from_be_bytes(header)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one ASCII command as a frame
///
/// Returns the number of bytes written, header included. A write that fails
/// part way through is reported as an error; nothing is retried.
pub fn write_frame<W: Write>(writer: &mut W, payload: &str) -> Result<usize> {
    if !payload.is_ascii() {
        return Err(MatisseError::Transmission(format!(
            "Command is not ASCII: {:?}",
            payload
        )));
    }

    let frame = encode_frame(payload.as_bytes())?;

    writer
        .write_all(&frame)
        .and_then(|_| writer.flush())
        .map_err(|e| MatisseError::Transmission(format!("Failed to send {:?}: {}", payload, e)))?;

    Ok(frame.len())
}

/// Read one complete frame and return its ASCII payload
///
/// Blocks until the header and the full declared body have arrived.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<String> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => MatisseError::Protocol(
            "Device did not send data length. Connection closed?".to_string(),
        ),
        _ => MatisseError::Protocol(format!("Failed to read data length: {}", e)),
    })?;

    let payload_len = decode_length(header) as usize;

    // Grow with the data actually received; the header alone is untrusted
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(payload_len as u64)
        .read_to_end(&mut payload)
        .map_err(|e| {
            MatisseError::Protocol(format!(
                "Failed to read {} byte payload: {}",
                payload_len, e
            ))
        })?;

    if payload.len() < payload_len {
        return Err(MatisseError::Protocol(format!(
            "Incomplete payload: expected {} bytes before connection closed, got {}",
            payload_len,
            payload.len()
        )));
    }

    if !payload.is_ascii() {
        return Err(MatisseError::Protocol(format!(
            "Payload is not ASCII: {:02x?}",
            payload
        )));
    }

    String::from_utf8(payload).map_err(|e| MatisseError::Protocol(e.to_string()))
}
