//! Protocol Module
//!
//! Defines the wire protocol spoken by the Matisse Commander TCP server.
//!
//! ## Frame Format (both directions)
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (4)  │      ASCII payload          │
//! └──────────┴─────────────────────────────┘
//! ```
//! `Len` is an unsigned 32-bit big-endian byte count of the payload.
//!
//! ### Requests
//! - `NAME?`                    - query a variable
//! - `NAME VALUE`               - set a variable
//! - `Connection Valid?`        - liveness check
//! - `Close_Network_Connection` - close notification
//!
//! ### Responses
//! - `:NAME: VALUE` - query reply, VALUE is a quoted string, float,
//!   unsigned integer, `RUN`/`STOP` or `TRUE`/`FALSE`
//! - `OK`           - set acknowledged
//! - `Server alive` - liveness reply

mod command;
mod value;
mod parser;
mod frame;

pub use command::{Command, SetValue, CLOSE_CONNECTION, CONNECTION_VALID};
pub use value::{ControlStatus, Value};
pub use parser::parse_response;
pub use frame::{
    decode_length, encode_frame, read_frame, write_frame, HEADER_SIZE, SERVER_ALIVE, SET_OK,
};
