//! Command definitions
//!
//! Builds the ASCII payloads sent to Matisse Commander.

use std::fmt;

/// Close notification, sent before the socket is torn down
pub const CLOSE_CONNECTION: &str = "Close_Network_Connection";

/// liveness check
pub const CONNECTION_VALID: &str = "Connection Valid?";

/// Value of a set request
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// Sent unchanged
    Str(String),

    /// Plain decimal
    Int(i64),

    /// Fixed point with five fractional digits
    Float(f64),
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetValue::Str(s) => f.write_str(s),
            SetValue::Int(n) => write!(f, "{}", n),
            SetValue::Float(v) => write!(f, "{:.5}", v),
        }
    }
}

impl From<&str> for SetValue {
    fn from(value: &str) -> Self {
        SetValue::Str(value.to_string())
    }
}

impl From<String> for SetValue {
    fn from(value: String) -> Self {
        SetValue::Str(value)
    }
}

impl From<f64> for SetValue {
    fn from(value: f64) -> Self {
        SetValue::Float(value)
    }
}

impl From<f32> for SetValue {
    fn from(value: f32) -> Self {
        SetValue::Float(value as f64)
    }
}

macro_rules! set_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SetValue {
                fn from(value: $t) -> Self {
                    SetValue::Int(value as i64)
                }
            }
        )*
    };
}

set_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! set_value_from_wide_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SetValue {
                /// Values above `i64::MAX` keep their decimal text
                fn from(value: $t) -> Self {
                    i64::try_from(value)
                        .map(SetValue::Int)
                        .unwrap_or_else(|_| SetValue::Str(value.to_string()))
                }
            }
        )*
    };
}

set_value_from_wide_uint!(u64, usize);

/// A request to Matisse Commander
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read a variable
    Query { variable: String },

    /// Write a variable
    Set { variable: String, value: SetValue },

    /// Ask whether the server is still answering
    ConnectionValid,

    /// Announce that the client is about to close the stream
    CloseConnection,
}

impl Command {
    /// Build a query. A trailing `?` on `variable` is dropped so the
    /// payload always ends in exactly one.
    pub fn query(variable: &str) -> Self {
        let variable = variable.strip_suffix('?').unwrap_or(variable);
        Command::Query {
            variable: variable.to_string(),
        }
    }

    pub fn set(variable: &str, value: impl Into<SetValue>) -> Self {
        Command::Set {
            variable: variable.to_string(),
            value: value.into(),
        }
    }

    /// Payload text as it goes on the wire
    pub fn payload(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Query { variable } => write!(f, "{}?", variable),
            Command::Set { variable, value } => write!(f, "{} {}", variable, value),
            Command::ConnectionValid => f.write_str(CONNECTION_VALID),
            Command::CloseConnection => f.write_str(CLOSE_CONNECTION),
        }
    }
}
