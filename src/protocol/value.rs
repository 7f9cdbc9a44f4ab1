//! Value definitions
//!
//! Typed values carried by query replies.

use std::fmt;
use std::str::FromStr;

use crate::error::MatisseError;

/// Run/stop state of a piezo or etalon control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlStatus {
    Stop = 0,
    Run = 1,
}

impl ControlStatus {
    /// Keyword used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlStatus::Run => "RUN",
            ControlStatus::Stop => "STOP",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ControlStatus::Run)
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlStatus {
    type Err = MatisseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUN" => Ok(ControlStatus::Run),
            "STOP" => Ok(ControlStatus::Stop),
            other => Err(MatisseError::UnrecognizedValueShape(other.to_string())),
        }
    }
}

/// A value parsed from a `:NAME: VALUE` reply
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string, quotes stripped
    String(String),

    /// Number written with a decimal point, optionally with an exponent
    Float(f64),

    /// Bare unsigned integer
    Int(u64),

    /// `RUN` or `STOP`
    Status(ControlStatus),

    /// `TRUE` or `FALSE`
    Bool(bool),
}

impl Value {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Float(_) => "float",
            Value::Int(_) => "integer",
            Value::Status(_) => "control status",
            Value::Bool(_) => "boolean",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Float value; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<ControlStatus> {
        match self {
            Value::Status(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(n) => write!(f, "{}", n),
            Value::Status(s) => write!(f, "{}", s),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
        }
    }
}
