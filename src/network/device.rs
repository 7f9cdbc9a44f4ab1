//! Device properties
//!
//! Typed accessors for the Matisse variables this client knows by name.

use crate::error::{MatisseError, Result};
use crate::protocol::{ControlStatus, Value};
use crate::validate::validate_piezo_value;
use super::Commander;

/// Wire names of the known Matisse variables
pub mod variables {
    /// Identification string
    pub const IDN: &str = "*IDN";
    /// DC value of the integral power diode
    pub const DIODE_POWER_DC: &str = "DPOW:DC";
    /// Piezo position of the reference cell
    pub const PIEZO_REF_CELL: &str = "REFCELL:NOW";
    /// Slow piezo position
    pub const PIEZO_SLOW: &str = "SPZT:NOW";
    pub const PIEZO_SLOW_STATUS: &str = "SPZT:CNTRSTA";
    pub const PIEZO_FAST_STATUS: &str = "FPZT:CNTRSTA";
    pub const ETALON_PIEZO_STATUS: &str = "PZETL:CNTRSTA";
    pub const ETALON_THIN_STATUS: &str = "TE:CNTRSTA";
    /// Fast piezo lock flag
    pub const PIEZO_FAST_LOCK: &str = "FPZT:LOCK";
}

use self::variables::*;

impl Commander {
    /// Identification string
    pub fn idn(&mut self) -> Result<String> {
        let value = self.query(IDN)?;
        match value {
            Value::String(s) => Ok(s),
            other => Err(unexpected(IDN, "string", &other)),
        }
    }

    /// DC value of the integral power diode
    pub fn diode_power_dc(&mut self) -> Result<f64> {
        self.query_f64(DIODE_POWER_DC)
    }

    /// Piezo position of the reference cell
    pub fn piezo_ref_cell(&mut self) -> Result<f64> {
        self.query_f64(PIEZO_REF_CELL)
    }

    /// Move the reference cell piezo, rejecting positions outside [0, 0.7]
    pub fn set_piezo_ref_cell(&mut self, value: f64) -> Result<()> {
        validate_piezo_value(value)?;
        self.set_checked(PIEZO_REF_CELL, value)
    }

    /// Slow piezo position
    pub fn piezo_slow(&mut self) -> Result<f64> {
        self.query_f64(PIEZO_SLOW)
    }

    /// Move the slow piezo, rejecting positions outside [0, 0.7]
    pub fn set_piezo_slow(&mut self, value: f64) -> Result<()> {
        validate_piezo_value(value)?;
        self.set_checked(PIEZO_SLOW, value)
    }

    pub fn piezo_slow_status(&mut self) -> Result<ControlStatus> {
        self.query_status(PIEZO_SLOW_STATUS)
    }

    pub fn piezo_fast_status(&mut self) -> Result<ControlStatus> {
        self.query_status(PIEZO_FAST_STATUS)
    }

    pub fn etalon_piezo_status(&mut self) -> Result<ControlStatus> {
        self.query_status(ETALON_PIEZO_STATUS)
    }

    pub fn etalon_thin_status(&mut self) -> Result<ControlStatus> {
        self.query_status(ETALON_THIN_STATUS)
    }

    /// Whether the fast piezo is locked
    pub fn piezo_fast_lock(&mut self) -> Result<bool> {
        let value = self.query(PIEZO_FAST_LOCK)?;
        value
            .as_bool()
            .ok_or_else(|| unexpected(PIEZO_FAST_LOCK, "boolean", &value))
    }

    fn query_f64(&mut self, variable: &str) -> Result<f64> {
        let value = self.query(variable)?;
        value
            .as_f64()
            .ok_or_else(|| unexpected(variable, "float", &value))
    }

    fn query_status(&mut self, variable: &str) -> Result<ControlStatus> {
        let value = self.query(variable)?;
        value
            .as_status()
            .ok_or_else(|| unexpected(variable, "control status", &value))
    }
}

fn unexpected(variable: &str, expected: &'static str, found: &Value) -> MatisseError {
    MatisseError::UnexpectedValue {
        variable: variable.to_string(),
        expected,
        found: found.kind(),
    }
}
