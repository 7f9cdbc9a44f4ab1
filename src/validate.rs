//! Client-side value guards
//!
//! The device accepts any piezo value on the wire; these limits protect the
//! hardware and are checked before a set request is built.

use crate::error::{MatisseError, Result};

/// Lowest piezo position accepted
pub const PIEZO_MIN: f64 = 0.0;

/// Highest piezo position accepted
pub const PIEZO_MAX: f64 = 0.7;

/// Reject piezo positions outside `[PIEZO_MIN, PIEZO_MAX]`
pub fn validate_piezo_value(value: f64) -> Result<()> {
    // NaN fails both comparisons, so test for containment instead
    if (PIEZO_MIN..=PIEZO_MAX).contains(&value) {
        Ok(())
    } else {
        Err(MatisseError::OutOfRange {
            value,
            min: PIEZO_MIN,
            max: PIEZO_MAX,
        })
    }
}
