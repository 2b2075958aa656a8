//! Qubit identifiers and measurement-record targets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Unique identifier for a qubit within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// A reference into the measurement record, counted back from its current end.
///
/// `rec[-1]` is the most recent measurement result. Offsets are always
/// strictly negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordOffset(i32);

impl RecordOffset {
    /// Create a record offset, rejecting zero and positive values.
    pub fn new(offset: i32) -> IrResult<Self> {
        if offset >= 0 {
            return Err(IrError::InvalidRecordOffset(i64::from(offset)));
        }
        Ok(Self(offset))
    }

    /// Create a record offset from a wide signed value, as produced by
    /// `-(len) + position` arithmetic.
    pub fn from_i64(offset: i64) -> IrResult<Self> {
        let narrowed = i32::try_from(offset).map_err(|_| IrError::InvalidRecordOffset(offset))?;
        Self::new(narrowed)
    }

    /// The (negative) offset value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecordOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec[{}]", self.0)
    }
}
