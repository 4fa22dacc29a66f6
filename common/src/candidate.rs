//! # Candidate Codes
//!
//! A [`Candidate`] is one fixed-width numeric code drawn from the keyspace.
//! It renders zero-padded (`7` with width 4 is `"0007"`) everywhere it leaves
//! the process: in probe URLs, in progress snapshots and in terminal output.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SweepError;

/// Widest code the keyspace supports; `10^9` still fits in a `u32`.
pub const MAX_WIDTH: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Candidate {
    value: u32,
    width: u8,
}

impl Candidate {
    /// Builds a candidate, rejecting values that do not fit in `width` digits.
    pub fn new(value: u32, width: u8) -> Result<Self, SweepError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(SweepError::InvalidKeyspace(format!(
                "width must be between 1 and {MAX_WIDTH}, got {width}"
            )));
        }
        if u64::from(value) >= 10u64.pow(u32::from(width)) {
            return Err(SweepError::InvalidCandidate(value.to_string()));
        }
        Ok(Self { value, width })
    }

    pub(crate) fn new_unchecked(value: u32, width: u8) -> Self {
        Self { value, width }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> u8 {
        self.width
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = usize::from(self.width))
    }
}

impl FromStr for Candidate {
    type Err = SweepError;

    /// Parses a zero-padded code; the string length becomes the width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SweepError::InvalidCandidate(s.to_string()));
        }
        let width: u8 = u8::try_from(s.len())
            .ok()
            .filter(|w| *w <= MAX_WIDTH)
            .ok_or_else(|| SweepError::InvalidCandidate(s.to_string()))?;
        let value: u32 = s
            .parse()
            .map_err(|_| SweepError::InvalidCandidate(s.to_string()))?;
        Self::new(value, width)
    }
}

impl Serialize for Candidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
