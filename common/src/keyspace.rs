//! # Keyspace Generator
//!
//! Produces the ordered, finite run of [`Candidate`]s a scan dispatches.
//!
//! A [`Keyspace`] is an iterator and is consumed by the scan that owns it:
//! every candidate comes out at most once, in ascending numeric order, and
//! there is no way to rewind it.

use std::iter::FusedIterator;

use crate::candidate::{Candidate, MAX_WIDTH};
use crate::error::SweepError;

/// Digits in a standard code.
pub const DEFAULT_WIDTH: u8 = 4;

/// Number of codes in the standard keyspace (`0000..=9999`).
pub const DEFAULT_LEN: u32 = 10_000;

#[derive(Debug)]
pub struct Keyspace {
    width: u8,
    next: u32,
    end: u32,
}

impl Keyspace {
    /// A keyspace covering the first `len` codes of `width` digits.
    pub fn new(width: u8, len: u32) -> Result<Self, SweepError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(SweepError::InvalidKeyspace(format!(
                "width must be between 1 and {MAX_WIDTH}, got {width}"
            )));
        }
        let capacity: u64 = 10u64.pow(u32::from(width));
        if u64::from(len) > capacity {
            return Err(SweepError::InvalidKeyspace(format!(
                "{len} codes do not fit in {width} digits"
            )));
        }
        Ok(Self {
            width,
            next: 0,
            end: len,
        })
    }

    /// The full four-digit keyspace, `0000` through `9999`.
    pub fn standard() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            next: 0,
            end: DEFAULT_LEN,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }
}

impl Iterator for Keyspace {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.next >= self.end {
            return None;
        }
        let candidate = Candidate::new_unchecked(self.next, self.width);
        self.next += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Keyspace {}

impl FusedIterator for Keyspace {}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
