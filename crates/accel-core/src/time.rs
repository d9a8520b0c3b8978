//! Discretization of continuous simulation time into analysis bins.
//!
//! # Design
//!
//! The engine never sees continuous event times.  Upstream indicator
//! producers map each link entry to a `TimeBin` through a shared
//! [`TimeDiscretization`]:
//!
//!   bin = (time_secs - start_secs) / bin_size_secs
//!
//! Using an integer bin index as the canonical time unit means all field
//! keys are exact (no floating-point drift) and hashing/comparison is O(1).
//! Times before `start_secs` or at/after the end of the covered window fall
//! outside the discretization and are simply not binned — the corresponding
//! usage never enters any field.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── TimeBin ───────────────────────────────────────────────────────────────────

/// Index of one discretized time slice within the analysis window.
///
/// Stored as `u32`: at 1-second bins a u32 covers ~136 years of simulated
/// time, far beyond any conceivable analysis window.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBin(pub u32);

impl TimeBin {
    pub const ZERO: TimeBin = TimeBin(0);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TimeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

// ── TimeDiscretization ────────────────────────────────────────────────────────

/// Maps continuous simulation times (seconds) to [`TimeBin`] indices.
///
/// Cheap to copy and intentionally holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDiscretization {
    /// Simulation time (seconds) at which bin 0 starts.
    pub start_secs: u32,
    /// Width of one bin in seconds.  Must be > 0.
    pub bin_size_secs: u32,
    /// Number of bins in the analysis window.  Must be > 0.
    pub bin_count: u32,
}

impl TimeDiscretization {
    /// Create a discretization, validating that the window is non-empty.
    pub fn new(start_secs: u32, bin_size_secs: u32, bin_count: u32) -> CoreResult<Self> {
        if bin_size_secs == 0 {
            return Err(CoreError::Config("time bin size must be > 0 s".into()));
        }
        if bin_count == 0 {
            return Err(CoreError::Config("time bin count must be > 0".into()));
        }
        Ok(Self {
            start_secs,
            bin_size_secs,
            bin_count,
        })
    }

    /// The bin containing `time_secs`, or `None` if the time falls outside
    /// the covered window.
    #[inline]
    pub fn bin(&self, time_secs: u32) -> Option<TimeBin> {
        if time_secs < self.start_secs {
            return None;
        }
        let bin = (time_secs - self.start_secs) / self.bin_size_secs;
        if bin < self.bin_count {
            Some(TimeBin(bin))
        } else {
            None
        }
    }

    /// Simulation time (seconds) at which `bin` starts.
    #[inline]
    pub fn bin_start_secs(&self, bin: TimeBin) -> u32 {
        self.start_secs + bin.0 * self.bin_size_secs
    }

    /// Exclusive end of the covered window in seconds.
    #[inline]
    pub fn end_secs(&self) -> u32 {
        self.start_secs + self.bin_count * self.bin_size_secs
    }
}

impl fmt::Display for TimeDiscretization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} s .. {} s) in {} bins of {} s",
            self.start_secs,
            self.end_secs(),
            self.bin_count,
            self.bin_size_secs
        )
    }
}
