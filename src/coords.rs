// vadrtab: Reading, validating, and summarizing VADR annotation output tables.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Coordinate strings used in VADR tables and model info files.
//!
//! A coordinate string consists of one or more segments separated by `,`.
//! Each segment has the form `<start>..<stop>:<strand>`, where the positions
//! are 1-based and inclusive and the strand is `+` or `-`. Segments on the
//! negative strand have `start >= stop`.
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::coords::{Coords, Strand};
//!
//! let coords: Coords = "5..5104:+,5200..5300:+".parse().unwrap();
//!
//! assert_eq!(coords.len(), 5201);
//! assert_eq!(coords.strand(), Some(Strand::Plus));
//! assert_eq!(coords.to_string(), "5..5104:+,5200..5300:+");
//! ```
//!

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordsError {
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for CoordsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid coordinates '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for CoordsError {}

/// Strand of a segment or a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Plus,
    Minus,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(format!("'{}' is not a valid Strand", s)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// One `start..stop:strand` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u64,
    pub stop: u64,
    pub strand: Strand,
}

impl Segment {
    /// Number of positions covered by the segment.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.start.abs_diff(self.stop) + 1
    }

    pub fn min(&self) -> u64 {
        self.start.min(self.stop)
    }

    pub fn max(&self) -> u64 {
        self.start.max(self.stop)
    }
}

impl FromStr for Segment {
    type Err = CoordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &'static str| CoordsError { value: s.to_string(), reason };

        let (range, strand) = s.rsplit_once(':').ok_or_else(|| err("missing strand"))?;
        let (start, stop) = range.split_once("..").ok_or_else(|| err("missing '..'"))?;

        let start = start.parse::<u64>().map_err(|_| err("start is not a positive integer"))?;
        let stop = stop.parse::<u64>().map_err(|_| err("stop is not a positive integer"))?;
        let strand = strand.parse::<Strand>().map_err(|_| err("strand must be '+' or '-'"))?;

        if start == 0 || stop == 0 {
            return Err(err("positions are 1-based"))
        }
        if strand == Strand::Plus && start > stop {
            return Err(err("start > stop on the positive strand"))
        }
        if strand == Strand::Minus && start < stop {
            return Err(err("start < stop on the negative strand"))
        }

        Ok(Segment { start, stop, strand })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}:{}", self.start, self.stop, self.strand)
    }
}

/// A coordinate string with one or more segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coords(pub Vec<Segment>);

impl Coords {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Total number of positions covered by all segments.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.0.iter().map(|segment| segment.len()).sum()
    }

    /// Strand shared by all segments, or None if they disagree.
    pub fn strand(&self) -> Option<Strand> {
        let first = self.0.first()?.strand;
        if self.0.iter().all(|segment| segment.strand == first) {
            Some(first)
        } else {
            None
        }
    }

    /// Smallest and largest position over all segments.
    pub fn span(&self) -> (u64, u64) {
        let min = self.0.iter().map(|segment| segment.min()).min().unwrap_or(0);
        let max = self.0.iter().map(|segment| segment.max()).max().unwrap_or(0);
        (min, max)
    }
}

impl FromStr for Coords {
    type Err = CoordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CoordsError { value: s.to_string(), reason: "empty" })
        }
        let segments = s.split(',').map(|segment| segment.parse::<Segment>()).collect::<Result<Vec<Segment>, CoordsError>>()?;
        Ok(Coords(segments))
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", segment)?;
            first = false;
        }
        Ok(())
    }
}
