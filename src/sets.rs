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

//! Set operations on the passing or failing sequences of several runs.
//!
//! Sequence names are mapped to stable integer ids with a [SequenceIndex]
//! shared by all runs. The sequences of one run with a given status are then
//! stored as a [RoaringBitmap] of ids and combined with [merge_into].
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::records::PassFail;
//! use vadrtab::sets::{merge_into, names, status_bitmap, MergeOp, SequenceIndex};
//! use indexmap::IndexMap;
//!
//! let run_1: IndexMap<String, PassFail> = [("seq1", PassFail::Fail), ("seq2", PassFail::Fail), ("seq3", PassFail::Pass)]
//!     .into_iter().map(|(name, status)| (name.to_string(), status)).collect();
//! let run_2: IndexMap<String, PassFail> = [("seq2", PassFail::Fail), ("seq3", PassFail::Fail)]
//!     .into_iter().map(|(name, status)| (name.to_string(), status)).collect();
//!
//! let mut index = SequenceIndex::default();
//! let mut bitmap = status_bitmap(&run_1, &mut index, PassFail::Fail);
//! let other = status_bitmap(&run_2, &mut index, PassFail::Fail);
//!
//! merge_into(&MergeOp::Intersection, &mut bitmap, other);
//!
//! assert_eq!(names(&index, &bitmap), vec!["seq2"]);
//! ```
//!

use crate::records::PassFail;

use indexmap::IndexMap;
use indexmap::IndexSet;
use roaring::RoaringBitmap;

/// Supported set operations for [merge_into].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MergeOp {
    #[default]
    Union,
    Intersection,
    Xor,
    Diff,
}

impl std::str::FromStr for MergeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(MergeOp::Union),
            "intersection" => Ok(MergeOp::Intersection),
            "xor" => Ok(MergeOp::Xor),
            "diff" => Ok(MergeOp::Diff),
            _ => Err(format!("'{}' is not a valid MergeOp", s)),
        }
    }
}

/// Sequence names numbered in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SequenceIndex {
    names: IndexSet<String>,
}

impl SequenceIndex {
    /// Id of `name`, adding it if it hasn't been seen.
    pub fn id(
        &mut self,
        name: &str,
    ) -> u32 {
        match self.names.get_index_of(name) {
            Some(id) => id as u32,
            None => self.names.insert_full(name.to_string()).0 as u32,
        }
    }

    pub fn name(
        &self,
        id: u32,
    ) -> Option<&str> {
        self.names.get_index(id as usize).map(|x| x.as_str())
    }

    pub fn len(
        &self,
    ) -> usize {
        self.names.len()
    }

    pub fn is_empty(
        &self,
    ) -> bool {
        self.names.is_empty()
    }
}

/// Ids of the sequences in `statuses` with status `status`.
///
/// Every sequence in `statuses` is added to `index`, whatever its status,
/// so that ids are comparable across runs.
pub fn status_bitmap(
    statuses: &IndexMap<String, PassFail>,
    index: &mut SequenceIndex,
    status: PassFail,
) -> RoaringBitmap {
    let mut bits = RoaringBitmap::new();
    for (name, seq_status) in statuses {
        let id = index.id(name);
        if *seq_status == status {
            bits.insert(id);
        }
    }
    bits
}

/// Combine `other` into `acc` with `merge_op`.
pub fn merge_into(
    merge_op: &MergeOp,
    acc: &mut RoaringBitmap,
    other: RoaringBitmap,
) {
    match merge_op {
        MergeOp::Union => {
            *acc |= other;
        },
        MergeOp::Intersection => {
            *acc &= other;
        },
        MergeOp::Xor => {
            *acc ^= other;
        },
        MergeOp::Diff => {
            *acc -= other;
        },
    }
}

/// Names of the ids in `bits`, ordered by id.
pub fn names(
    index: &SequenceIndex,
    bits: &RoaringBitmap,
) -> Vec<String> {
    bits.iter().filter_map(|id| index.name(id)).map(|x| x.to_string()).collect()
}
