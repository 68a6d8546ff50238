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

//! Typed rows of the seven VADR tabular output files.
//!
//! Columns that VADR fills with a lone `-` when there is no value are stored
//! as [Option]. Comma-separated alert lists are stored as [Vec], with `-`
//! mapping to an empty list.
//!

use crate::TableKind;
use crate::coords::Coords;
use crate::coords::Strand;

use std::fmt;
use std::str::FromStr;

/// Pass/fail status of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassFail {
    Pass,
    Fail,
}

impl FromStr for PassFail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(PassFail::Pass),
            "FAIL" => Ok(PassFail::Fail),
            _ => Err(format!("'{}' is not PASS or FAIL", s)),
        }
    }
}

impl fmt::Display for PassFail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PassFail::Pass => write!(f, "PASS"),
            PassFail::Fail => write!(f, "FAIL"),
        }
    }
}

/// Whether an alert applies to a whole sequence or to one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertScope {
    Sequence,
    Feature,
}

impl FromStr for AlertScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(AlertScope::Sequence),
            "feature" => Ok(AlertScope::Feature),
            _ => Err(format!("'{}' is not a valid AlertScope", s)),
        }
    }
}

impl fmt::Display for AlertScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertScope::Sequence => write!(f, "sequence"),
            AlertScope::Feature => write!(f, "feature"),
        }
    }
}

/// Truncation of a feature or segment at the sequence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Truncation {
    #[default]
    No,
    FivePrime,
    ThreePrime,
    Both,
}

impl FromStr for Truncation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(Truncation::No),
            "5'" => Ok(Truncation::FivePrime),
            "3'" => Ok(Truncation::ThreePrime),
            "5'&3'" => Ok(Truncation::Both),
            _ => Err(format!("'{}' is not a valid Truncation", s)),
        }
    }
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Truncation::No => write!(f, "no"),
            Truncation::FivePrime => write!(f, "5'"),
            Truncation::ThreePrime => write!(f, "3'"),
            Truncation::Both => write!(f, "5'&3'"),
        }
    }
}

/// Dotted row index such as `3` or `1.2.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Idx(pub Vec<u32>);

impl Idx {
    pub fn parts(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for Idx {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('.').map(|part| part.parse::<u32>()).collect::<Result<Vec<u32>, _>>();
        match parts {
            Ok(parts) => Ok(Idx(parts)),
            Err(_) => Err(format!("'{}' is not a valid index", s)),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let joined = self.0.iter().map(|x| x.to_string()).collect::<Vec<String>>().join(".");
        write!(f, "{}", joined)
    }
}

/// A row in an `.alc` file: how often one alert code was reported.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCount {
    pub idx: u32,
    pub code: String,
    pub causes_failure: bool,
    pub short_desc: String,
    pub scope: AlertScope,
    pub n_cases: u32,
    pub n_seqs: u32,
    pub long_desc: String,
}

/// A row in an `.alt` file: one reported alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub idx: Idx,
    pub seq_name: String,
    pub model: String,
    /// None for sequence-level alerts.
    pub ftr_type: Option<String>,
    pub ftr_name: Option<String>,
    pub ftr_idx: Option<u32>,
    pub code: String,
    /// `fail` column, true if this alert makes the sequence fail.
    pub fatal: bool,
    pub short_desc: String,
    pub seq_coords: Option<Coords>,
    pub seq_len: Option<u64>,
    pub mdl_coords: Option<Coords>,
    pub mdl_len: Option<u64>,
    pub detail: String,
}

impl Alert {
    pub fn scope(&self) -> AlertScope {
        if self.ftr_type.is_some() { AlertScope::Feature } else { AlertScope::Sequence }
    }
}

/// A row in an `.ftr` file: one annotated feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureAnnotation {
    pub idx: Idx,
    pub seq_name: String,
    pub seq_len: u64,
    pub status: PassFail,
    pub model: String,
    pub ftr_type: String,
    pub ftr_name: String,
    pub ftr_len: u64,
    pub ftr_idx: u32,
    pub parent_idx: Option<u32>,
    pub strand: Strand,
    pub n_from: u64,
    pub n_to: u64,
    pub n_instp: Option<u64>,
    pub trunc: Truncation,
    pub n_5p_ambig: u64,
    pub n_3p_ambig: u64,
    pub p_from: Option<u64>,
    pub p_to: Option<u64>,
    pub p_instp: Option<u64>,
    pub p_score: Option<u64>,
    pub n_segments_annotated: u32,
    pub n_segments_missing: u32,
    pub seq_coords: Coords,
    pub mdl_coords: Coords,
    pub alerts: Vec<String>,
}

/// A row in an `.mdl` file: pass/fail counts for one model.
///
/// The two total rows at the end of the file have `idx` None and
/// `model` set to `*all*` or `*none*`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCount {
    pub idx: Option<u32>,
    pub model: String,
    pub group: Option<String>,
    pub subgroup: Option<String>,
    pub n_seqs: u32,
    pub n_pass: u32,
    pub n_fail: u32,
}

/// A row in an `.sgm` file: one annotated segment of a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAnnotation {
    pub idx: Idx,
    pub seq_name: String,
    pub seq_len: u64,
    pub status: PassFail,
    pub model: String,
    pub ftr_type: String,
    pub ftr_name: String,
    /// Index of the feature in the `.ftr` file of the same sequence.
    pub ftr_idx: u32,
    /// Number of segments of the feature.
    pub num_sgm: u32,
    pub sgm_idx: u32,
    pub seq_start: u64,
    pub seq_stop: u64,
    pub mdl_start: u64,
    pub mdl_stop: u64,
    pub sgm_len: u64,
    pub fract: f64,
    pub strand: Strand,
    pub trunc: Truncation,
    pub pp_5p: Option<f64>,
    pub pp_3p: Option<f64>,
    pub gap_5p: Option<bool>,
    pub gap_3p: Option<bool>,
}

/// A row in an `.sqa` file: annotation summary of one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqAnnotation {
    pub idx: u32,
    pub seq_name: String,
    pub seq_len: u64,
    pub status: PassFail,
    pub annotated: bool,
    pub model: Option<String>,
    pub group: Option<String>,
    pub subgroup: Option<String>,
    /// nfa: features annotated.
    pub n_ftr_annotated: Option<u32>,
    /// nfn: model features not annotated.
    pub n_ftr_missing: Option<u32>,
    /// nf5: features truncated at the 5' end.
    pub n_ftr_5p_trunc: Option<u32>,
    /// nf3: features truncated at the 3' end.
    pub n_ftr_3p_trunc: Option<u32>,
    /// nfalt: feature-level alerts.
    pub n_ftr_alerts: Option<u32>,
    pub seq_alerts: Vec<String>,
}

/// A row in an `.sqc` file: classification of one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqClassification {
    pub idx: u32,
    pub seq_name: String,
    pub seq_len: u64,
    pub status: PassFail,
    pub annotated: bool,
    pub model1: Option<String>,
    pub group1: Option<String>,
    pub subgroup1: Option<String>,
    pub score: Option<f64>,
    pub score_per_nt: Option<f64>,
    /// Fraction of the sequence covered by hits to `model1`.
    pub seq_cov: Option<f64>,
    pub mdl_cov: Option<f64>,
    pub bias: Option<f64>,
    pub n_hits: Option<u32>,
    pub strand: Option<Strand>,
    pub model2: Option<String>,
    pub group2: Option<String>,
    pub subgroup2: Option<String>,
    pub score_diff: Option<f64>,
    pub diff_per_nt: Option<f64>,
    pub seq_alerts: Vec<String>,
}

/// One data line from any of the tabular files.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Alc(AlertCount),
    Alt(Alert),
    Ftr(FeatureAnnotation),
    Mdl(ModelCount),
    Sgm(SegmentAnnotation),
    Sqa(SeqAnnotation),
    Sqc(SeqClassification),
}

impl Record {
    pub fn kind(&self) -> TableKind {
        match self {
            Record::Alc(_) => TableKind::Alc,
            Record::Alt(_) => TableKind::Alt,
            Record::Ftr(_) => TableKind::Ftr,
            Record::Mdl(_) => TableKind::Mdl,
            Record::Sgm(_) => TableKind::Sgm,
            Record::Sqa(_) => TableKind::Sqa,
            Record::Sqc(_) => TableKind::Sqc,
        }
    }

    /// Name of the sequence the row describes.
    ///
    /// Returns None for the per-alert and per-model summary rows.
    pub fn seq_name(&self) -> Option<&str> {
        match self {
            Record::Alc(_) => None,
            Record::Mdl(_) => None,
            Record::Alt(x) => Some(&x.seq_name),
            Record::Ftr(x) => Some(&x.seq_name),
            Record::Sgm(x) => Some(&x.seq_name),
            Record::Sqa(x) => Some(&x.seq_name),
            Record::Sqc(x) => Some(&x.seq_name),
        }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn idx_roundtrip_three_parts() {
        use super::Idx;

        let got: Idx = "12.3.1".parse().unwrap();

        assert_eq!(got, Idx(vec![12, 3, 1]));
        assert_eq!(got.parts(), 3);
        assert_eq!(got.to_string(), "12.3.1");
    }

    #[test]
    fn idx_rejects_garbage() {
        use super::Idx;

        assert!("1..2".parse::<Idx>().is_err());
        assert!("-".parse::<Idx>().is_err());
        assert!("".parse::<Idx>().is_err());
    }

    #[test]
    fn truncation_values() {
        use super::Truncation;

        assert_eq!("5'&3'".parse::<Truncation>().unwrap(), Truncation::Both);
        assert_eq!(Truncation::ThreePrime.to_string(), "3'");
        assert!("yes".parse::<Truncation>().is_err());
    }

    #[test]
    fn pass_fail_is_case_sensitive() {
        use super::PassFail;

        assert_eq!("FAIL".parse::<PassFail>().unwrap(), PassFail::Fail);
        assert!("pass".parse::<PassFail>().is_err());
    }
}
