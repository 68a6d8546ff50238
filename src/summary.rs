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

//! Summary tables derived from the per-sequence tables of a run, and checks
//! that the tables of a run agree with each other.
//!
//! A sequence fails if and only if at least one of its alerts is fatal. The
//! `.alc` table can be derived from `.alt` with [count_alerts] and the
//! `.mdl` table from `.sqc` with [count_models].
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::parse_from_read;
//! use vadrtab::TableKind;
//! use vadrtab::records::{PassFail, Record};
//! use vadrtab::summary::{count_alerts, status_from_alerts};
//! use std::io::Cursor;
//!
//! let mut data: Vec<u8> = b"1.1.1  seq1  NC_039477  -  -  -  ambgnt5s  no  N_AT_START  1..1:+  1  1..1:+  1  first nucleotide is N\n".to_vec();
//! data.append(&mut b"2.1.1  seq2  NC_039477  -  -  -  lowcovrg  yes  LOW_COVERAGE  -  -  -  -  0.852<0.900\n".to_vec());
//! let (_, records) = parse_from_read(Some(TableKind::Alt), &mut Cursor::new(data)).unwrap();
//! let alerts: Vec<_> = records.into_iter().filter_map(|x| if let Record::Alt(x) = x { Some(x) } else { None }).collect();
//!
//! let statuses = status_from_alerts(&alerts);
//! assert_eq!(statuses.get("seq1"), Some(&PassFail::Pass));
//! assert_eq!(statuses.get("seq2"), Some(&PassFail::Fail));
//!
//! let counts = count_alerts(&alerts);
//! assert_eq!(counts[0].code, "ambgnt5s");
//! assert!(counts[1].causes_failure);
//! ```
//!

use crate::TableKind;
use crate::alerts::lookup;
use crate::records::Alert;
use crate::records::AlertCount;
use crate::records::AlertScope;
use crate::records::Idx;
use crate::records::ModelCount;
use crate::records::PassFail;
use crate::records::SeqClassification;
use crate::run::RunTables;

use std::fmt;

use indexmap::IndexMap;
use indexmap::IndexSet;

/// Status of each sequence that has at least one alert, in first-seen order.
pub fn status_from_alerts(
    alerts: &[Alert],
) -> IndexMap<String, PassFail> {
    let mut statuses: IndexMap<String, PassFail> = IndexMap::new();
    for alert in alerts {
        let status = statuses.entry(alert.seq_name.clone()).or_insert(PassFail::Pass);
        if alert.fatal {
            *status = PassFail::Fail;
        }
    }
    statuses
}

struct AlertTally<'a> {
    causes_failure: bool,
    short_desc: &'a str,
    scope: AlertScope,
    n_cases: u32,
    seqs: IndexSet<&'a str>,
}

/// Count how often each alert code occurs in `alerts`.
///
/// Codes that never cause a failure are listed first. Within both groups
/// the codes are in first-seen order.
pub fn count_alerts(
    alerts: &[Alert],
) -> Vec<AlertCount> {
    let mut tallies: IndexMap<&str, AlertTally> = IndexMap::new();
    for alert in alerts {
        let tally = tallies.entry(alert.code.as_str()).or_insert_with(|| AlertTally {
            causes_failure: false,
            short_desc: &alert.short_desc,
            scope: alert.scope(),
            n_cases: 0,
            seqs: IndexSet::new(),
        });
        tally.causes_failure |= alert.fatal;
        tally.n_cases += 1;
        tally.seqs.insert(alert.seq_name.as_str());
    }

    let (non_fatal, fatal): (Vec<_>, Vec<_>) = tallies.into_iter().partition(|(_, tally)| !tally.causes_failure);
    non_fatal.into_iter().chain(fatal).enumerate().map(|(i, (code, tally))| {
        let long_desc = match lookup(code) {
            Some(info) => info.long_desc.to_string(),
            None => tally.short_desc.to_string(),
        };
        AlertCount {
            idx: i as u32 + 1,
            code: code.to_string(),
            causes_failure: tally.causes_failure,
            short_desc: tally.short_desc.to_string(),
            scope: tally.scope,
            n_cases: tally.n_cases,
            n_seqs: tally.seqs.len() as u32,
            long_desc,
        }
    }).collect()
}

/// Name of the total row in an `.mdl` table.
pub const ALL_MODELS: &str = "*all*";
/// Name of the row for sequences without a model in an `.mdl` table.
pub const NO_MODEL: &str = "*none*";

/// Count passing and failing sequences per best-matching model.
///
/// Models are ordered by the number of sequences, ties in first-seen order.
/// The `*all*` and `*none*` rows follow the models.
pub fn count_models(
    seqs: &[SeqClassification],
) -> Vec<ModelCount> {
    let mut models: IndexMap<&str, ModelCount> = IndexMap::new();
    let mut all = ModelCount { idx: None, model: ALL_MODELS.to_string(), group: None, subgroup: None, n_seqs: 0, n_pass: 0, n_fail: 0 };
    let mut none = ModelCount { idx: None, model: NO_MODEL.to_string(), group: None, subgroup: None, n_seqs: 0, n_pass: 0, n_fail: 0 };

    for seq in seqs {
        let row = match &seq.model1 {
            Some(model) => models.entry(model.as_str()).or_insert_with(|| ModelCount {
                idx: None,
                model: model.clone(),
                group: seq.group1.clone(),
                subgroup: seq.subgroup1.clone(),
                n_seqs: 0, n_pass: 0, n_fail: 0,
            }),
            None => &mut none,
        };
        for count in [row, &mut all] {
            count.n_seqs += 1;
            match seq.status {
                PassFail::Pass => count.n_pass += 1,
                PassFail::Fail => count.n_fail += 1,
            }
        }
    }

    let mut rows: Vec<ModelCount> = models.into_values().collect();
    // Stable, ties keep first-seen order
    rows.sort_by(|a, b| b.n_seqs.cmp(&a.n_seqs));
    rows.iter_mut().enumerate().for_each(|(i, row)| row.idx = Some(i as u32 + 1));
    rows.push(all);
    rows.push(none);
    rows
}

/// Disagreement between tables of the same run.
#[derive(Debug, Clone, PartialEq)]
pub enum Inconsistency {
    /// Sequence listed in `found_in` but not in `missing_from`.
    MissingSequence { seq_name: String, found_in: TableKind, missing_from: TableKind },
    StatusMismatch { seq_name: String, sqa: PassFail, sqc: PassFail },
    FatalAlertButPass { seq_name: String },
    FailWithoutFatalAlert { seq_name: String },
    /// A row of a summary table differs from the one derived from the other tables.
    SummaryRow { kind: TableKind, name: String, detail: String },
    FeatureLength { seq_name: String, idx: Idx, ftr_len: u64, coords_len: u64 },
    /// `.sgm` rows refer to a feature that is not in `.ftr`.
    MissingFeature { seq_name: String, ftr_idx: u32 },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Inconsistency::MissingSequence { seq_name, found_in, missing_from } => write!(f, "sequence {} is in {} but not in {}", seq_name, found_in, missing_from),
            Inconsistency::StatusMismatch { seq_name, sqa, sqc } => write!(f, "sequence {} is {} in .sqa but {} in .sqc", seq_name, sqa, sqc),
            Inconsistency::FatalAlertButPass { seq_name } => write!(f, "sequence {} has a fatal alert but is PASS", seq_name),
            Inconsistency::FailWithoutFatalAlert { seq_name } => write!(f, "sequence {} is FAIL without a fatal alert", seq_name),
            Inconsistency::SummaryRow { kind, name, detail } => write!(f, "{} row {}: {}", kind, name, detail),
            Inconsistency::FeatureLength { seq_name, idx, ftr_len, coords_len } => write!(f, "feature {} of sequence {} has length {} but its coordinates cover {}", idx, seq_name, ftr_len, coords_len),
            Inconsistency::MissingFeature { seq_name, ftr_idx } => write!(f, "segments of feature {} of sequence {} are in .sgm but the feature is not in .ftr", ftr_idx, seq_name),
        }
    }
}

fn compare_alc(
    found: &[AlertCount],
    expected: &[AlertCount],
    out: &mut Vec<Inconsistency>,
) {
    let row = |name: &str, detail: String| Inconsistency::SummaryRow { kind: TableKind::Alc, name: name.to_string(), detail };
    let found: IndexMap<&str, &AlertCount> = found.iter().map(|x| (x.code.as_str(), x)).collect();
    let expected: IndexMap<&str, &AlertCount> = expected.iter().map(|x| (x.code.as_str(), x)).collect();

    for (code, want) in expected.iter() {
        match found.get(code) {
            Some(got) => {
                if got.n_cases != want.n_cases || got.n_seqs != want.n_seqs {
                    out.push(row(code, format!("counts {}/{} cases/seqs, .alt has {}/{}", got.n_cases, got.n_seqs, want.n_cases, want.n_seqs)));
                }
                if got.causes_failure != want.causes_failure {
                    out.push(row(code, format!("causes failure is {}, .alt says {}", got.causes_failure, want.causes_failure)));
                }
            },
            None => out.push(row(code, "missing, code occurs in .alt".to_string())),
        }
    }
    for code in found.keys() {
        if !expected.contains_key(code) {
            out.push(row(code, "code does not occur in .alt".to_string()));
        }
    }
}

fn compare_mdl(
    found: &[ModelCount],
    expected: &[ModelCount],
    out: &mut Vec<Inconsistency>,
) {
    let row = |name: &str, detail: String| Inconsistency::SummaryRow { kind: TableKind::Mdl, name: name.to_string(), detail };
    // An empty `*none*` row may be left out
    let keep = |x: &&ModelCount| !(x.model == NO_MODEL && x.n_seqs == 0);
    let found: IndexMap<&str, &ModelCount> = found.iter().filter(keep).map(|x| (x.model.as_str(), x)).collect();
    let expected: IndexMap<&str, &ModelCount> = expected.iter().filter(keep).map(|x| (x.model.as_str(), x)).collect();

    for (model, want) in expected.iter() {
        match found.get(model) {
            Some(got) => {
                if (got.n_seqs, got.n_pass, got.n_fail) != (want.n_seqs, want.n_pass, want.n_fail) {
                    out.push(row(model, format!("counts {}/{}/{} seqs/pass/fail, .sqc has {}/{}/{}", got.n_seqs, got.n_pass, got.n_fail, want.n_seqs, want.n_pass, want.n_fail)));
                }
            },
            None => out.push(row(model, "missing, model occurs in .sqc".to_string())),
        }
    }
    for model in found.keys() {
        if !expected.contains_key(model) {
            out.push(row(model, "model does not occur in .sqc".to_string()));
        }
    }
}

/// Check that the tables of a run agree with each other.
///
/// Checks involving a table that is missing from `tables` are skipped.
pub fn cross_check(
    tables: &RunTables,
) -> Vec<Inconsistency> {
    let mut out: Vec<Inconsistency> = Vec::new();

    // .sqa against .sqc
    if let (Some(sqa), Some(sqc)) = (&tables.sqa, &tables.sqc) {
        let sqc_status: IndexMap<&str, PassFail> = sqc.iter().map(|x| (x.seq_name.as_str(), x.status)).collect();
        let sqa_status: IndexMap<&str, PassFail> = sqa.iter().map(|x| (x.seq_name.as_str(), x.status)).collect();
        for (seq_name, status) in sqa_status.iter() {
            match sqc_status.get(seq_name) {
                Some(other) if other != status => out.push(Inconsistency::StatusMismatch { seq_name: seq_name.to_string(), sqa: *status, sqc: *other }),
                Some(_) => {},
                None => out.push(Inconsistency::MissingSequence { seq_name: seq_name.to_string(), found_in: TableKind::Sqa, missing_from: TableKind::Sqc }),
            }
        }
        for seq_name in sqc_status.keys() {
            if !sqa_status.contains_key(seq_name) {
                out.push(Inconsistency::MissingSequence { seq_name: seq_name.to_string(), found_in: TableKind::Sqc, missing_from: TableKind::Sqa });
            }
        }
    }

    // Status against fatal alerts
    if let (Some(statuses), Some(alt)) = (tables.statuses(), &tables.alt) {
        let from_alerts = status_from_alerts(alt);
        let status_kind = if tables.sqa.is_some() { TableKind::Sqa } else { TableKind::Sqc };
        for (seq_name, status) in statuses.iter() {
            let fatal = from_alerts.get(seq_name) == Some(&PassFail::Fail);
            match status {
                PassFail::Pass if fatal => out.push(Inconsistency::FatalAlertButPass { seq_name: seq_name.clone() }),
                PassFail::Fail if !fatal => out.push(Inconsistency::FailWithoutFatalAlert { seq_name: seq_name.clone() }),
                _ => {},
            }
        }
        for seq_name in from_alerts.keys() {
            if !statuses.contains_key(seq_name) {
                out.push(Inconsistency::MissingSequence { seq_name: seq_name.clone(), found_in: TableKind::Alt, missing_from: status_kind });
            }
        }
    }

    // Summary tables
    if let (Some(alc), Some(alt)) = (&tables.alc, &tables.alt) {
        compare_alc(alc, &count_alerts(alt), &mut out);
    }
    if let (Some(mdl), Some(sqc)) = (&tables.mdl, &tables.sqc) {
        compare_mdl(mdl, &count_models(sqc), &mut out);
    }

    // Feature and segment tables
    if let Some(sqa) = &tables.sqa {
        let names: IndexSet<&str> = sqa.iter().map(|x| x.seq_name.as_str()).collect();
        let mut reported: IndexSet<(&str, TableKind)> = IndexSet::new();
        let ftr_names = tables.ftr.iter().flatten().map(|x| (x.seq_name.as_str(), TableKind::Ftr));
        let sgm_names = tables.sgm.iter().flatten().map(|x| (x.seq_name.as_str(), TableKind::Sgm));
        for (seq_name, kind) in ftr_names.chain(sgm_names) {
            if !names.contains(seq_name) && reported.insert((seq_name, kind)) {
                out.push(Inconsistency::MissingSequence { seq_name: seq_name.to_string(), found_in: kind, missing_from: TableKind::Sqa });
            }
        }
    }
    for ftr in tables.ftr.iter().flatten() {
        let coords_len = ftr.seq_coords.len();
        if ftr.ftr_len != coords_len {
            out.push(Inconsistency::FeatureLength { seq_name: ftr.seq_name.clone(), idx: ftr.idx.clone(), ftr_len: ftr.ftr_len, coords_len });
        }
    }
    if let (Some(ftr), Some(sgm)) = (&tables.ftr, &tables.sgm) {
        let features: IndexSet<(&str, u32)> = ftr.iter().map(|x| (x.seq_name.as_str(), x.ftr_idx)).collect();
        let mut reported: IndexSet<(&str, u32)> = IndexSet::new();
        for segment in sgm.iter() {
            let key = (segment.seq_name.as_str(), segment.ftr_idx);
            if !features.contains(&key) && reported.insert(key) {
                out.push(Inconsistency::MissingFeature { seq_name: segment.seq_name.clone(), ftr_idx: segment.ftr_idx });
            }
        }
    }

    out
}

// Tests
#[cfg(test)]
mod tests {

    fn alert(seq_name: &str, code: &str, fatal: bool, feature: bool) -> crate::records::Alert {
        use crate::records::{Alert, Idx};
        Alert {
            idx: Idx(vec![1, 1, 1]),
            seq_name: seq_name.to_string(),
            model: "NC_039477".to_string(),
            ftr_type: if feature { Some("CDS".to_string()) } else { None },
            ftr_name: if feature { Some("VP1".to_string()) } else { None },
            ftr_idx: if feature { Some(2) } else { None },
            code: code.to_string(),
            fatal,
            short_desc: code.to_uppercase(),
            seq_coords: None,
            seq_len: None,
            mdl_coords: None,
            mdl_len: None,
            detail: "-".to_string(),
        }
    }

    fn classification(seq_name: &str, model: Option<&str>, status: crate::records::PassFail) -> crate::records::SeqClassification {
        use crate::records::SeqClassification;
        SeqClassification {
            idx: 1,
            seq_name: seq_name.to_string(),
            seq_len: 7000,
            status,
            annotated: model.is_some(),
            model1: model.map(|x| x.to_string()),
            group1: model.map(|_| "Norovirus".to_string()),
            subgroup1: None,
            score: None, score_per_nt: None, seq_cov: None, mdl_cov: None, bias: None, n_hits: None, strand: None,
            model2: None, group2: None, subgroup2: None, score_diff: None, diff_per_nt: None,
            seq_alerts: vec![],
        }
    }

    #[test]
    fn status_from_alerts_any_fatal_fails() {
        use super::status_from_alerts;
        use crate::records::PassFail;

        let alerts = vec![alert("s1", "ambgnt5s", false, false), alert("s2", "ambgnt5s", false, false), alert("s2", "cdsstopn", true, true), alert("s1", "ambgnt3s", false, false)];

        let got = status_from_alerts(&alerts);

        assert_eq!(got.len(), 2);
        assert_eq!(got.get("s1"), Some(&PassFail::Pass));
        assert_eq!(got.get("s2"), Some(&PassFail::Fail));
    }

    #[test]
    fn count_alerts_orders_non_fatal_first() {
        use super::count_alerts;
        use crate::records::AlertScope;

        let alerts = vec![
            alert("s1", "cdsstopn", true, true),
            alert("s1", "cdsstopn", true, true),
            alert("s2", "ambgnt5s", false, false),
            alert("s2", "lowcovrg", true, false),
            alert("s3", "cdsstopn", true, true),
            alert("s3", "fstlocft", false, true),
        ];

        let got = count_alerts(&alerts);

        let codes: Vec<&str> = got.iter().map(|x| x.code.as_str()).collect();
        assert_eq!(codes, vec!["ambgnt5s", "fstlocft", "cdsstopn", "lowcovrg"]);
        let idx: Vec<u32> = got.iter().map(|x| x.idx).collect();
        assert_eq!(idx, vec![1, 2, 3, 4]);
        assert_eq!((got[2].n_cases, got[2].n_seqs), (3, 2));
        assert_eq!(got[2].scope, AlertScope::Feature);
        assert_eq!(got[3].scope, AlertScope::Sequence);
        assert!(got[2].long_desc.starts_with("in-frame stop codon"));
    }

    #[test]
    fn count_alerts_mixed_fatality_causes_failure() {
        use super::count_alerts;

        let alerts = vec![alert("s1", "lowscore", false, false), alert("s2", "lowscore", true, false)];

        let got = count_alerts(&alerts);

        assert_eq!(got.len(), 1);
        assert!(got[0].causes_failure);
    }

    #[test]
    fn count_models_with_totals() {
        use super::count_models;
        use crate::records::PassFail;

        let seqs = vec![
            classification("s1", Some("NC_001959"), PassFail::Pass),
            classification("s2", Some("NC_039477"), PassFail::Pass),
            classification("s3", Some("NC_039477"), PassFail::Fail),
            classification("s4", None, PassFail::Fail),
        ];

        let got = count_models(&seqs);

        let models: Vec<&str> = got.iter().map(|x| x.model.as_str()).collect();
        assert_eq!(models, vec!["NC_039477", "NC_001959", "*all*", "*none*"]);
        assert_eq!(got[0].idx, Some(1));
        assert_eq!((got[0].n_seqs, got[0].n_pass, got[0].n_fail), (2, 1, 1));
        assert_eq!(got[0].group, Some("Norovirus".to_string()));
        assert_eq!(got[2].idx, None);
        assert_eq!((got[2].n_seqs, got[2].n_pass, got[2].n_fail), (4, 2, 2));
        assert_eq!((got[3].n_seqs, got[3].n_fail), (1, 1));
    }

    #[test]
    fn cross_check_consistent_run() {
        use super::{count_alerts, count_models, cross_check};
        use crate::records::PassFail;
        use crate::run::RunTables;

        let alt = vec![alert("s1", "ambgnt5s", false, false), alert("s2", "lowcovrg", true, false)];
        let sqc = vec![classification("s1", Some("NC_039477"), PassFail::Pass), classification("s2", Some("NC_039477"), PassFail::Fail)];
        let tables = RunTables {
            alc: Some(count_alerts(&alt)),
            mdl: Some(count_models(&sqc)),
            alt: Some(alt),
            sqc: Some(sqc),
            ..Default::default()
        };

        let got = cross_check(&tables);

        assert!(got.is_empty());
    }

    #[test]
    fn cross_check_finds_status_problems() {
        use super::{cross_check, Inconsistency};
        use crate::records::PassFail;
        use crate::run::RunTables;

        let alt = vec![alert("s1", "cdsstopn", true, true)];
        let sqc = vec![classification("s1", Some("NC_039477"), PassFail::Pass), classification("s2", Some("NC_039477"), PassFail::Fail)];
        let tables = RunTables { alt: Some(alt), sqc: Some(sqc), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got, vec![
            Inconsistency::FatalAlertButPass { seq_name: "s1".to_string() },
            Inconsistency::FailWithoutFatalAlert { seq_name: "s2".to_string() },
        ]);
    }

    #[test]
    fn cross_check_finds_summary_mismatch() {
        use super::{count_alerts, count_models, cross_check, Inconsistency};
        use crate::TableKind;
        use crate::records::PassFail;
        use crate::run::RunTables;

        let alt = vec![alert("s1", "lowcovrg", true, false)];
        let sqc = vec![classification("s1", Some("NC_039477"), PassFail::Fail)];
        let mut alc = count_alerts(&alt);
        alc[0].n_cases = 2;
        let mut mdl = count_models(&sqc);
        mdl.pop();
        let tables = RunTables { alc: Some(alc), mdl: Some(mdl), alt: Some(alt), sqc: Some(sqc), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got.len(), 1);
        assert!(matches!(&got[0], Inconsistency::SummaryRow { kind: TableKind::Alc, name, .. } if name == "lowcovrg"));
    }

    #[test]
    fn cross_check_feature_tables() {
        use super::{cross_check, Inconsistency};
        use crate::parser::ftr::read_ftr;
        use crate::parser::sqa::read_sqa;
        use crate::run::RunTables;

        let sqa = vec![read_sqa("1  seq1  7547  PASS  yes  NC_039477  Norovirus  GII  3  0  0  0  0  -").unwrap()];
        let ftr = vec![
            read_ftr("1.1  seq1  7547  PASS  NC_039477  CDS  VP1  1620  2  -  +  5085  6704  -  no  0  0  5085  6701  -  3255  1  0  5085..6704:+  5085..6704:+  -").unwrap(),
            read_ftr("1.2  seq1  7547  PASS  NC_039477  CDS  VP2  800  3  -  +  6704  7510  -  no  0  0  6704  7507  -  1000  1  0  6704..7510:+  6704..7510:+  -").unwrap(),
            read_ftr("1.1  seqX  7547  PASS  NC_039477  CDS  VP1  1620  2  -  +  5085  6704  -  no  0  0  5085  6701  -  3255  1  0  5085..6704:+  5085..6704:+  -").unwrap(),
        ];
        let tables = RunTables { sqa: Some(sqa), ftr: Some(ftr), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got.len(), 2);
        assert!(matches!(&got[0], Inconsistency::MissingSequence { seq_name, .. } if seq_name == "seqX"));
        assert!(matches!(&got[1], Inconsistency::FeatureLength { ftr_len: 800, coords_len: 807, .. }));
    }

    #[test]
    fn cross_check_sqa_against_sqc() {
        use super::{cross_check, Inconsistency};
        use crate::TableKind;
        use crate::parser::sqa::read_sqa;
        use crate::records::PassFail;
        use crate::run::RunTables;

        let sqa = vec![
            read_sqa("1  s1  7000  PASS  yes  NC_039477  Norovirus  -  3  0  0  0  0  -").unwrap(),
            read_sqa("2  s2  7000  PASS  yes  NC_039477  Norovirus  -  3  0  0  0  0  -").unwrap(),
            read_sqa("3  s4  7000  PASS  yes  NC_039477  Norovirus  -  3  0  0  0  0  -").unwrap(),
        ];
        let sqc = vec![
            classification("s1", Some("NC_039477"), PassFail::Pass),
            classification("s2", Some("NC_039477"), PassFail::Fail),
            classification("s3", Some("NC_039477"), PassFail::Fail),
        ];
        let tables = RunTables { sqa: Some(sqa), sqc: Some(sqc), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got, vec![
            Inconsistency::StatusMismatch { seq_name: "s2".to_string(), sqa: PassFail::Pass, sqc: PassFail::Fail },
            Inconsistency::MissingSequence { seq_name: "s4".to_string(), found_in: TableKind::Sqa, missing_from: TableKind::Sqc },
            Inconsistency::MissingSequence { seq_name: "s3".to_string(), found_in: TableKind::Sqc, missing_from: TableKind::Sqa },
        ]);
    }

    #[test]
    fn cross_check_finds_model_count_mismatch() {
        use super::{count_models, cross_check, Inconsistency};
        use crate::TableKind;
        use crate::records::{ModelCount, PassFail};
        use crate::run::RunTables;

        let sqc = vec![classification("s1", Some("NC_039477"), PassFail::Fail), classification("s2", Some("NC_039477"), PassFail::Pass)];
        let mut mdl = count_models(&sqc);
        mdl[0].n_pass = 0;
        mdl.insert(1, ModelCount { idx: Some(2), model: "NC_001959".to_string(), group: None, subgroup: None, n_seqs: 1, n_pass: 1, n_fail: 0 });
        let tables = RunTables { mdl: Some(mdl), sqc: Some(sqc), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got.len(), 2);
        assert!(matches!(&got[0], Inconsistency::SummaryRow { kind: TableKind::Mdl, name, .. } if name == "NC_039477"));
        assert!(matches!(&got[1], Inconsistency::SummaryRow { kind: TableKind::Mdl, name, .. } if name == "NC_001959"));
    }

    #[test]
    fn cross_check_segment_tables() {
        use super::{cross_check, Inconsistency};
        use crate::TableKind;
        use crate::parser::ftr::read_ftr;
        use crate::parser::sgm::read_sgm;
        use crate::parser::sqa::read_sqa;
        use crate::run::RunTables;

        let sqa = vec![read_sqa("1  seq1  7547  PASS  yes  NC_039477  Norovirus  GII  3  0  0  0  0  -").unwrap()];
        let ftr = vec![
            read_ftr("1.1  seq1  7547  PASS  NC_039477  CDS  VP1  1620  2  -  +  5085  6704  -  no  0  0  5085  6701  -  3255  1  0  5085..6704:+  5085..6704:+  -").unwrap(),
        ];
        let sgm = vec![
            read_sgm("1.1  seq1  7547  PASS  NC_039477  CDS  VP1  2  1  1  5085  6704  5085  6704  1620  1.000  +  no  1.00  1.00  no  no").unwrap(),
            read_sgm("1.2  seq1  7547  PASS  NC_039477  CDS  VP3  4  2  1  6705  6900  6705  6900  196  1.000  +  no  1.00  1.00  no  no").unwrap(),
            read_sgm("1.3  seq1  7547  PASS  NC_039477  CDS  VP3  4  2  2  7000  7200  7000  7200  201  1.000  +  no  1.00  1.00  no  no").unwrap(),
            read_sgm("1.1  seqY  7547  PASS  NC_039477  CDS  VP1  2  1  1  5085  6704  5085  6704  1620  1.000  +  no  1.00  1.00  no  no").unwrap(),
        ];
        let tables = RunTables { sqa: Some(sqa), ftr: Some(ftr), sgm: Some(sgm), ..Default::default() };

        let got = cross_check(&tables);

        assert_eq!(got, vec![
            Inconsistency::MissingSequence { seq_name: "seqY".to_string(), found_in: TableKind::Sgm, missing_from: TableKind::Sqa },
            Inconsistency::MissingFeature { seq_name: "seq1".to_string(), ftr_idx: 4 },
            Inconsistency::MissingFeature { seq_name: "seqY".to_string(), ftr_idx: 2 },
        ]);
    }
}
