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

//! Whole-file format checks.
//!
//! Unlike [Parser](crate::parser::Parser) used on its own, validation keeps
//! going after a bad line and collects every problem in the table into a
//! [ValidationReport].
//!
//! Problems are either errors, which break the format rules, or warnings
//! about alert codes that are well-formed but not in the
//! [catalogue](crate::alerts).
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::TableKind;
//! use vadrtab::validate::validate_from_read;
//! use std::io::Cursor;
//!
//! let mut data: Vec<u8> = b"1  lowcovrg  yes  LOW_COVERAGE  sequence  1  1  low coverage\n".to_vec();
//! data.append(&mut b" 2  cdsstopn  yes  CDS_HAS_STOP_CODON  feature  1  1  stop codon\n".to_vec());
//! data.append(&mut b"3  newcode1  no  SOMETHING_NEW  feature  1  1  not in the catalogue\n".to_vec());
//! let mut input = Cursor::new(data);
//!
//! let report = validate_from_read(&mut input, Some(TableKind::Alc)).unwrap();
//!
//! assert!(!report.ok());
//! assert_eq!(report.n_records, 2);
//! assert_eq!(report.errors().count(), 1);
//! assert_eq!(report.warnings().count(), 1);
//! ```
//!

use crate::TableKind;
use crate::alerts::is_valid_code;
use crate::alerts::lookup;
use crate::parser::LineError;
use crate::parser::Parser;
use crate::records::Record;

use std::fmt;
use std::io::Read;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// Line could not be parsed.
    Line(LineError),
    /// Alert code is not eight lower-case characters.
    InvalidAlertCode { code: String },
    UnknownAlertCode { code: String },
    ShortDescMismatch { code: String, found: String, expected: &'static str },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IssueKind::Line(e) => write!(f, "{}", e),
            IssueKind::InvalidAlertCode { code } => write!(f, "'{}' is not a valid alert code", code),
            IssueKind::UnknownAlertCode { code } => write!(f, "unknown alert code '{}'", code),
            IssueKind::ShortDescMismatch { code, found, expected } => write!(f, "alert code '{}' has description '{}', expected '{}'", code, found, expected),
        }
    }
}

/// One problem found on line `line` (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub line: usize,
    pub kind: IssueKind,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::Line(_) => Severity::Error,
            IssueKind::InvalidAlertCode { .. } => Severity::Error,
            IssueKind::UnknownAlertCode { .. } => Severity::Warning,
            IssueKind::ShortDescMismatch { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let severity = match self.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "line {}: {}: {}", self.line, severity, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub kind: TableKind,
    /// Number of data lines that parsed.
    pub n_records: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// True if there are no errors. Warnings are allowed.
    pub fn ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Warning)
    }
}

fn check_code(
    code: &str,
    short_desc: Option<&str>,
    line: usize,
    issues: &mut Vec<Issue>,
) {
    if !is_valid_code(code) {
        issues.push(Issue { line, kind: IssueKind::InvalidAlertCode { code: code.to_string() } });
        return
    }
    match lookup(code) {
        Some(info) => {
            if let Some(found) = short_desc {
                if found != info.short_desc {
                    issues.push(Issue { line, kind: IssueKind::ShortDescMismatch { code: code.to_string(), found: found.to_string(), expected: info.short_desc } });
                }
            }
        },
        None => issues.push(Issue { line, kind: IssueKind::UnknownAlertCode { code: code.to_string() } }),
    }
}

/// Check the alert codes mentioned in `record`.
pub fn check_record(
    record: &Record,
    line: usize,
) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    match record {
        Record::Alc(x) => check_code(&x.code, Some(&x.short_desc), line, &mut issues),
        Record::Alt(x) => check_code(&x.code, Some(&x.short_desc), line, &mut issues),
        Record::Ftr(x) => x.alerts.iter().for_each(|code| check_code(code, None, line, &mut issues)),
        Record::Sqa(x) => x.seq_alerts.iter().for_each(|code| check_code(code, None, line, &mut issues)),
        Record::Sqc(x) => x.seq_alerts.iter().for_each(|code| check_code(code, None, line, &mut issues)),
        Record::Mdl(_) => {},
        Record::Sgm(_) => {},
    }
    issues
}

/// Check every line of a table in [Read].
///
/// Errors are only returned if the table can't be read at all, eg. when
/// `kind` is None and can't be guessed from the header.
pub fn validate_from_read<R: Read>(
    conn_in: &mut R,
    kind: Option<TableKind>,
) -> Result<ValidationReport, E> {
    let mut parser = Parser::new(conn_in, kind)?;
    let kind = parser.kind;

    let mut n_records = 0;
    let mut issues: Vec<Issue> = Vec::new();
    while let Some(record) = parser.next() {
        let line = parser.last_line();
        match record {
            Ok(record) => {
                n_records += 1;
                issues.append(&mut check_record(&record, line));
            },
            Err(e) => {
                issues.push(Issue { line: e.line, kind: IssueKind::Line(e.kind) });
            },
        }
    }

    log::debug!("Validated {} records with {} issues", n_records, issues.len());
    Ok(ValidationReport { kind, n_records, issues })
}
