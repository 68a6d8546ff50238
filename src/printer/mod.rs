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

//! Printer for outputting [Record]s as plain text in any supported [Layout].
//!
//! Can be used to convert any iterator over [Record] data to their plain
//! text representation.
//!
//! Returns 1 line at a time using next(). The header line is prepended to the
//! first line, or returned alone if there are no records.
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::TableKind;
//! use vadrtab::printer::{Layout, Printer};
//! use vadrtab::records::{ModelCount, Record};
//! use std::io::Write;
//!
//! let data = vec![
//!     Record::Mdl(ModelCount { idx: Some(1), model: "NC_001959".to_string(), group: Some("Norovirus".to_string()), subgroup: Some("GI".to_string()), n_seqs: 3, n_pass: 3, n_fail: 0 }),
//!     Record::Mdl(ModelCount { idx: None, model: "*all*".to_string(), group: None, subgroup: None, n_seqs: 3, n_pass: 3, n_fail: 0 }),
//! ];
//!
//! let mut data_iter = data.into_iter();
//! let mut printer = Printer::new(&mut data_iter, TableKind::Mdl, Layout::Vadr);
//!
//! let mut got: Vec<u8> = Vec::new();
//! for line in printer.by_ref() {
//!     got.write_all(&line.unwrap()).unwrap();
//! }
//!
//! let mut expected: Vec<u8> = b"#idx  model  group  subgroup  num seqs  num pass  num fail\n".to_vec();
//! expected.append(&mut b"1  NC_001959  Norovirus  GI  3  3  0\n".to_vec());
//! expected.append(&mut b"-  *all*  -  -  3  3  0\n".to_vec());
//!
//! assert_eq!(got, expected);
//! ```
//!

use crate::TableKind;
use crate::records::Record;

use alc::format_alc_fields;
use alt::format_alt_fields;
use ftr::format_ftr_fields;
use mdl::format_mdl_fields;
use sgm::format_sgm_fields;
use sqa::format_sqa_fields;
use sqc::format_sqc_fields;

use std::fmt;

// Format specific implementations
pub mod alc;
pub mod alt;
pub mod ftr;
pub mod mdl;
pub mod sgm;
pub mod sqa;
pub mod sqc;

type E = Box<dyn std::error::Error>;

/// Text layout of a printed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `#`-commented header, fields separated by two spaces.
    #[default]
    Vadr,
    /// Plain header line, tab-separated fields.
    Tsv,
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vadr" => Ok(Layout::Vadr),
            "tsv" => Ok(Layout::Tsv),
            _ => Err(format!("'{}' is not a valid Layout", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrinterError {
    WrongKind { expected: TableKind, found: TableKind },
    EmptyField { column: &'static str },
    Whitespace { column: &'static str, value: String },
    LeadingHash { value: String },
}

impl fmt::Display for PrinterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrinterError::WrongKind { expected, found } => write!(f, "can't print a {} record in a {} table", found, expected),
            PrinterError::EmptyField { column } => write!(f, "column '{}' is empty", column),
            PrinterError::Whitespace { column, value } => write!(f, "value '{}' in column '{}' contains whitespace", value, column),
            PrinterError::LeadingHash { value } => write!(f, "first field '{}' would be read as a comment", value),
        }
    }
}

impl std::error::Error for PrinterError {}

/// `-` for None.
pub(crate) fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(x) => x.to_string(),
        None => "-".to_string(),
    }
}

pub(crate) fn yes_no(value: bool) -> String {
    if value { "yes".to_string() } else { "no".to_string() }
}

/// Comma-separated list, `-` for an empty list.
pub(crate) fn list(values: &[String]) -> String {
    if values.is_empty() { "-".to_string() } else { values.join(",") }
}

/// Check that `fields` can be written as one data line of `kind`.
///
/// Every field must be non-empty. All but the last must be free of
/// whitespace. No field may contain a line break.
pub fn check_fields(
    kind: TableKind,
    fields: &[String],
) -> Result<(), PrinterError> {
    let names = kind.column_names();
    let last = fields.len().saturating_sub(1);
    for (col, value) in fields.iter().enumerate() {
        let column = names[col.min(names.len() - 1)];
        if value.is_empty() {
            return Err(PrinterError::EmptyField { column })
        }
        let has_space = if col < last {
            value.contains(char::is_whitespace)
        } else {
            value.contains(['\n', '\r']) || value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace)
        };
        if has_space {
            return Err(PrinterError::Whitespace { column, value: value.clone() })
        }
    }
    if let Some(first) = fields.first() {
        if first.starts_with('#') {
            return Err(PrinterError::LeadingHash { value: first.clone() })
        }
    }
    Ok(())
}

/// Format the fields of `record` without checking its kind.
pub fn format_fields(
    record: &Record,
) -> Result<Vec<String>, E> {
    match record {
        Record::Alc(x) => format_alc_fields(x),
        Record::Alt(x) => format_alt_fields(x),
        Record::Ftr(x) => format_ftr_fields(x),
        Record::Mdl(x) => format_mdl_fields(x),
        Record::Sgm(x) => format_sgm_fields(x),
        Record::Sqa(x) => format_sqa_fields(x),
        Record::Sqc(x) => format_sqc_fields(x),
    }
}

/// Header line of a `kind` table in `layout`, with the line break.
pub fn format_header(
    kind: TableKind,
    layout: Layout,
) -> Vec<u8> {
    let mut out = match layout {
        Layout::Vadr => kind.header_line(),
        Layout::Tsv => kind.column_names().join("\t"),
    };
    out.push('\n');
    out.into_bytes()
}

fn join_fields(
    fields: &[String],
    layout: Layout,
) -> Result<Vec<u8>, E> {
    let separator = match layout {
        Layout::Vadr => "  ",
        Layout::Tsv => "\t",
    };
    let mut formatted = fields.join(separator);
    if layout == Layout::Tsv {
        // Only the free-text last field can hold a tab
        if let Some(last) = fields.last() {
            if last.contains('\t') {
                let start = formatted.len() - last.len();
                let replaced = last.replace('\t', " ");
                formatted.replace_range(start.., &replaced);
            }
        }
    }
    formatted.push('\n');
    Ok(formatted.into_bytes())
}

pub struct Printer<'a, I: Iterator> where I: Iterator<Item=Record> {
    // Inputs
    records: &'a mut I,

    header_done: bool,
    pub kind: TableKind,
    pub layout: Layout,
}

impl<'a, I: Iterator> Printer<'a, I> where I: Iterator<Item=Record> {
    pub fn new(
        records: &'a mut I,
        kind: TableKind,
        layout: Layout,
    ) -> Self {
        Printer{
            records,
            header_done: false,
            kind, layout,
        }
    }
}

impl<'a, I: Iterator> Printer<'a, I> where I: Iterator<Item=Record> {
    /// Format the header line.
    ///
    /// Marks the header as printed so next() won't repeat it.
    pub fn print_header(
        &mut self,
    ) -> Vec<u8> {
        self.header_done = true;
        format_header(self.kind, self.layout)
    }

    fn format_record(
        &self,
        record: &Record,
    ) -> Result<Vec<u8>, E> {
        if record.kind() != self.kind {
            return Err(Box::new(PrinterError::WrongKind { expected: self.kind, found: record.kind() }))
        }
        let fields = format_fields(record)?;
        join_fields(&fields, self.layout)
    }
}

impl<'a, I: Iterator> Iterator for Printer<'a, I> where I: Iterator<Item=Record> {
    type Item = Result<Vec<u8>, E>;

    fn next(
        &mut self,
    ) -> Option<Result<Vec<u8>, E>> {
        let mut out: Vec<u8> = Vec::new();
        let first = !self.header_done;
        if first {
            out.append(&mut self.print_header());
        }

        match self.records.next() {
            Some(record) => {
                match self.format_record(&record) {
                    Ok(mut line) => {
                        out.append(&mut line);
                        Some(Ok(out))
                    },
                    Err(e) => Some(Err(e)),
                }
            },
            None => {
                if first { Some(Ok(out)) } else { None }
            },
        }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn print_sqa_tsv() {
        use super::{Layout, Printer};
        use crate::TableKind;
        use crate::records::{PassFail, Record, SeqAnnotation};
        use std::io::Write;

        let data = vec![
            Record::Sqa(SeqAnnotation { idx: 1, seq_name: "seq1".to_string(), seq_len: 7547, status: PassFail::Pass, annotated: true, model: Some("NC_039477".to_string()), group: Some("Norovirus".to_string()), subgroup: Some("GII".to_string()), n_ftr_annotated: Some(3), n_ftr_missing: Some(0), n_ftr_5p_trunc: Some(0), n_ftr_3p_trunc: Some(0), n_ftr_alerts: Some(0), seq_alerts: vec![] }),
            Record::Sqa(SeqAnnotation { idx: 2, seq_name: "seq2".to_string(), seq_len: 120, status: PassFail::Fail, annotated: false, model: None, group: None, subgroup: None, n_ftr_annotated: None, n_ftr_missing: None, n_ftr_5p_trunc: None, n_ftr_3p_trunc: None, n_ftr_alerts: None, seq_alerts: vec!["noannotn".to_string(), "lowcovrg".to_string()] }),
        ];

        let mut expected: Vec<u8> = b"idx\tseq name\tseq len\tp/f\tant\tbest model\tgrp\tsubgrp\tnfa\tnfn\tnf5\tnf3\tnfalt\tseq alerts\n".to_vec();
        expected.append(&mut b"1\tseq1\t7547\tPASS\tyes\tNC_039477\tNorovirus\tGII\t3\t0\t0\t0\t0\t-\n".to_vec());
        expected.append(&mut b"2\tseq2\t120\tFAIL\tno\t-\t-\t-\t-\t-\t-\t-\t-\tnoannotn,lowcovrg\n".to_vec());

        let mut got: Vec<u8> = Vec::new();
        let mut data_iter = data.into_iter();
        let mut printer = Printer::new(&mut data_iter, TableKind::Sqa, Layout::Tsv);
        for line in printer.by_ref() {
            got.write_all(&line.unwrap()).unwrap();
        }

        assert_eq!(got, expected);
    }

    #[test]
    fn print_empty_table_has_header() {
        use super::{Layout, Printer};
        use crate::TableKind;
        use crate::records::Record;

        let mut data_iter = Vec::<Record>::new().into_iter();
        let printer = Printer::new(&mut data_iter, TableKind::Alc, Layout::Vadr);
        let got: Vec<Vec<u8>> = printer.map(|x| x.unwrap()).collect();

        assert_eq!(got, vec![format!("{}\n", TableKind::Alc.header_line()).into_bytes()]);
    }

    #[test]
    fn print_header_not_repeated() {
        use super::{Layout, Printer};
        use crate::TableKind;
        use crate::records::{ModelCount, Record};

        let data = vec![Record::Mdl(ModelCount { idx: Some(1), model: "NC_1".to_string(), group: None, subgroup: None, n_seqs: 1, n_pass: 1, n_fail: 0 })];
        let mut data_iter = data.into_iter();
        let mut printer = Printer::new(&mut data_iter, TableKind::Mdl, Layout::Vadr);

        let header = printer.print_header();
        let got: Vec<Vec<u8>> = printer.map(|x| x.unwrap()).collect();

        assert!(header.starts_with(b"#idx"));
        assert_eq!(got, vec![b"1  NC_1  -  -  1  1  0\n".to_vec()]);
    }

    #[test]
    fn error_on_wrong_kind() {
        use super::{Layout, Printer};
        use crate::TableKind;
        use crate::records::{ModelCount, Record};

        let data = vec![Record::Mdl(ModelCount { idx: Some(1), model: "NC_1".to_string(), group: None, subgroup: None, n_seqs: 1, n_pass: 1, n_fail: 0 })];
        let mut data_iter = data.into_iter();
        let mut printer = Printer::new(&mut data_iter, TableKind::Sqa, Layout::Vadr);

        let got = printer.next().unwrap();

        assert!(got.is_err());
    }

    #[test]
    fn tsv_replaces_tabs_in_last_field() {
        use super::Layout;
        use crate::TableKind;
        use crate::convert_from_read_to_write;
        use std::io::Cursor;

        let data = b"1  lowcovrg  yes  LOW_COVERAGE  sequence  1  1  low coverage\t[0.820<0.860]\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        convert_from_read_to_write(Some(TableKind::Alc), Layout::Tsv, &mut Cursor::new(data.clone()), &mut got).unwrap();
        let lines: Vec<&[u8]> = got.split(|x| *x == b'\n').collect();
        assert_eq!(lines[1], &b"1\tlowcovrg\tyes\tLOW_COVERAGE\tsequence\t1\t1\tlow coverage [0.820<0.860]"[..]);

        let mut got: Vec<u8> = Vec::new();
        convert_from_read_to_write(Some(TableKind::Alc), Layout::Vadr, &mut Cursor::new(data), &mut got).unwrap();
        assert!(got.ends_with(b"low coverage\t[0.820<0.860]\n"));
    }

    #[test]
    fn check_fields_rules() {
        use super::{check_fields, PrinterError};
        use crate::TableKind;

        let ok: Vec<String> = ["1", "cdsstopn", "yes", "CDS_HAS_STOP_CODON", "feature", "1", "1", "in-frame stop codon exists"].iter().map(|x| x.to_string()).collect();
        assert_eq!(check_fields(TableKind::Alc, &ok), Ok(()));

        let mut bad = ok.clone();
        bad[3] = "CDS HAS STOP".to_string();
        assert!(matches!(check_fields(TableKind::Alc, &bad), Err(PrinterError::Whitespace { column: "short description", .. })));

        let mut bad = ok.clone();
        bad[1] = String::new();
        assert_eq!(check_fields(TableKind::Alc, &bad), Err(PrinterError::EmptyField { column: "alert code" }));

        let mut bad = ok.clone();
        bad[0] = "#1".to_string();
        assert!(matches!(check_fields(TableKind::Alc, &bad), Err(PrinterError::LeadingHash { .. })));
    }
}
