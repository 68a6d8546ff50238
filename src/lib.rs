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

//! vadrtab is a library and a command-line client for:
//!
//!   - Reading the tabular output of the [VADR](https://github.com/ncbi/vadr)
//!     viral sequence annotation pipeline into typed records.
//!   - Validating that the tables follow the VADR format rules.
//!   - Converting the tables to tab-separated values.
//!   - Recomputing the summary tables and cross-checking the tables of a run.
//!   - Splitting the input sequences of a run into passing and failing sets.
//!   - Set operations on the passing or failing sequences of several runs.
//!   - Checking that a VADR model library contains all required files.
//!
//! The following tables are supported:
//!   - `.alc` counts of each reported alert code.
//!   - `.alt` every reported alert.
//!   - `.ftr` every annotated feature.
//!   - `.mdl` pass/fail counts per model.
//!   - `.sgm` every annotated segment of a multi-segment feature.
//!   - `.sqa` annotation summary per sequence.
//!   - `.sqc` classification summary per sequence.
//!
//! In addition, the model info files (`.minfo`) that describe the models and
//! their features can be read and written with [minfo].
//!
//! ## Usage
//!
//! ### Command line
//!
//! The vadrtab CLI supports the following subcommands:
//!   - `vadrtab check` validate one or more tables.
//!   - `vadrtab convert` reformat a table, eg. to tab-separated values.
//!   - `vadrtab report` summarize a VADR output directory into a new directory.
//!   - `vadrtab set` set operations on failing or passing sequences of several runs.
//!   - `vadrtab models` list the models in a model library and check its files.
//!
//! ### Rust API
//!
//! The API provides functions for operating on structs that implement
//! [Read] and/or [Write]. These are meant for use cases where an entire table
//! should be processed.
//!
//! For use cases requiring access to a single record at a time, the following
//! structs are provided:
//!
//!   - [Parser](parser::Parser): takes a [Read] containing a table and converts its lines into [Record](records::Record).
//!   - [Printer](printer::Printer): takes an iterator over [Record](records::Record) and formats them into lines.
//!
//! Tables from one VADR run can be loaded together with
//! [RunTables](run::RunTables) and checked against each other with
//! [cross_check](summary::cross_check).
//!

use std::fmt;
use std::io::Read;
use std::io::Write;
use std::path::Path;

pub mod alerts;
pub mod coords;
pub mod library;
pub mod minfo;
pub mod parser;
pub mod printer;
pub mod records;
pub mod run;
pub mod seqsplit;
pub mod sets;
pub mod summary;
pub mod validate;

use parser::Parser;
use printer::Layout;
use printer::Printer;
use records::Record;

type E = Box<dyn std::error::Error>;

/// The tabular output files written by VADR.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Alc,
    Alt,
    Ftr,
    Mdl,
    Sgm,
    Sqa,
    Sqc,
}

const ALC_COLUMNS: [&str; 8] = ["idx", "alert code", "causes failure", "short description", "per type", "num cases", "num seqs", "long description"];
const ALT_COLUMNS: [&str; 14] = ["idx", "seq name", "model", "ftr type", "ftr name", "ftr idx", "alert code", "fail", "alert description", "seq coords", "seq len", "mdl coords", "mdl len", "alert detail"];
const FTR_COLUMNS: [&str; 26] = ["idx", "seq name", "seq len", "p/f", "model", "ftr type", "ftr name", "ftr len", "ftr idx", "par idx", "str", "n from", "n to", "n instp", "trc", "5'N", "3'N", "p from", "p to", "p instp", "p sc", "nsa", "nsn", "seq coords", "mdl coords", "ftr alerts"];
const MDL_COLUMNS: [&str; 7] = ["idx", "model", "group", "subgroup", "num seqs", "num pass", "num fail"];
const SGM_COLUMNS: [&str; 22] = ["idx", "seq name", "seq len", "p/f", "model", "ftr type", "ftr name", "ftr idx", "num sgm", "sgm idx", "seq start", "seq stop", "mdl start", "mdl stop", "sgm len", "fract", "str", "trc", "5' pp", "3' pp", "5' gap", "3' gap"];
const SQA_COLUMNS: [&str; 14] = ["idx", "seq name", "seq len", "p/f", "ant", "best model", "grp", "subgrp", "nfa", "nfn", "nf5", "nf3", "nfalt", "seq alerts"];
const SQC_COLUMNS: [&str; 21] = ["idx", "seq name", "seq len", "p/f", "ant", "model1", "grp1", "subgrp1", "score", "sc/nt", "seq cov", "mdl cov", "bias", "num hits", "str", "model2", "grp2", "subgrp2", "score diff", "diff/nt", "seq alerts"];

impl TableKind {
    pub fn all() -> &'static [TableKind] {
        &[TableKind::Alc, TableKind::Alt, TableKind::Ftr, TableKind::Mdl, TableKind::Sgm, TableKind::Sqa, TableKind::Sqc]
    }

    /// File name suffix without the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            TableKind::Alc => "alc",
            TableKind::Alt => "alt",
            TableKind::Ftr => "ftr",
            TableKind::Mdl => "mdl",
            TableKind::Sgm => "sgm",
            TableKind::Sqa => "sqa",
            TableKind::Sqc => "sqc",
        }
    }

    /// Column names in file order.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            TableKind::Alc => &ALC_COLUMNS,
            TableKind::Alt => &ALT_COLUMNS,
            TableKind::Ftr => &FTR_COLUMNS,
            TableKind::Mdl => &MDL_COLUMNS,
            TableKind::Sgm => &SGM_COLUMNS,
            TableKind::Sqa => &SQA_COLUMNS,
            TableKind::Sqc => &SQC_COLUMNS,
        }
    }

    /// Minimum number of fields on a data line.
    ///
    /// The last field may contain whitespace, so lines can have more.
    pub fn min_fields(&self) -> usize {
        self.column_names().len()
    }

    /// Commented header line listing the column names.
    pub fn header_line(&self) -> String {
        format!("#{}", self.column_names().join("  "))
    }

    /// Determine the kind from a file name.
    ///
    /// Recognizes `<name>.<suffix>` and `<name>.<suffix>.gz`.
    ///
    /// ## Usage
    ///
    /// ```rust
    /// use vadrtab::TableKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(TableKind::from_path(Path::new("va-run/va-run.vadr.sqc")), Some(TableKind::Sqc));
    /// assert_eq!(TableKind::from_path(Path::new("va-run.vadr.alt.gz")), Some(TableKind::Alt));
    /// assert_eq!(TableKind::from_path(Path::new("va-run.vadr.pass.tbl")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<TableKind> {
        let name = path.file_name()?.to_str()?;
        let name = name.strip_suffix(".gz").unwrap_or(name);
        let (_, suffix) = name.rsplit_once('.')?;
        suffix.parse::<TableKind>().ok()
    }
}

impl std::str::FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('.').unwrap_or(s) {
            "alc" => Ok(TableKind::Alc),
            "alt" => Ok(TableKind::Alt),
            "ftr" => Ok(TableKind::Ftr),
            "mdl" => Ok(TableKind::Mdl),
            "sgm" => Ok(TableKind::Sgm),
            "sqa" => Ok(TableKind::Sqa),
            "sqc" => Ok(TableKind::Sqc),
            _ => Err(format!("'{}' is not a valid TableKind", s)),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, ".{}", self.suffix())
    }
}

/// Parse all records of a table from [Read](std::io::Read).
///
/// If `kind` is None, it is guessed from the header of the table. Stops at
/// the first line that can't be parsed and returns its error. Use
/// [validate_from_read](validate::validate_from_read) to collect all
/// problems in a table instead.
///
/// ## Usage
/// ```rust
/// use vadrtab::parse_from_read;
/// use vadrtab::TableKind;
/// use vadrtab::records::Record;
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b"#idx  seq name  seq len  p/f  ant  best model  grp  subgrp  nfa  nfn  nf5  nf3  nfalt  seq alerts\n".to_vec());
/// input_bytes.append(&mut b"1  seq1  7547  PASS  yes  NC_039477  Norovirus  GII  3  0  0  0  0  -\n".to_vec());
/// input_bytes.append(&mut b"2  seq2  120  FAIL  no  -  -  -  -  -  -  -  -  noannotn\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let (kind, records) = parse_from_read(None, &mut input).unwrap();
///
/// assert_eq!(kind, TableKind::Sqa);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].seq_name(), Some("seq2"));
/// ```
///
pub fn parse_from_read<R: Read>(
    kind: Option<TableKind>,
    conn_in: &mut R,
) -> Result<(TableKind, Vec<Record>), E> {
    let mut parser = Parser::new(conn_in, kind)?;
    let kind = parser.kind;

    let mut records: Vec<Record> = Vec::new();
    for record in parser.by_ref() {
        records.push(record?);
    }

    Ok((kind, records))
}

/// Parse all records of a table stored in `path`.
///
/// The kind is determined from the file name, or from the header if the
/// name has no known suffix. Gzipped tables are decompressed.
///
pub fn parse_file(
    path: &Path,
) -> Result<(TableKind, Vec<Record>), E> {
    let mut conn_in = parser::open_table(path)?;
    let kind = TableKind::from_path(path);
    log::debug!("Reading {} as {:?}", path.display(), kind);
    parse_from_read(kind, &mut conn_in)
}

/// Convert a table from [Read] to the given [Layout] in [Write].
///
/// ## Usage
///
/// ```rust
/// use vadrtab::convert_from_read_to_write;
/// use vadrtab::TableKind;
/// use vadrtab::printer::Layout;
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b"1     NC_039477  Norovirus  GII       2         1         1\n".to_vec());
/// input_bytes.append(&mut b"-     *all*      -          -         2         1         1\n".to_vec());
/// let mut input: Cursor<Vec<u8>> = Cursor::new(input_bytes);
///
/// let mut output: Vec<u8> = Vec::new();
/// convert_from_read_to_write(Some(TableKind::Mdl), Layout::Tsv, &mut input, &mut output).unwrap();
///
/// let mut expected: Vec<u8> = Vec::new();
/// expected.append(&mut b"idx\tmodel\tgroup\tsubgroup\tnum seqs\tnum pass\tnum fail\n".to_vec());
/// expected.append(&mut b"1\tNC_039477\tNorovirus\tGII\t2\t1\t1\n".to_vec());
/// expected.append(&mut b"-\t*all*\t-\t-\t2\t1\t1\n".to_vec());
///
/// assert_eq!(output, expected);
/// ```
///
pub fn convert_from_read_to_write<R: Read, W: Write>(
    kind: Option<TableKind>,
    layout: Layout,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<(), E> {
    let (kind, records) = parse_from_read(kind, conn_in)?;
    write_records(kind, layout, records, conn_out)
}

/// Format `records` of kind `kind` to [Write].
pub fn write_records<W: Write>(
    kind: TableKind,
    layout: Layout,
    records: Vec<Record>,
    conn_out: &mut W,
) -> Result<(), E> {
    let mut iter = records.into_iter();
    let mut printer = Printer::new(&mut iter, kind, layout);
    for line in printer.by_ref() {
        conn_out.write_all(&line?)?;
    }
    conn_out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {

    #[test]
    fn table_kind_from_str() {
        use super::TableKind;

        assert_eq!("sgm".parse::<TableKind>().unwrap(), TableKind::Sgm);
        assert_eq!(".ftr".parse::<TableKind>().unwrap(), TableKind::Ftr);
        assert!("tbl".parse::<TableKind>().is_err());
    }

    #[test]
    fn table_kind_min_fields() {
        use super::TableKind;

        let got: Vec<usize> = TableKind::all().iter().map(|kind| kind.min_fields()).collect();
        let expected = vec![8, 14, 26, 7, 18, 14, 21];

        assert_eq!(got, expected);
    }

    #[test]
    fn table_kind_from_path() {
        use super::TableKind;
        use std::path::Path;

        assert_eq!(TableKind::from_path(Path::new("out/out.vadr.ftr")), Some(TableKind::Ftr));
        assert_eq!(TableKind::from_path(Path::new("out.mdl.gz")), Some(TableKind::Mdl));
        assert_eq!(TableKind::from_path(Path::new("sgm")), None);
        assert_eq!(TableKind::from_path(Path::new("out.vadr.fail.fa")), None);
    }

    #[test]
    fn parse_from_read_stops_at_error() {
        use super::parse_from_read;
        use super::TableKind;
        use std::io::Cursor;

        let mut input = Cursor::new(b"1  NC_1  -  -  1  1  0\n2  NC_2  -  -  1  one  0\n".to_vec());

        let got = parse_from_read(Some(TableKind::Mdl), &mut input);

        assert!(got.is_err());
        assert!(got.unwrap_err().to_string().starts_with("line 2:"));
    }

    #[test]
    fn convert_from_read_to_write_vadr_layout_reparses() {
        use super::{convert_from_read_to_write, parse_from_read};
        use super::TableKind;
        use crate::printer::Layout;
        use std::io::Cursor;

        let data = b"1.1.1  seq1  NC_039477  CDS  VP1  2  cdsstopn  yes  CDS_HAS_STOP_CODON  5300..5302:+  3  5290..5292:+  3  stop codon in the middle of the CDS\n".to_vec();
        let (_, expected) = parse_from_read(Some(TableKind::Alt), &mut Cursor::new(data.clone())).unwrap();

        let mut output: Vec<u8> = Vec::new();
        convert_from_read_to_write(Some(TableKind::Alt), Layout::Vadr, &mut Cursor::new(data), &mut output).unwrap();
        let (kind, got) = parse_from_read(None, &mut Cursor::new(output)).unwrap();

        assert_eq!(kind, TableKind::Alt);
        assert_eq!(got, expected);
    }
}
