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

//! Parser for reading VADR tabular output one [Record] at a time.
//!
//! All seven table kinds share the same line rules:
//!
//!   - Lines starting with `#` are comments. The comment lines before the
//!     first data line are the table header.
//!   - Data lines never start with whitespace or `#`.
//!   - Fields are separated by one or more spaces or tabs.
//!   - Each kind has a minimum number of fields N. The N-th field is the
//!     rest of the line and may contain whitespace.
//!
//! If the table kind is not given, it is guessed from the header with
//! [guess_kind].
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::TableKind;
//! use vadrtab::parser::Parser;
//! use vadrtab::records::Record;
//! use std::io::Cursor;
//!
//! let mut data: Vec<u8> = b"#idx  model      group      subgroup  num seqs  num pass  num fail\n".to_vec();
//! data.append(&mut b"1     NC_039477  Norovirus  GII       2         1         1\n".to_vec());
//! data.append(&mut b"-     *all*      -          -         2         1         1\n".to_vec());
//! let mut input = Cursor::new(data);
//!
//! let mut parser = Parser::new(&mut input, None).unwrap();
//! assert_eq!(parser.kind, TableKind::Mdl);
//!
//! let records: Vec<Record> = parser.by_ref().map(|x| x.unwrap()).collect();
//! assert_eq!(records.len(), 2);
//! ```
//!

// Format specific implementations
pub mod alc;
pub mod alt;
pub mod ftr;
pub mod mdl;
pub mod sgm;
pub mod sqa;
pub mod sqc;

use crate::TableKind;
use crate::records::Record;

use crate::parser::alc::read_alc;
use crate::parser::alt::read_alt;
use crate::parser::ftr::read_ftr;
use crate::parser::mdl::read_mdl;
use crate::parser::sgm::read_sgm;
use crate::parser::sqa::read_sqa;
use crate::parser::sqc::read_sqc;

use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use bstr::ByteSlice;
use flate2::read::MultiGzDecoder;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct UnrecognizedTableKind;

impl fmt::Display for UnrecognizedTableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unrecognized table kind, use an .alc/.alt/.ftr/.mdl/.sgm/.sqa/.sqc file name or give the kind explicitly")
    }
}

impl std::error::Error for UnrecognizedTableKind {}

/// Reason a single line could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    LeadingWhitespace,
    TooFewFields { expected: usize, found: usize },
    InvalidValue { column: &'static str, value: String, reason: String },
    InvalidUtf8,
    Io(String),
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LineError::LeadingWhitespace => write!(f, "data line starts with whitespace"),
            LineError::TooFewFields { expected, found } => write!(f, "expected at least {} fields, found {}", expected, found),
            LineError::InvalidValue { column, value, reason } => write!(f, "invalid value '{}' in column '{}': {}", value, column, reason),
            LineError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
            LineError::Io(msg) => write!(f, "read error: {}", msg),
        }
    }
}

/// A [LineError] together with the 1-based line number it occurred on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub kind: LineError,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a data line into at least `n` fields.
///
/// The first `n - 1` fields are separated by runs of spaces or tabs. The
/// `n`-th field is the remainder of the line with trailing whitespace removed
/// and may contain whitespace.
///
/// ## Usage
///
/// ```rust
/// use vadrtab::parser::split_fields;
///
/// let got = split_fields("1  cdsstopn  no  in-frame stop codon exists", 4).unwrap();
/// assert_eq!(got, vec!["1", "cdsstopn", "no", "in-frame stop codon exists"]);
/// ```
pub fn split_fields(
    line: &str,
    n: usize,
) -> Result<Vec<&str>, LineError> {
    if line.starts_with(is_separator) {
        return Err(LineError::LeadingWhitespace)
    }

    let mut fields: Vec<&str> = Vec::with_capacity(n);
    let mut rest = line.trim_end();
    while fields.len() + 1 < n {
        rest = rest.trim_start_matches(is_separator);
        if rest.is_empty() {
            break;
        }
        match rest.find(is_separator) {
            Some(end) => {
                fields.push(&rest[..end]);
                rest = &rest[end..];
            },
            None => {
                fields.push(rest);
                rest = "";
            },
        }
    }
    rest = rest.trim_start_matches(is_separator);
    if !rest.is_empty() {
        fields.push(rest);
    }

    if fields.len() < n {
        return Err(LineError::TooFewFields { expected: n, found: fields.len() })
    }
    Ok(fields)
}

/// Typed access to the fields of one data line.
pub(crate) struct Fields<'a> {
    values: Vec<&'a str>,
    names: &'static [&'static str],
}

impl<'a> Fields<'a> {
    pub(crate) fn new(
        line: &'a str,
        kind: TableKind,
    ) -> Result<Self, LineError> {
        let values = split_fields(line, kind.min_fields())?;
        Ok(Fields { values, names: kind.column_names() })
    }

    fn invalid(&self, col: usize, reason: String) -> LineError {
        LineError::InvalidValue { column: self.names[col], value: self.values[col].to_string(), reason }
    }

    pub(crate) fn string(&self, col: usize) -> String {
        self.values[col].to_string()
    }

    pub(crate) fn opt_string(&self, col: usize) -> Option<String> {
        match self.values[col] {
            "-" => None,
            value => Some(value.to_string()),
        }
    }

    pub(crate) fn parse<T: FromStr>(&self, col: usize) -> Result<T, LineError> where T::Err: fmt::Display {
        self.values[col].parse::<T>().map_err(|e| self.invalid(col, e.to_string()))
    }

    pub(crate) fn opt_parse<T: FromStr>(&self, col: usize) -> Result<Option<T>, LineError> where T::Err: fmt::Display {
        match self.values[col] {
            "-" => Ok(None),
            _ => Ok(Some(self.parse::<T>(col)?)),
        }
    }

    pub(crate) fn yes_no(&self, col: usize) -> Result<bool, LineError> {
        match self.values[col] {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(self.invalid(col, "expected 'yes' or 'no'".to_string())),
        }
    }

    pub(crate) fn opt_yes_no(&self, col: usize) -> Result<Option<bool>, LineError> {
        match self.values[col] {
            "-" => Ok(None),
            _ => Ok(Some(self.yes_no(col)?)),
        }
    }

    /// Dotted index with exactly `parts` components.
    pub(crate) fn idx(&self, col: usize, parts: usize) -> Result<crate::records::Idx, LineError> {
        let idx = self.parse::<crate::records::Idx>(col)?;
        if idx.parts() != parts {
            return Err(self.invalid(col, format!("expected an index with {} parts", parts)))
        }
        Ok(idx)
    }

    /// Comma-separated list, `-` is the empty list.
    pub(crate) fn list(&self, col: usize) -> Vec<String> {
        match self.values[col] {
            "-" => Vec::new(),
            value => value.split(',').filter(|x| !x.is_empty()).map(|x| x.to_string()).collect(),
        }
    }
}

/// Parse one data line of a table of kind `kind`.
pub fn read_record(
    kind: TableKind,
    line: &str,
) -> Result<Record, LineError> {
    let record = match kind {
        TableKind::Alc => Record::Alc(read_alc(line)?),
        TableKind::Alt => Record::Alt(read_alt(line)?),
        TableKind::Ftr => Record::Ftr(read_ftr(line)?),
        TableKind::Mdl => Record::Mdl(read_mdl(line)?),
        TableKind::Sgm => Record::Sgm(read_sgm(line)?),
        TableKind::Sqa => Record::Sqa(read_sqa(line)?),
        TableKind::Sqc => Record::Sqc(read_sqc(line)?),
    };
    Ok(record)
}

/// Guess the table kind from its header comment lines.
pub fn guess_kind(
    header: &[String],
) -> Option<TableKind> {
    let text = header.join(" ").to_lowercase();
    let words: Vec<&str> = text.split(|c: char| c.is_whitespace() || c == '#').filter(|x| !x.is_empty()).collect();
    let has = |word: &str| words.contains(&word);

    if has("causes") {
        return Some(TableKind::Alc)
    }
    if has("detail") {
        return Some(TableKind::Alt)
    }
    if has("instp") {
        return Some(TableKind::Ftr)
    }
    if has("sgm") {
        return Some(TableKind::Sgm)
    }
    if has("model1") || has("model2") {
        return Some(TableKind::Sqc)
    }
    if has("nfa") || has("nfalt") {
        return Some(TableKind::Sqa)
    }
    if has("pass") && has("fail") {
        return Some(TableKind::Mdl)
    }

    None
}

/// Open a table from `path`, decompressing it if the name ends in `.gz`.
pub fn open_table(
    path: &Path,
) -> Result<Box<dyn Read>, E> {
    let f = File::open(path)?;
    let is_gz = path.extension().is_some_and(|ext| ext == "gz");
    if is_gz {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(f))))
    } else {
        Ok(Box::new(f))
    }
}

pub struct Parser<'a, R: Read> {
    reader: BufReader<&'a mut R>,
    buf: Vec<u8>,
    pub kind: TableKind,

    header: Vec<String>,
    line_no: usize,
    pending_line_no: usize,
    last_line: usize,
}

impl<'a, R: Read> Parser<'a, R> {
    /// Create a parser reading from `conn`, consuming the header.
    ///
    /// If `kind` is None, the kind is guessed from the header and
    /// [UnrecognizedTableKind] is returned if that fails.
    pub fn new(
        conn: &'a mut R,
        kind: Option<TableKind>,
    ) -> Result<Self, E> {
        let mut reader = BufReader::new(conn);
        let mut buf: Vec<u8> = Vec::new();
        let mut header: Vec<String> = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = buf.trim_end_with(|c| c == '\n' || c == '\r');
            if line.starts_with_str("#") {
                header.push(line.to_str_lossy().to_string());
            } else if !line.is_empty() {
                // First data line, kept for `next`
                break;
            }
        }

        let kind = match kind {
            Some(kind) => kind,
            None => guess_kind(&header).ok_or(UnrecognizedTableKind{})?,
        };

        Ok(Self {
            reader, buf, kind,
            header,
            line_no, pending_line_no: line_no,
            last_line: 0,
        })
    }
}

impl<R: Read> Parser<'_, R> {
    /// Header comment lines, including the leading `#`.
    pub fn header(
        &self
    ) -> &[String] {
        &self.header
    }

    /// Line number of the record most recently returned by next().
    pub fn last_line(
        &self
    ) -> usize {
        self.last_line
    }

    fn parse_line(
        &self,
        line_no: usize,
        bytes: &[u8],
    ) -> Result<Record, ParseError> {
        let line = bytes.to_str().map_err(|_| ParseError { line: line_no, kind: LineError::InvalidUtf8 })?;
        read_record(self.kind, line).map_err(|kind| ParseError { line: line_no, kind })
    }
}

impl<R: Read> Iterator for Parser<'_, R> {
    type Item = Result<Record, ParseError>;

    fn next(
        &mut self,
    ) -> Option<Result<Record, ParseError>> {
        // Data line left over from reading the header
        if !self.buf.is_empty() {
            let line = self.buf.trim_end_with(|c| c == '\n' || c == '\r').to_vec();
            self.buf.clear();
            if !line.is_empty() && !line.starts_with_str("#") {
                self.last_line = self.pending_line_no;
                return Some(self.parse_line(self.pending_line_no, &line))
            }
        }

        let mut line: Vec<u8> = Vec::new();
        loop {
            line.clear();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => return None,
                Ok(_) => {},
                Err(e) => return Some(Err(ParseError { line: self.line_no + 1, kind: LineError::Io(e.to_string()) })),
            }
            self.line_no += 1;
            let trimmed = line.trim_end_with(|c| c == '\n' || c == '\r');
            if trimmed.is_empty() || trimmed.starts_with_str("#") {
                continue;
            }
            self.last_line = self.line_no;
            return Some(self.parse_line(self.line_no, trimmed))
        }
    }
}
