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

//! Split the input sequences of a run into passing and failing sequences.
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::records::PassFail;
//! use vadrtab::seqsplit::split_fasta_from_read;
//! use indexmap::IndexMap;
//! use std::io::Cursor;
//!
//! let input = Cursor::new(b">seq1 Norovirus GII\nACGT\n>seq2\nGGCC\n".to_vec());
//! let mut statuses: IndexMap<String, PassFail> = IndexMap::new();
//! statuses.insert("seq1".to_string(), PassFail::Fail);
//! statuses.insert("seq2".to_string(), PassFail::Pass);
//!
//! let mut pass: Vec<u8> = Vec::new();
//! let mut fail: Vec<u8> = Vec::new();
//! let counts = split_fasta_from_read(input, &statuses, &mut pass, &mut fail).unwrap();
//!
//! assert_eq!(pass, b">seq2\nGGCC\n".to_vec());
//! assert_eq!(fail, b">seq1 Norovirus GII\nACGT\n".to_vec());
//! assert_eq!((counts.n_pass, counts.n_fail, counts.n_unknown), (1, 1, 0));
//! ```
//!

use crate::records::PassFail;

use std::io::Read;
use std::io::Write;

use bstr::ByteSlice;
use indexmap::IndexMap;

type E = Box<dyn std::error::Error>;

const LINE_WIDTH: usize = 60;

/// Number of records written to each output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCounts {
    pub n_pass: usize,
    pub n_fail: usize,
    /// Records whose name is not in the run.
    pub n_unknown: usize,
}

fn write_fasta<W: Write>(
    id: &[u8],
    seq: &[u8],
    conn: &mut W,
) -> Result<(), E> {
    conn.write_all(b">")?;
    conn.write_all(id)?;
    conn.write_all(b"\n")?;
    for line in seq.chunks(LINE_WIDTH) {
        conn.write_all(line)?;
        conn.write_all(b"\n")?;
    }
    Ok(())
}

/// Copy each FASTA or FASTQ record in `conn_in` to `pass_out` or `fail_out`.
///
/// Records are matched to `statuses` by the first word of their header.
/// The output is FASTA with sequence lines of 60 characters.
pub fn split_fasta_from_read<R: Read + Send, W1: Write, W2: Write>(
    conn_in: R,
    statuses: &IndexMap<String, PassFail>,
    pass_out: &mut W1,
    fail_out: &mut W2,
) -> Result<SplitCounts, E> {
    let mut reader = needletail::parse_fastx_reader(conn_in)?;
    let mut counts = SplitCounts::default();

    while let Some(record) = reader.next() {
        let record = record?;
        let id = record.id();
        let name = id.fields().next().unwrap_or(b"").to_str_lossy();
        match statuses.get(&*name) {
            Some(PassFail::Pass) => {
                write_fasta(id, &record.seq(), pass_out)?;
                counts.n_pass += 1;
            },
            Some(PassFail::Fail) => {
                write_fasta(id, &record.seq(), fail_out)?;
                counts.n_fail += 1;
            },
            None => {
                log::debug!("Skipping sequence {}, not in the run", name);
                counts.n_unknown += 1;
            },
        }
    }

    pass_out.flush()?;
    fail_out.flush()?;
    if counts.n_unknown > 0 {
        log::warn!("Skipped {} sequences not listed in the run", counts.n_unknown);
    }
    Ok(counts)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn split_fastq_skips_unknown() {
        use super::split_fasta_from_read;
        use crate::records::PassFail;
        use indexmap::IndexMap;
        use std::io::Cursor;

        let input = Cursor::new(b"@seq1\nACGT\n+\nIIII\n@other\nAAAA\n+\nIIII\n".to_vec());
        let mut statuses: IndexMap<String, PassFail> = IndexMap::new();
        statuses.insert("seq1".to_string(), PassFail::Pass);

        let mut pass: Vec<u8> = Vec::new();
        let mut fail: Vec<u8> = Vec::new();
        let got = split_fasta_from_read(input, &statuses, &mut pass, &mut fail).unwrap();

        assert_eq!(pass, b">seq1\nACGT\n".to_vec());
        assert!(fail.is_empty());
        assert_eq!(got.n_unknown, 1);
    }

    #[test]
    fn split_wraps_long_sequences() {
        use super::split_fasta_from_read;
        use crate::records::PassFail;
        use indexmap::IndexMap;
        use std::io::Cursor;

        let seq = "ACGT".repeat(20);
        let input = Cursor::new(format!(">long\n{}\n{}\n", &seq[..50], &seq[50..]).into_bytes());
        let mut statuses: IndexMap<String, PassFail> = IndexMap::new();
        statuses.insert("long".to_string(), PassFail::Fail);

        let mut pass: Vec<u8> = Vec::new();
        let mut fail: Vec<u8> = Vec::new();
        split_fasta_from_read(input, &statuses, &mut pass, &mut fail).unwrap();

        let expected = format!(">long\n{}\n{}\n", &seq[..60], &seq[60..]).into_bytes();
        assert_eq!(fail, expected);
    }
}
