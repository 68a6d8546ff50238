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
use crate::TableKind;
use crate::parser::Fields;
use crate::parser::LineError;
use crate::records::FeatureAnnotation;

/// Parse a line from an `.ftr` file
///
/// Reads the annotation of one feature in one sequence.
///
pub fn read_ftr(
    line: &str,
) -> Result<FeatureAnnotation, LineError> {
    let fields = Fields::new(line, TableKind::Ftr)?;

    let res = FeatureAnnotation {
        idx: fields.idx(0, 2)?,
        seq_name: fields.string(1),
        seq_len: fields.parse::<u64>(2)?,
        status: fields.parse(3)?,
        model: fields.string(4),
        ftr_type: fields.string(5),
        ftr_name: fields.string(6),
        ftr_len: fields.parse::<u64>(7)?,
        ftr_idx: fields.parse::<u32>(8)?,
        parent_idx: fields.opt_parse::<u32>(9)?,
        strand: fields.parse(10)?,
        n_from: fields.parse::<u64>(11)?,
        n_to: fields.parse::<u64>(12)?,
        n_instp: fields.opt_parse::<u64>(13)?,
        trunc: fields.parse(14)?,
        n_5p_ambig: fields.parse::<u64>(15)?,
        n_3p_ambig: fields.parse::<u64>(16)?,
        p_from: fields.opt_parse::<u64>(17)?,
        p_to: fields.opt_parse::<u64>(18)?,
        p_instp: fields.opt_parse::<u64>(19)?,
        p_score: fields.opt_parse::<u64>(20)?,
        n_segments_annotated: fields.parse::<u32>(21)?,
        n_segments_missing: fields.parse::<u32>(22)?,
        seq_coords: fields.parse(23)?,
        mdl_coords: fields.parse(24)?,
        alerts: fields.list(25),
    };
    Ok(res)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_ftr_cds() {
        use super::read_ftr;
        use crate::coords::Strand;
        use crate::records::{Idx, PassFail, Truncation};

        let data = "1.3  MN908947.3  29903  PASS  NC_045512  CDS  surface_glycoprotein  3822  8  7  +  21563  25384  -  no  0  0  21563  25381  -  7616  1  0  21563..25384:+  21563..25384:+  -";

        let got = read_ftr(data).unwrap();

        assert_eq!(got.idx, Idx(vec![1, 3]));
        assert_eq!(got.seq_len, 29903);
        assert_eq!(got.status, PassFail::Pass);
        assert_eq!(got.ftr_name, "surface_glycoprotein");
        assert_eq!(got.parent_idx, Some(7));
        assert_eq!(got.strand, Strand::Plus);
        assert_eq!(got.n_instp, None);
        assert_eq!(got.trunc, Truncation::No);
        assert_eq!(got.p_score, Some(7616));
        assert_eq!(got.seq_coords.len(), got.ftr_len);
        assert!(got.alerts.is_empty());
    }

    #[test]
    fn read_ftr_with_alerts() {
        use super::read_ftr;
        use crate::records::{PassFail, Truncation};

        let data = "2.1  seq2  7000  FAIL  NC_039477  CDS  nonstructural_polyprotein  4990  1  -  +  1  4990  -  5'  12  0  -  -  -  -  1  0  1..4990:+  111..5100:+  cdsstopn,indf5pst";

        let got = read_ftr(data).unwrap();

        assert_eq!(got.status, PassFail::Fail);
        assert_eq!(got.parent_idx, None);
        assert_eq!(got.trunc, Truncation::FivePrime);
        assert_eq!(got.n_5p_ambig, 12);
        assert_eq!(got.p_from, None);
        assert_eq!(got.alerts, vec!["cdsstopn".to_string(), "indf5pst".to_string()]);
    }

    #[test]
    fn read_ftr_too_few_fields() {
        use super::read_ftr;
        use crate::parser::LineError;

        let got = read_ftr("2.1  seq2  7000  FAIL  NC_039477  CDS");

        assert_eq!(got, Err(LineError::TooFewFields { expected: 26, found: 6 }));
    }
}
