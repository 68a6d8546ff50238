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
use crate::printer::check_fields;
use crate::printer::list;
use crate::printer::opt;
use crate::records::FeatureAnnotation;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.ftr` line
pub fn format_ftr_fields(
    record: &FeatureAnnotation,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.seq_name.clone(),
        record.seq_len.to_string(),
        record.status.to_string(),
        record.model.clone(),
        record.ftr_type.clone(),
        record.ftr_name.clone(),
        record.ftr_len.to_string(),
        record.ftr_idx.to_string(),
        opt(&record.parent_idx),
        record.strand.to_string(),
        record.n_from.to_string(),
        record.n_to.to_string(),
        opt(&record.n_instp),
        record.trunc.to_string(),
        record.n_5p_ambig.to_string(),
        record.n_3p_ambig.to_string(),
        opt(&record.p_from),
        opt(&record.p_to),
        opt(&record.p_instp),
        opt(&record.p_score),
        record.n_segments_annotated.to_string(),
        record.n_segments_missing.to_string(),
        record.seq_coords.to_string(),
        record.mdl_coords.to_string(),
        list(&record.alerts),
    ];
    check_fields(TableKind::Ftr, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_ftr_fields_matches_input_line() {
        use super::format_ftr_fields;
        use crate::parser::ftr::read_ftr;

        let data = "2.1  seq2  7480  FAIL  NC_039477  CDS  VP1  1620  2  -  +  5085  6704  -  3'  0  0  5085  6701  -  3255  1  0  5085..6704:+  5085..6704:+  cdsstopn,indf3pst";
        let record = read_ftr(data).unwrap();

        let got = format_ftr_fields(&record).unwrap();
        let expected: Vec<String> = data.split("  ").map(|x| x.to_string()).collect();

        assert_eq!(got, expected);
    }
}
