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
use crate::printer::yes_no;
use crate::records::SeqClassification;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.sqc` line
pub fn format_sqc_fields(
    record: &SeqClassification,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.seq_name.clone(),
        record.seq_len.to_string(),
        record.status.to_string(),
        yes_no(record.annotated),
        opt(&record.model1),
        opt(&record.group1),
        opt(&record.subgroup1),
        opt(&record.score),
        opt(&record.score_per_nt),
        opt(&record.seq_cov),
        opt(&record.mdl_cov),
        opt(&record.bias),
        opt(&record.n_hits),
        opt(&record.strand),
        opt(&record.model2),
        opt(&record.group2),
        opt(&record.subgroup2),
        opt(&record.score_diff),
        opt(&record.diff_per_nt),
        list(&record.seq_alerts),
    ];
    check_fields(TableKind::Sqc, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_sqc_fields_matches_input_line() {
        use super::format_sqc_fields;
        use crate::parser::sqc::read_sqc;

        let data = "1  seq1  7547  PASS  yes  NC_039477  Norovirus  GII  7110.4  0.942  0.999  0.998  0  1  +  NC_029646  Norovirus  GII  3544.6  0.47  -";
        let record = read_sqc(data).unwrap();

        let got = format_sqc_fields(&record).unwrap();

        assert_eq!(got.join("  "), data);
    }

    #[test]
    fn format_sqc_unclassified() {
        use super::format_sqc_fields;
        use crate::parser::sqc::read_sqc;

        let data = "2  seq2  120  FAIL  no  -  -  -  -  -  -  -  -  -  -  -  -  -  -  -  noannotn";
        let record = read_sqc(data).unwrap();

        let got = format_sqc_fields(&record).unwrap();

        assert_eq!(got.join("  "), data);
    }
}
