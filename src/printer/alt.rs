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
use crate::printer::opt;
use crate::printer::yes_no;
use crate::records::Alert;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.alt` line
pub fn format_alt_fields(
    record: &Alert,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.seq_name.clone(),
        record.model.clone(),
        opt(&record.ftr_type),
        opt(&record.ftr_name),
        opt(&record.ftr_idx),
        record.code.clone(),
        yes_no(record.fatal),
        record.short_desc.clone(),
        opt(&record.seq_coords),
        opt(&record.seq_len),
        opt(&record.mdl_coords),
        opt(&record.mdl_len),
        record.detail.clone(),
    ];
    check_fields(TableKind::Alt, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_alt_sequence_alert() {
        use super::format_alt_fields;
        use crate::records::{Alert, Idx};

        let data = Alert {
            idx: Idx(vec![3, 1, 1]),
            seq_name: "seq3".to_string(),
            model: "NC_039477".to_string(),
            ftr_type: None,
            ftr_name: None,
            ftr_idx: None,
            code: "lowcovrg".to_string(),
            fatal: true,
            short_desc: "LOW_COVERAGE".to_string(),
            seq_coords: None,
            seq_len: None,
            mdl_coords: None,
            mdl_len: None,
            detail: "low sequence fraction with significant similarity to homology model [0.852<0.900]".to_string(),
        };

        let got = format_alt_fields(&data).unwrap();
        let expected: Vec<String> = ["3.1.1", "seq3", "NC_039477", "-", "-", "-", "lowcovrg", "yes", "LOW_COVERAGE", "-", "-", "-", "-",
                                     "low sequence fraction with significant similarity to homology model [0.852<0.900]"].iter().map(|x| x.to_string()).collect();

        assert_eq!(got, expected);
    }

    #[test]
    fn error_on_feature_name_with_space() {
        use super::format_alt_fields;
        use crate::records::{Alert, Idx};

        let data = Alert {
            idx: Idx(vec![1, 1, 1]), seq_name: "seq1".to_string(), model: "NC_1".to_string(),
            ftr_type: Some("CDS".to_string()), ftr_name: Some("VP 1".to_string()), ftr_idx: Some(2),
            code: "cdsstopn".to_string(), fatal: true, short_desc: "CDS_HAS_STOP_CODON".to_string(),
            seq_coords: None, seq_len: None, mdl_coords: None, mdl_len: None, detail: "-".to_string(),
        };

        assert!(format_alt_fields(&data).is_err());
    }
}
