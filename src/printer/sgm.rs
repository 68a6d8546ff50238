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
use crate::records::SegmentAnnotation;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.sgm` line
pub fn format_sgm_fields(
    record: &SegmentAnnotation,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.seq_name.clone(),
        record.seq_len.to_string(),
        record.status.to_string(),
        record.model.clone(),
        record.ftr_type.clone(),
        record.ftr_name.clone(),
        record.ftr_idx.to_string(),
        record.num_sgm.to_string(),
        record.sgm_idx.to_string(),
        record.seq_start.to_string(),
        record.seq_stop.to_string(),
        record.mdl_start.to_string(),
        record.mdl_stop.to_string(),
        record.sgm_len.to_string(),
        record.fract.to_string(),
        record.strand.to_string(),
        record.trunc.to_string(),
        opt(&record.pp_5p),
        opt(&record.pp_3p),
        opt(&record.gap_5p.map(yes_no)),
        opt(&record.gap_3p.map(yes_no)),
    ];
    check_fields(TableKind::Sgm, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_sgm_fields() {
        use super::format_sgm_fields;
        use crate::coords::Strand;
        use crate::records::{Idx, PassFail, SegmentAnnotation, Truncation};

        let data = SegmentAnnotation {
            idx: Idx(vec![1, 1]),
            seq_name: "seq1".to_string(),
            seq_len: 7547,
            status: PassFail::Pass,
            model: "NC_039477".to_string(),
            ftr_type: "CDS".to_string(),
            ftr_name: "VP1".to_string(),
            ftr_idx: 2,
            num_sgm: 2,
            sgm_idx: 1,
            seq_start: 5,
            seq_stop: 5104,
            mdl_start: 5,
            mdl_stop: 5104,
            sgm_len: 5100,
            fract: 1.0,
            strand: Strand::Plus,
            trunc: Truncation::FivePrime,
            pp_5p: None,
            pp_3p: Some(0.95),
            gap_5p: None,
            gap_3p: Some(false),
        };

        let got = format_sgm_fields(&data).unwrap();

        assert_eq!(got[5..10], ["CDS", "VP1", "2", "2", "1"]);
        assert_eq!(got[15], "1");
        assert_eq!(got[17], "5'");
        assert_eq!(got[18..], ["-", "0.95", "-", "no"]);
    }
}
