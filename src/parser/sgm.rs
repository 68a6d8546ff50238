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
use crate::records::SegmentAnnotation;

/// Parse a line from an `.sgm` file
///
/// Reads the annotation of one segment of a multi-segment feature. The
/// feature is identified by `ftr idx` within the sequence.
///
pub fn read_sgm(
    line: &str,
) -> Result<SegmentAnnotation, LineError> {
    let fields = Fields::new(line, TableKind::Sgm)?;

    let res = SegmentAnnotation {
        idx: fields.idx(0, 2)?,
        seq_name: fields.string(1),
        seq_len: fields.parse::<u64>(2)?,
        status: fields.parse(3)?,
        model: fields.string(4),
        ftr_type: fields.string(5),
        ftr_name: fields.string(6),
        ftr_idx: fields.parse::<u32>(7)?,
        num_sgm: fields.parse::<u32>(8)?,
        sgm_idx: fields.parse::<u32>(9)?,
        seq_start: fields.parse::<u64>(10)?,
        seq_stop: fields.parse::<u64>(11)?,
        mdl_start: fields.parse::<u64>(12)?,
        mdl_stop: fields.parse::<u64>(13)?,
        sgm_len: fields.parse::<u64>(14)?,
        fract: fields.parse::<f64>(15)?,
        strand: fields.parse(16)?,
        trunc: fields.parse(17)?,
        pp_5p: fields.opt_parse::<f64>(18)?,
        pp_3p: fields.opt_parse::<f64>(19)?,
        gap_5p: fields.opt_yes_no(20)?,
        gap_3p: fields.opt_yes_no(21)?,
    };
    if res.sgm_idx == 0 || res.sgm_idx > res.num_sgm {
        return Err(fields.invalid(9, format!("segment index must be between 1 and {}", res.num_sgm)))
    }
    Ok(res)
}
