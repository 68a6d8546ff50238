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
use crate::records::SeqAnnotation;

/// Parse a line from an `.sqa` file
///
/// Reads the annotation summary of one sequence. Unannotated sequences have
/// `-` in the model and feature count columns.
///
pub fn read_sqa(
    line: &str,
) -> Result<SeqAnnotation, LineError> {
    let fields = Fields::new(line, TableKind::Sqa)?;

    let res = SeqAnnotation {
        idx: fields.parse::<u32>(0)?,
        seq_name: fields.string(1),
        seq_len: fields.parse::<u64>(2)?,
        status: fields.parse(3)?,
        annotated: fields.yes_no(4)?,
        model: fields.opt_string(5),
        group: fields.opt_string(6),
        subgroup: fields.opt_string(7),
        n_ftr_annotated: fields.opt_parse::<u32>(8)?,
        n_ftr_missing: fields.opt_parse::<u32>(9)?,
        n_ftr_5p_trunc: fields.opt_parse::<u32>(10)?,
        n_ftr_3p_trunc: fields.opt_parse::<u32>(11)?,
        n_ftr_alerts: fields.opt_parse::<u32>(12)?,
        seq_alerts: fields.list(13),
    };
    Ok(res)
}
