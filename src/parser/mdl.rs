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
use crate::records::ModelCount;

/// Parse a line from an `.mdl` file
///
/// Reads the pass/fail counts for one model, or one of the `*all*` and
/// `*none*` total rows which have `-` as their index.
///
pub fn read_mdl(
    line: &str,
) -> Result<ModelCount, LineError> {
    let fields = Fields::new(line, TableKind::Mdl)?;

    let res = ModelCount {
        idx: fields.opt_parse::<u32>(0)?,
        model: fields.string(1),
        group: fields.opt_string(2),
        subgroup: fields.opt_string(3),
        n_seqs: fields.parse::<u32>(4)?,
        n_pass: fields.parse::<u32>(5)?,
        n_fail: fields.parse::<u32>(6)?,
    };
    Ok(res)
}
