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
use crate::coords::Coords;
use crate::parser::Fields;
use crate::parser::LineError;
use crate::records::Alert;

/// Parse a line from an `.alt` file
///
/// Reads one reported alert. Sequence-level alerts have `-` in the feature
/// type, name, and index columns. The alert detail in the last column may
/// contain spaces.
///
pub fn read_alt(
    line: &str,
) -> Result<Alert, LineError> {
    let fields = Fields::new(line, TableKind::Alt)?;

    let res = Alert {
        idx: fields.idx(0, 3)?,
        seq_name: fields.string(1),
        model: fields.string(2),
        ftr_type: fields.opt_string(3),
        ftr_name: fields.opt_string(4),
        ftr_idx: fields.opt_parse::<u32>(5)?,
        code: fields.string(6),
        fatal: fields.yes_no(7)?,
        short_desc: fields.string(8),
        seq_coords: fields.opt_parse::<Coords>(9)?,
        seq_len: fields.opt_parse::<u64>(10)?,
        mdl_coords: fields.opt_parse::<Coords>(11)?,
        mdl_len: fields.opt_parse::<u64>(12)?,
        detail: fields.string(13),
    };
    Ok(res)
}
