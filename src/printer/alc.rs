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
use crate::printer::yes_no;
use crate::records::AlertCount;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.alc` line
pub fn format_alc_fields(
    record: &AlertCount,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.code.clone(),
        yes_no(record.causes_failure),
        record.short_desc.clone(),
        record.scope.to_string(),
        record.n_cases.to_string(),
        record.n_seqs.to_string(),
        record.long_desc.clone(),
    ];
    check_fields(TableKind::Alc, &fields)?;
    Ok(fields)
}
