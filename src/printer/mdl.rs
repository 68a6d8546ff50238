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
use crate::records::ModelCount;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.mdl` line
pub fn format_mdl_fields(
    record: &ModelCount,
) -> Result<Vec<String>, E> {
    let fields = vec![
        opt(&record.idx),
        record.model.clone(),
        opt(&record.group),
        opt(&record.subgroup),
        record.n_seqs.to_string(),
        record.n_pass.to_string(),
        record.n_fail.to_string(),
    ];
    check_fields(TableKind::Mdl, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_mdl_total_row() {
        use super::format_mdl_fields;
        use crate::records::ModelCount;

        let data = ModelCount { idx: None, model: "*none*".to_string(), group: None, subgroup: None, n_seqs: 1, n_pass: 0, n_fail: 1 };

        let got = format_mdl_fields(&data).unwrap();

        assert_eq!(got, vec!["-", "*none*", "-", "-", "1", "0", "1"]);
    }
}
