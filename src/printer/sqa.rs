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
use crate::records::SeqAnnotation;

type E = Box<dyn std::error::Error>;

/// Format the fields of an `.sqa` line
pub fn format_sqa_fields(
    record: &SeqAnnotation,
) -> Result<Vec<String>, E> {
    let fields = vec![
        record.idx.to_string(),
        record.seq_name.clone(),
        record.seq_len.to_string(),
        record.status.to_string(),
        yes_no(record.annotated),
        opt(&record.model),
        opt(&record.group),
        opt(&record.subgroup),
        opt(&record.n_ftr_annotated),
        opt(&record.n_ftr_missing),
        opt(&record.n_ftr_5p_trunc),
        opt(&record.n_ftr_3p_trunc),
        opt(&record.n_ftr_alerts),
        list(&record.seq_alerts),
    ];
    check_fields(TableKind::Sqa, &fields)?;
    Ok(fields)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_sqa_fields_matches_input_line() {
        use super::format_sqa_fields;
        use crate::parser::sqa::read_sqa;

        let data = "3  seq3  7480  FAIL  yes  NC_039477  Norovirus  GII  2  1  0  1  3  lowcovrg";
        let record = read_sqa(data).unwrap();

        let got = format_sqa_fields(&record).unwrap();

        assert_eq!(got.join("  "), data);
    }
}
