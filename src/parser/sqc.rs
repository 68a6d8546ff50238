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
use crate::coords::Strand;
use crate::parser::Fields;
use crate::parser::LineError;
use crate::records::SeqClassification;

/// Parse a line from an `.sqc` file
///
/// Reads the classification of one sequence: the best (`model1`) and second
/// best (`model2`) scoring model, the score difference between them, and the
/// coverage of the sequence by hits to `model1`.
///
pub fn read_sqc(
    line: &str,
) -> Result<SeqClassification, LineError> {
    let fields = Fields::new(line, TableKind::Sqc)?;

    // `-` is a valid strand, it only means "no value" when there is no hit
    let model1 = fields.opt_string(5);
    let strand = if model1.is_some() { Some(fields.parse::<Strand>(14)?) } else { None };

    let res = SeqClassification {
        idx: fields.parse::<u32>(0)?,
        seq_name: fields.string(1),
        seq_len: fields.parse::<u64>(2)?,
        status: fields.parse(3)?,
        annotated: fields.yes_no(4)?,
        model1,
        group1: fields.opt_string(6),
        subgroup1: fields.opt_string(7),
        score: fields.opt_parse::<f64>(8)?,
        score_per_nt: fields.opt_parse::<f64>(9)?,
        seq_cov: fields.opt_parse::<f64>(10)?,
        mdl_cov: fields.opt_parse::<f64>(11)?,
        bias: fields.opt_parse::<f64>(12)?,
        n_hits: fields.opt_parse::<u32>(13)?,
        strand,
        model2: fields.opt_string(15),
        group2: fields.opt_string(16),
        subgroup2: fields.opt_string(17),
        score_diff: fields.opt_parse::<f64>(18)?,
        diff_per_nt: fields.opt_parse::<f64>(19)?,
        seq_alerts: fields.list(20),
    };
    Ok(res)
}
