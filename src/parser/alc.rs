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
use crate::records::AlertCount;

/// Parse a line from an `.alc` file
///
/// Reads the count of one alert code. The last field, the long description,
/// may contain spaces.
///
pub fn read_alc(
    line: &str,
) -> Result<AlertCount, LineError> {
    let fields = Fields::new(line, TableKind::Alc)?;

    let res = AlertCount {
        idx: fields.parse::<u32>(0)?,
        code: fields.string(1),
        causes_failure: fields.yes_no(2)?,
        short_desc: fields.string(3),
        scope: fields.parse(4)?,
        n_cases: fields.parse::<u32>(5)?,
        n_seqs: fields.parse::<u32>(6)?,
        long_desc: fields.string(7),
    };
    Ok(res)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_alc_feature_alert() {
        use super::read_alc;
        use crate::records::{AlertCount, AlertScope};

        let data = "1  cdsstopn  yes  CDS_HAS_STOP_CODON  feature  2  1  in-frame stop codon exists 5' of stop position predicted by homology to reference [(S)]";
        let expected = AlertCount {
            idx: 1,
            code: "cdsstopn".to_string(),
            causes_failure: true,
            short_desc: "CDS_HAS_STOP_CODON".to_string(),
            scope: AlertScope::Feature,
            n_cases: 2,
            n_seqs: 1,
            long_desc: "in-frame stop codon exists 5' of stop position predicted by homology to reference [(S)]".to_string(),
        };

        let got = read_alc(data).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn read_alc_bad_scope() {
        use super::read_alc;
        use crate::parser::LineError;

        let got = read_alc("1  lowcovrg  yes  LOW_COVERAGE  genome  1  1  low sequence fraction with significant similarity to homology model");

        assert!(matches!(got, Err(LineError::InvalidValue { column: "per type", .. })));
    }

    #[test]
    fn read_alc_bad_yes_no() {
        use super::read_alc;
        use crate::parser::LineError;

        let got = read_alc("1  lowcovrg  YES  LOW_COVERAGE  sequence  1  1  low coverage");

        assert!(matches!(got, Err(LineError::InvalidValue { column: "causes failure", .. })));
    }
}
