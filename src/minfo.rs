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

//! Reading and writing VADR model info (`.minfo`) files.
//!
//! A model info file describes the models in a model library and the
//! features annotated in each model:
//!
//! ```text
//! # comment
//! MODEL NC_039477 blastdb:"NC_039477.vadr.protein.fa" group:"Norovirus" length:"7547" subgroup:"GII"
//! FEATURE NC_039477 type:"CDS" coords:"5..5104:+" parent_idx_str:"GBNULL" gene:"ORF1" product:"nonstructural polyprotein"
//! ```
//!
//! Values are always double-quoted and may contain spaces. A `FEATURE` line
//! belongs to the model with the same name, which must have been declared
//! on an earlier `MODEL` line.
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::minfo::read_minfo;
//! use std::io::Cursor;
//!
//! let mut data: Vec<u8> = b"MODEL NC_039477 group:\"Norovirus\" length:\"7547\" subgroup:\"GII\"\n".to_vec();
//! data.append(&mut b"FEATURE NC_039477 type:\"CDS\" coords:\"5..5104:+\" product:\"nonstructural polyprotein\"\n".to_vec());
//! let mut input = Cursor::new(data);
//!
//! let models = read_minfo(&mut input).unwrap();
//!
//! assert_eq!(models[0].length(), Some(7547));
//! assert_eq!(models[0].features[0].product(), Some("nonstructural polyprotein"));
//! ```
//!

use crate::coords::Coords;

use std::fmt;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;

use indexmap::IndexMap;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum MinfoErrorKind {
    UnknownLineType(String),
    MissingName,
    MalformedPair(String),
    DuplicateKey(String),
    DuplicateModel(String),
    UndeclaredModel(String),
    InvalidValue { key: &'static str, value: String, reason: String },
    CoordsOutOfRange { coords: String, length: u64 },
}

/// Error on line `line` (1-based) of a model info file.
#[derive(Debug, Clone, PartialEq)]
pub struct MinfoError {
    pub line: usize,
    pub kind: MinfoErrorKind,
}

impl fmt::Display for MinfoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            MinfoErrorKind::UnknownLineType(x) => write!(f, "unknown line type '{}', expected MODEL or FEATURE", x),
            MinfoErrorKind::MissingName => write!(f, "missing model name"),
            MinfoErrorKind::MalformedPair(x) => write!(f, "malformed key:\"value\" pair at '{}'", x),
            MinfoErrorKind::DuplicateKey(x) => write!(f, "key '{}' given more than once", x),
            MinfoErrorKind::DuplicateModel(x) => write!(f, "model '{}' declared more than once", x),
            MinfoErrorKind::UndeclaredModel(x) => write!(f, "feature for undeclared model '{}'", x),
            MinfoErrorKind::InvalidValue { key, value, reason } => write!(f, "invalid {} '{}': {}", key, value, reason),
            MinfoErrorKind::CoordsOutOfRange { coords, length } => write!(f, "coords '{}' extend past model length {}", coords, length),
        }
    }
}

impl std::error::Error for MinfoError {}

/// One feature of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureInfo {
    pub attrs: IndexMap<String, String>,
}

impl FeatureInfo {
    pub fn feature_type(&self) -> Option<&str> {
        self.attrs.get("type").map(|x| x.as_str())
    }

    /// Checked when the file is read.
    pub fn coords(&self) -> Option<Coords> {
        self.attrs.get("coords").and_then(|x| x.parse::<Coords>().ok())
    }

    pub fn product(&self) -> Option<&str> {
        self.attrs.get("product").map(|x| x.as_str())
    }

    pub fn gene(&self) -> Option<&str> {
        self.attrs.get("gene").map(|x| x.as_str())
    }
}

/// One model and its features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub features: Vec<FeatureInfo>,
}

impl ModelInfo {
    /// Checked when the file is read.
    pub fn length(&self) -> Option<u64> {
        self.attrs.get("length").and_then(|x| x.parse::<u64>().ok())
    }

    pub fn group(&self) -> Option<&str> {
        self.attrs.get("group").map(|x| x.as_str())
    }

    pub fn subgroup(&self) -> Option<&str> {
        self.attrs.get("subgroup").map(|x| x.as_str())
    }

    /// Protein FASTA used as the blastx database.
    pub fn blastdb(&self) -> Option<&str> {
        self.attrs.get("blastdb").map(|x| x.as_str())
    }

    pub fn cmfile(&self) -> Option<&str> {
        self.attrs.get("cmfile").map(|x| x.as_str())
    }

    pub fn has_cds(&self) -> bool {
        self.features.iter().any(|x| x.feature_type() == Some("CDS"))
    }
}

/// Parse the `key:"value"` pairs in `text`.
fn read_pairs(
    text: &str,
) -> Result<IndexMap<String, String>, MinfoErrorKind> {
    let mut pairs: IndexMap<String, String> = IndexMap::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let malformed = || MinfoErrorKind::MalformedPair(rest.to_string());
        let (key, after_key) = rest.split_once(":\"").ok_or_else(malformed)?;
        if key.is_empty() || key.contains(char::is_whitespace) || key.contains(':') {
            return Err(malformed())
        }
        let (value, after_value) = after_key.split_once('"').ok_or_else(malformed)?;
        if !after_value.is_empty() && !after_value.starts_with(char::is_whitespace) {
            return Err(malformed())
        }
        if pairs.insert(key.to_string(), value.to_string()).is_some() {
            return Err(MinfoErrorKind::DuplicateKey(key.to_string()))
        }
        rest = after_value.trim_start();
    }
    Ok(pairs)
}

fn check_model(
    model: &ModelInfo,
) -> Result<(), MinfoErrorKind> {
    if let Some(value) = model.attrs.get("length") {
        if let Err(e) = value.parse::<u64>() {
            return Err(MinfoErrorKind::InvalidValue { key: "length", value: value.clone(), reason: e.to_string() })
        }
    }
    Ok(())
}

fn check_feature(
    feature: &FeatureInfo,
    length: Option<u64>,
) -> Result<(), MinfoErrorKind> {
    if let Some(value) = feature.attrs.get("coords") {
        let coords = value.parse::<Coords>().map_err(|e| MinfoErrorKind::InvalidValue { key: "coords", value: value.clone(), reason: e.reason.to_string() })?;
        if let Some(length) = length {
            if coords.span().1 > length {
                return Err(MinfoErrorKind::CoordsOutOfRange { coords: value.clone(), length })
            }
        }
    }
    Ok(())
}

/// Read all models from a model info file in [Read].
pub fn read_minfo<R: Read>(
    conn_in: &mut R,
) -> Result<Vec<ModelInfo>, E> {
    let mut models: IndexMap<String, ModelInfo> = IndexMap::new();

    for (i, line) in BufReader::new(conn_in).lines().enumerate() {
        let line = line?;
        let err = |kind: MinfoErrorKind| MinfoError { line: i + 1, kind };

        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (line_type, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        let (name, rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if name.is_empty() && (line_type == "MODEL" || line_type == "FEATURE") {
            return Err(Box::new(err(MinfoErrorKind::MissingName)))
        }

        match line_type {
            "MODEL" => {
                if models.contains_key(name) {
                    return Err(Box::new(err(MinfoErrorKind::DuplicateModel(name.to_string()))))
                }
                let attrs = read_pairs(rest).map_err(err)?;
                let model = ModelInfo { name: name.to_string(), attrs, features: Vec::new() };
                check_model(&model).map_err(err)?;
                models.insert(name.to_string(), model);
            },
            "FEATURE" => {
                let model = models.get_mut(name).ok_or_else(|| err(MinfoErrorKind::UndeclaredModel(name.to_string())))?;
                let feature = FeatureInfo { attrs: read_pairs(rest).map_err(err)? };
                check_feature(&feature, model.length()).map_err(err)?;
                model.features.push(feature);
            },
            other => return Err(Box::new(err(MinfoErrorKind::UnknownLineType(other.to_string())))),
        }
    }

    log::debug!("Read {} models", models.len());
    Ok(models.into_values().collect())
}

fn format_pairs(
    attrs: &IndexMap<String, String>,
    out: &mut String,
) -> Result<(), E> {
    for (key, value) in attrs {
        if key.is_empty() || key.contains(char::is_whitespace) || key.contains(':') || value.contains(['"', '\n']) {
            return Err(Box::new(MinfoError { line: 0, kind: MinfoErrorKind::MalformedPair(format!("{}:\"{}\"", key, value)) }))
        }
        out.push(' ');
        out.push_str(key);
        out.push_str(":\"");
        out.push_str(value);
        out.push('"');
    }
    Ok(())
}

/// Write `models` as a model info file to [Write].
pub fn format_minfo<W: Write>(
    models: &[ModelInfo],
    conn_out: &mut W,
) -> Result<(), E> {
    for model in models {
        let mut formatted = format!("MODEL {}", model.name);
        format_pairs(&model.attrs, &mut formatted)?;
        formatted.push('\n');
        for feature in &model.features {
            formatted.push_str("FEATURE ");
            formatted.push_str(&model.name);
            format_pairs(&feature.attrs, &mut formatted)?;
            formatted.push('\n');
        }
        conn_out.write_all(formatted.as_bytes())?;
    }
    conn_out.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_minfo_two_models() {
        use super::read_minfo;
        use crate::coords::Strand;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"# created by v-build.pl\n".to_vec();
        data.append(&mut b"MODEL NC_001959 blastdb:\"NC_001959.vadr.protein.fa\" group:\"Norovirus\" length:\"7654\" subgroup:\"GI\"\n".to_vec());
        data.append(&mut b"FEATURE NC_001959 type:\"gene\" coords:\"5..5374:+\" gene:\"ORF1\"\n".to_vec());
        data.append(&mut b"FEATURE NC_001959 type:\"CDS\" coords:\"5..5374:+\" gene:\"ORF1\" product:\"nonstructural polyprotein\"\n".to_vec());
        data.append(&mut b"\n".to_vec());
        data.append(&mut b"MODEL NC_008311 length:\"7382\"\n".to_vec());
        let mut input = Cursor::new(data);

        let got = read_minfo(&mut input).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "NC_001959");
        assert_eq!(got[0].group(), Some("Norovirus"));
        assert_eq!(got[0].subgroup(), Some("GI"));
        assert_eq!(got[0].blastdb(), Some("NC_001959.vadr.protein.fa"));
        assert_eq!(got[0].features.len(), 2);
        assert_eq!(got[0].features[1].feature_type(), Some("CDS"));
        assert_eq!(got[0].features[1].gene(), Some("ORF1"));
        assert_eq!(got[0].features[1].coords().unwrap().strand(), Some(Strand::Plus));
        assert!(got[0].has_cds());
        assert!(!got[1].has_cds());
        assert_eq!(got[1].cmfile(), None);
    }

    #[test]
    fn read_minfo_errors() {
        use super::{read_minfo, MinfoError, MinfoErrorKind};
        use std::io::Cursor;

        let cases: Vec<(&[u8], MinfoErrorKind)> = vec![
            (&b"SEQUENCE NC_1 length:\"10\"\n"[..], MinfoErrorKind::UnknownLineType("SEQUENCE".to_string())),
            (&b"MODEL NC_1 length:10\n"[..], MinfoErrorKind::MalformedPair("length:10".to_string())),
            (&b"MODEL NC_1 length:\"10\" length:\"11\"\n"[..], MinfoErrorKind::DuplicateKey("length".to_string())),
            (&b"MODEL NC_1\nMODEL NC_1\n"[..], MinfoErrorKind::DuplicateModel("NC_1".to_string())),
            (&b"FEATURE NC_1 type:\"CDS\"\n"[..], MinfoErrorKind::UndeclaredModel("NC_1".to_string())),
            (&b"MODEL NC_1 length:\"10\"\nFEATURE NC_1 coords:\"5..11:+\"\n"[..], MinfoErrorKind::CoordsOutOfRange { coords: "5..11:+".to_string(), length: 10 }),
            (&b"MODEL\n"[..], MinfoErrorKind::MissingName),
            (&b"MODEL NC_1 a:b:\"c\"\n"[..], MinfoErrorKind::MalformedPair("a:b:\"c\"".to_string())),
        ];

        for (data, expected) in cases {
            let mut input = Cursor::new(data.to_vec());
            let got = read_minfo(&mut input).unwrap_err();
            let got = got.downcast_ref::<MinfoError>().unwrap();
            assert_eq!(got.kind, expected);
        }
    }

    #[test]
    fn format_minfo_reads_back() {
        use super::{format_minfo, read_minfo};
        use std::io::Cursor;

        let data = b"MODEL NC_039477 group:\"Norovirus\" length:\"7547\"\nFEATURE NC_039477 type:\"CDS\" coords:\"5..5104:+\" product:\"nonstructural polyprotein\"\n".to_vec();
        let models = read_minfo(&mut Cursor::new(data.clone())).unwrap();

        let mut got: Vec<u8> = Vec::new();
        format_minfo(&models, &mut got).unwrap();

        assert_eq!(got, data);
    }

    #[test]
    fn format_minfo_rejects_quotes() {
        use super::{format_minfo, ModelInfo};

        let mut model = ModelInfo { name: "NC_1".to_string(), ..Default::default() };
        model.attrs.insert("product".to_string(), "a \"quoted\" name".to_string());

        let mut got: Vec<u8> = Vec::new();
        assert!(format_minfo(&[model], &mut got).is_err());
    }
}
