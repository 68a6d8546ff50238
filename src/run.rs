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

//! VADR run directories and the output directories written by vadrtab.
//!
//! VADR writes the tables of a run named `D` into the directory `D` as
//! `D/D.vadr.<suffix>`. The tables present in a run are located with
//! [RunDir::open] and read with [RunTables::load].
//!

use crate::TableKind;
use crate::parse_from_read;
use crate::parser::open_table;
use crate::records::Alert;
use crate::records::AlertCount;
use crate::records::FeatureAnnotation;
use crate::records::ModelCount;
use crate::records::PassFail;
use crate::records::Record;
use crate::records::SegmentAnnotation;
use crate::records::SeqAnnotation;
use crate::records::SeqClassification;

use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunDirError {
    NotADirectory(PathBuf),
    NoTables(PathBuf),
}

impl fmt::Display for RunDirError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunDirError::NotADirectory(path) => write!(f, "{} is not a directory", path.display()),
            RunDirError::NoTables(path) => write!(f, "no VADR tables found in {}", path.display()),
        }
    }
}

impl std::error::Error for RunDirError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDirError {
    Exists(PathBuf),
    NotADirectory(PathBuf),
    CurrentDirectory(PathBuf),
    /// Removing the directory would delete an input.
    ContainsInput { dir: PathBuf, input: PathBuf },
}

impl fmt::Display for OutputDirError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputDirError::Exists(path) => write!(f, "output directory {} already exists, use -f to overwrite", path.display()),
            OutputDirError::NotADirectory(path) => write!(f, "{} exists and is not a directory", path.display()),
            OutputDirError::CurrentDirectory(path) => write!(f, "refusing to remove {}, it contains the current directory", path.display()),
            OutputDirError::ContainsInput { dir, input } => write!(f, "refusing to remove {}, it contains the input {}", dir.display(), input.display()),
        }
    }
}

impl std::error::Error for OutputDirError {}

/// Last component of `path`, resolving `.` and `..` if needed.
pub fn dir_basename(
    path: &Path,
) -> Result<String, E> {
    let name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => path.canonicalize()?.file_name().ok_or(RunDirError::NotADirectory(path.to_path_buf()))?.to_os_string(),
    };
    Ok(name.to_string_lossy().to_string())
}

/// Path of the output `<dir>/<basename(dir)>.<suffix>`.
///
/// ## Usage
///
/// ```rust
/// use vadrtab::run::output_path;
/// use std::path::{Path, PathBuf};
///
/// let got = output_path(Path::new("results/va-noro"), "fail.list").unwrap();
///
/// assert_eq!(got, PathBuf::from("results/va-noro/va-noro.fail.list"));
/// ```
pub fn output_path(
    dir: &Path,
    suffix: &str,
) -> Result<PathBuf, E> {
    let base = dir_basename(dir)?;
    Ok(dir.join(format!("{}.{}", base, suffix)))
}

/// Create the output directory `path`.
///
/// `path` must not exist unless `force` is set, in which case the existing
/// directory and its contents are removed first. Never removes a file, a
/// directory containing the current working directory, or a directory
/// containing any of `inputs`.
pub fn create_output_dir(
    path: &Path,
    force: bool,
    inputs: &[&Path],
) -> Result<(), E> {
    if path.exists() {
        if !force {
            return Err(Box::new(OutputDirError::Exists(path.to_path_buf())))
        }
        if !path.is_dir() {
            return Err(Box::new(OutputDirError::NotADirectory(path.to_path_buf())))
        }
        let target = path.canonicalize()?;
        let cwd = std::env::current_dir()?.canonicalize()?;
        if cwd.starts_with(&target) {
            return Err(Box::new(OutputDirError::CurrentDirectory(path.to_path_buf())))
        }
        for input in inputs {
            if input.canonicalize()?.starts_with(&target) {
                return Err(Box::new(OutputDirError::ContainsInput { dir: path.to_path_buf(), input: input.to_path_buf() }))
            }
        }
        log::warn!("Removing existing output directory {}", path.display());
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    log::info!("Created output directory {}", path.display());
    Ok(())
}

/// Tables located in a VADR output directory.
#[derive(Debug, Clone)]
pub struct RunDir {
    pub path: PathBuf,
    pub base: String,
    tables: IndexMap<TableKind, PathBuf>,
}

impl RunDir {
    /// Locate the tables of the run in `path`.
    ///
    /// Looks for `<base>.vadr.<suffix>` and `<base>.vadr.<suffix>.gz` where
    /// `base` is the name of the directory.
    pub fn open(
        path: &Path,
    ) -> Result<Self, E> {
        if !path.is_dir() {
            return Err(Box::new(RunDirError::NotADirectory(path.to_path_buf())))
        }
        let base = dir_basename(path)?;

        let mut tables: IndexMap<TableKind, PathBuf> = IndexMap::new();
        for kind in TableKind::all() {
            let plain = path.join(format!("{}.vadr.{}", base, kind.suffix()));
            let gz = path.join(format!("{}.vadr.{}.gz", base, kind.suffix()));
            if plain.is_file() {
                tables.insert(*kind, plain);
            } else if gz.is_file() {
                tables.insert(*kind, gz);
            } else {
                log::debug!("No {} table in {}", kind, path.display());
            }
        }

        if tables.is_empty() {
            return Err(Box::new(RunDirError::NoTables(path.to_path_buf())))
        }
        Ok(RunDir { path: path.to_path_buf(), base, tables })
    }

    pub fn table(
        &self,
        kind: TableKind,
    ) -> Option<&Path> {
        self.tables.get(&kind).map(|x| x.as_path())
    }

    /// Located tables in [TableKind::all] order.
    pub fn tables(
        &self,
    ) -> impl Iterator<Item = (&TableKind, &PathBuf)> {
        self.tables.iter()
    }
}

/// Contents of the tables of one run. Absent tables are None.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTables {
    pub alc: Option<Vec<AlertCount>>,
    pub alt: Option<Vec<Alert>>,
    pub ftr: Option<Vec<FeatureAnnotation>>,
    pub mdl: Option<Vec<ModelCount>>,
    pub sgm: Option<Vec<SegmentAnnotation>>,
    pub sqa: Option<Vec<SeqAnnotation>>,
    pub sqc: Option<Vec<SeqClassification>>,
}

impl RunTables {
    pub fn load(
        run: &RunDir,
    ) -> Result<Self, E> {
        let mut tables = RunTables::default();
        for (kind, path) in run.tables() {
            log::info!("Reading {}", path.display());
            let mut conn_in = open_table(path)?;
            let (_, records) = parse_from_read(Some(*kind), &mut conn_in).map_err(|e| format!("{}: {}", path.display(), e))?;
            tables.insert(*kind, records);
        }
        Ok(tables)
    }

    /// Read only the tables needed for [statuses](RunTables::statuses).
    pub fn load_statuses(
        run: &RunDir,
    ) -> Result<IndexMap<String, PassFail>, E> {
        let found = [TableKind::Sqa, TableKind::Sqc].into_iter().find_map(|kind| run.table(kind).map(|path| (kind, path)));
        let (kind, path) = match found {
            Some(x) => x,
            None => return Err(format!("{}: no .sqa or .sqc table", run.path.display()).into()),
        };
        log::info!("Reading {}", path.display());
        let mut conn_in = open_table(path)?;
        let (_, records) = parse_from_read(Some(kind), &mut conn_in).map_err(|e| format!("{}: {}", path.display(), e))?;

        let mut tables = RunTables::default();
        tables.insert(kind, records);
        tables.statuses().ok_or_else(|| format!("{}: no .sqa or .sqc table", run.path.display()).into())
    }

    /// Store `records` as the table of `kind`, dropping records of other kinds.
    pub fn insert(
        &mut self,
        kind: TableKind,
        records: Vec<Record>,
    ) {
        let records = records.into_iter();
        match kind {
            TableKind::Alc => self.alc = Some(records.filter_map(|x| if let Record::Alc(x) = x { Some(x) } else { None }).collect()),
            TableKind::Alt => self.alt = Some(records.filter_map(|x| if let Record::Alt(x) = x { Some(x) } else { None }).collect()),
            TableKind::Ftr => self.ftr = Some(records.filter_map(|x| if let Record::Ftr(x) = x { Some(x) } else { None }).collect()),
            TableKind::Mdl => self.mdl = Some(records.filter_map(|x| if let Record::Mdl(x) = x { Some(x) } else { None }).collect()),
            TableKind::Sgm => self.sgm = Some(records.filter_map(|x| if let Record::Sgm(x) = x { Some(x) } else { None }).collect()),
            TableKind::Sqa => self.sqa = Some(records.filter_map(|x| if let Record::Sqa(x) = x { Some(x) } else { None }).collect()),
            TableKind::Sqc => self.sqc = Some(records.filter_map(|x| if let Record::Sqc(x) = x { Some(x) } else { None }).collect()),
        }
    }

    /// Pass/fail status of every sequence in input order.
    ///
    /// Read from the `.sqa` table, or from `.sqc` if there is no `.sqa`.
    pub fn statuses(
        &self,
    ) -> Option<IndexMap<String, PassFail>> {
        if let Some(sqa) = &self.sqa {
            return Some(sqa.iter().map(|x| (x.seq_name.clone(), x.status)).collect())
        }
        self.sqc.as_ref().map(|sqc| sqc.iter().map(|x| (x.seq_name.clone(), x.status)).collect())
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn open_finds_plain_and_gzipped_tables() {
        use super::RunDir;
        use crate::TableKind;
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("va-test");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("va-test.vadr.sqa"), b"").unwrap();
        std::fs::write(dir.join("va-test.vadr.pass.tbl"), b"").unwrap();
        let f = std::fs::File::create(dir.join("va-test.vadr.alt.gz")).unwrap();
        let mut encoder = GzEncoder::new(f, Compression::default());
        encoder.write_all(b"").unwrap();
        encoder.finish().unwrap();

        let got = RunDir::open(&dir).unwrap();

        assert_eq!(got.base, "va-test");
        let kinds: Vec<TableKind> = got.tables().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, vec![TableKind::Alt, TableKind::Sqa]);
        assert!(got.table(TableKind::Alt).unwrap().ends_with("va-test.vadr.alt.gz"));
        assert!(got.table(TableKind::Ftr).is_none());
    }

    #[test]
    fn open_errors_without_tables() {
        use super::RunDir;

        let tmp = tempfile::tempdir().unwrap();

        assert!(RunDir::open(tmp.path()).is_err());
        assert!(RunDir::open(&tmp.path().join("missing")).is_err());
    }

    #[test]
    fn load_reads_tables_and_statuses() {
        use super::{RunDir, RunTables};
        use crate::records::PassFail;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("run");
        std::fs::create_dir(&dir).unwrap();
        let mut sqc = b"#idx  seq name  seq len  p/f  ant  model1  grp1  subgrp1  score  sc/nt  seq cov  mdl cov  bias  num hits  str  model2  grp2  subgrp2  score diff  diff/nt  seq alerts\n".to_vec();
        sqc.append(&mut b"1  seq1  7547  PASS  yes  NC_039477  Norovirus  GII  7110.4  0.942  0.999  0.998  0  1  +  -  -  -  -  -  -\n".to_vec());
        sqc.append(&mut b"2  seq2  120  FAIL  no  -  -  -  -  -  -  -  -  -  -  -  -  -  -  -  noannotn\n".to_vec());
        std::fs::write(dir.join("run.vadr.sqc"), sqc).unwrap();

        let run = RunDir::open(&dir).unwrap();
        let got = RunTables::load(&run).unwrap();

        assert!(got.sqa.is_none());
        assert_eq!(got.sqc.as_ref().unwrap().len(), 2);
        let statuses = got.statuses().unwrap();
        assert_eq!(statuses.get("seq2"), Some(&PassFail::Fail));
        assert_eq!(statuses.keys().collect::<Vec<&String>>(), vec!["seq1", "seq2"]);
        assert_eq!(RunTables::load_statuses(&run).unwrap(), statuses);
    }

    #[test]
    fn create_output_dir_respects_force() {
        use super::create_output_dir;

        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");

        create_output_dir(&out, false, &[]).unwrap();
        std::fs::write(out.join("old.txt"), b"old").unwrap();

        assert!(create_output_dir(&out, false, &[]).is_err());
        create_output_dir(&out, true, &[]).unwrap();
        assert!(out.is_dir());
        assert!(!out.join("old.txt").exists());
    }

    #[test]
    fn create_output_dir_refuses_files() {
        use super::create_output_dir;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("out");
        std::fs::write(&file, b"").unwrap();

        assert!(create_output_dir(&file, true, &[]).is_err());
        assert!(file.is_file());
    }

    #[test]
    fn create_output_dir_keeps_inputs() {
        use super::{create_output_dir, OutputDirError};

        let tmp = tempfile::tempdir().unwrap();
        let parent = tmp.path().join("results");
        let run = parent.join("va-test");
        std::fs::create_dir_all(&run).unwrap();
        std::fs::write(run.join("va-test.vadr.sqa"), b"").unwrap();

        for out in [&run, &parent] {
            let err = create_output_dir(out, true, &[run.as_path()]).unwrap_err();
            assert!(matches!(err.downcast_ref::<OutputDirError>(), Some(OutputDirError::ContainsInput { .. })));
        }
        assert!(run.join("va-test.vadr.sqa").is_file());

        let out = run.join("summary");
        std::fs::create_dir(&out).unwrap();
        create_output_dir(&out, true, &[run.as_path()]).unwrap();
        assert!(out.is_dir());
        assert!(run.join("va-test.vadr.sqa").is_file());
    }
}
