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

//! Files that make up a VADR model library.
//!
//! A model library named `mkey` in the directory `mdir` consists of:
//!
//!   - `<mdir>/<mkey>.cm`, the covariance models, and the four index files
//!     `.cm.i1m`, `.cm.i1i`, `.cm.i1f` and `.cm.i1p` created by `cmpress`.
//!   - `<mdir>/<mkey>.minfo`, the model info file (see [minfo](crate::minfo)).
//!   - For every model with a CDS feature, a protein FASTA file used as the
//!     blastx database with its `.phr`, `.pin` and `.psq` index files.
//!

use crate::minfo::read_minfo;
use crate::minfo::ModelInfo;

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

type E = Box<dyn std::error::Error>;

/// Environment variable holding the default model directory.
pub const MODEL_DIR_VAR: &str = "VADRMODELDIR";

pub const CM_INDEX_SUFFIXES: [&str; 4] = [".i1m", ".i1i", ".i1f", ".i1p"];
pub const BLAST_INDEX_SUFFIXES: [&str; 3] = [".phr", ".pin", ".psq"];

#[derive(Debug, Clone)]
pub struct NoModelDir;

impl fmt::Display for NoModelDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No model directory, use --mdir or set ${}", MODEL_DIR_VAR)
    }
}

impl std::error::Error for NoModelDir {}

/// Kind of a missing library file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Cm,
    CmIndex,
    Minfo,
    ProteinFasta { model: String },
    BlastIndex { model: String },
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Artifact::Cm => write!(f, "model file"),
            Artifact::CmIndex => write!(f, "model index file"),
            Artifact::Minfo => write!(f, "model info file"),
            Artifact::ProteinFasta { model } => write!(f, "protein database for {}", model),
            Artifact::BlastIndex { model } => write!(f, "protein database index for {}", model),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingArtifact {
    pub path: PathBuf,
    pub artifact: Artifact,
}

impl fmt::Display for MissingArtifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing {}: {}", self.artifact, self.path.display())
    }
}

/// `path` with `suffix` appended to the file name.
fn append_suffix(
    path: &Path,
    suffix: &str,
) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Resolved locations of the files of a model library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPaths {
    pub cm: PathBuf,
    pub minfo: PathBuf,
    /// Directory containing the protein FASTA files.
    pub blastdb_dir: PathBuf,
}

impl LibraryPaths {
    /// Resolve the library paths.
    ///
    /// Explicit `cm`, `minfo` and `blastdb` paths take precedence over the
    /// defaults in `mdir`. If `mdir` is None it is read from `$VADRMODELDIR`,
    /// which is only required if some path is not given explicitly.
    ///
    /// ## Usage
    ///
    /// ```rust
    /// use vadrtab::library::LibraryPaths;
    /// use std::path::{Path, PathBuf};
    ///
    /// let got = LibraryPaths::resolve(Some(Path::new("models")), "noro", None, Some(Path::new("custom.minfo")), None).unwrap();
    ///
    /// assert_eq!(got.cm, PathBuf::from("models/noro.cm"));
    /// assert_eq!(got.minfo, PathBuf::from("custom.minfo"));
    /// assert_eq!(got.blastdb_dir, PathBuf::from("models"));
    /// ```
    pub fn resolve(
        mdir: Option<&Path>,
        mkey: &str,
        cm: Option<&Path>,
        minfo: Option<&Path>,
        blastdb: Option<&Path>,
    ) -> Result<Self, E> {
        let mdir: Option<PathBuf> = match mdir {
            Some(dir) => Some(dir.to_path_buf()),
            None => std::env::var_os(MODEL_DIR_VAR).map(PathBuf::from),
        };
        let in_mdir = |name: String| -> Result<PathBuf, NoModelDir> {
            mdir.as_ref().map(|dir| dir.join(name)).ok_or(NoModelDir)
        };

        let cm = match cm {
            Some(path) => path.to_path_buf(),
            None => in_mdir(format!("{}.cm", mkey))?,
        };
        let minfo = match minfo {
            Some(path) => path.to_path_buf(),
            None => in_mdir(format!("{}.minfo", mkey))?,
        };
        let blastdb_dir = match blastdb {
            Some(path) => path.to_path_buf(),
            None => mdir.clone().ok_or(NoModelDir)?,
        };

        log::debug!("Model file {}, model info {}, protein databases in {}", cm.display(), minfo.display(), blastdb_dir.display());
        Ok(LibraryPaths { cm, minfo, blastdb_dir })
    }

    /// Read the models from the model info file.
    pub fn load_models(
        &self,
    ) -> Result<Vec<ModelInfo>, E> {
        let mut conn_in = File::open(&self.minfo).map_err(|e| format!("{}: {}", self.minfo.display(), e))?;
        read_minfo(&mut conn_in).map_err(|e| format!("{}: {}", self.minfo.display(), e).into())
    }

    /// Protein FASTA of `model`.
    pub fn protein_fasta(
        &self,
        model: &ModelInfo,
    ) -> PathBuf {
        match model.blastdb() {
            Some(name) => self.blastdb_dir.join(name),
            None => self.blastdb_dir.join(format!("{}.vadr.protein.fa", model.name)),
        }
    }
}

/// List the library files that don't exist.
pub fn check(
    paths: &LibraryPaths,
    models: &[ModelInfo],
) -> Vec<MissingArtifact> {
    let mut missing: Vec<MissingArtifact> = Vec::new();
    let mut require = |path: PathBuf, artifact: Artifact| {
        if !path.is_file() {
            log::debug!("Missing {}", path.display());
            missing.push(MissingArtifact { path, artifact });
        }
    };

    require(paths.cm.clone(), Artifact::Cm);
    for suffix in CM_INDEX_SUFFIXES {
        require(append_suffix(&paths.cm, suffix), Artifact::CmIndex);
    }
    require(paths.minfo.clone(), Artifact::Minfo);

    for model in models.iter().filter(|x| x.has_cds()) {
        let fasta = paths.protein_fasta(model);
        for suffix in BLAST_INDEX_SUFFIXES {
            require(append_suffix(&fasta, suffix), Artifact::BlastIndex { model: model.name.clone() });
        }
        require(fasta, Artifact::ProteinFasta { model: model.name.clone() });
    }

    missing
}
