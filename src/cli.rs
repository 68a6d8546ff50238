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
use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Check that tables follow the VADR format
    Check {
        // Input files
        #[arg(group = "input", required = true, help = "Input file(s)")]
        input_files: Vec<PathBuf>,

        // Table kind, guessed from the file name or header if not given
        #[arg(long = "kind", help = "Table kind (alc, alt, ftr, mdl, sgm, sqa, sqc)")]
        kind: Option<String>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Reformat a table
    Convert {
        // Input file
        #[arg(group = "input", required = true, help = "Input file")]
        input_file: PathBuf,

        // Table kind, guessed from the file name or header if not given
        #[arg(long = "kind", help = "Table kind (alc, alt, ftr, mdl, sgm, sqa, sqc)")]
        kind: Option<String>,

        // Output layout, defaults to VADR
        #[arg(long = "format", default_value = "vadr", help = "Output format (vadr, tsv)")]
        format: String,

        // Output file path, defaults to stdout
        #[arg(short = 'o', long = "output", required = false)]
        out_file: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Summarize a VADR run
    Report {
        // VADR output directory
        #[arg(required = true, help = "VADR output directory")]
        run_dir: PathBuf,

        // Output directory
        #[arg(required = true, help = "Output directory to create")]
        out_dir: PathBuf,

        // Overwrite the output directory
        #[arg(short = 'f', long = "force", default_value_t = false)]
        force: bool,

        // Sequences used as input to the run
        #[arg(long = "fasta", help = "Split these sequences into passing and failing")]
        fasta: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Set operations on failing or passing sequences of VADR runs
    #[command(group(ArgGroup::new("op").required(true).multiple(false)))]
    Set {
        // Input directories
        #[arg(group = "input", required = true, help = "VADR output directories")]
        run_dirs: Vec<PathBuf>,

        // Use passing instead of failing sequences
        #[arg(long = "pass", default_value_t = false)]
        pass: bool,

        // Operations
        // // Union
        #[arg(short = 'u', long = "union", group = "op", help = "Union (A or B)")]
        union: bool,
        // // Intersection
        #[arg(short = 'i', long = "intersection", group = "op", help = "Intersection (A and B)")]
        intersection: bool,
        // // Diff
        #[arg(short = 'd', long = "diff", group = "op", help = r"Difference (A \ B)")]
        diff: bool,
        // // Symmetric difference (XOR)
        #[arg(short = 'x', long = "xor", group = "op", help = "Symmetric difference (A xor B)")]
        xor: bool,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // List models in a model library and check its files
    Models {
        // Model directory
        #[arg(long = "mdir", env = "VADRMODELDIR")]
        mdir: Option<PathBuf>,

        // Model library name
        #[arg(long = "mkey", default_value = "vadr")]
        mkey: String,

        // Model file, defaults to <mdir>/<mkey>.cm
        #[arg(short = 'm', long = "cm")]
        cm_file: Option<PathBuf>,

        // Model info file, defaults to <mdir>/<mkey>.minfo
        #[arg(short = 'i', long = "minfo")]
        minfo_file: Option<PathBuf>,

        // Directory with the protein databases, defaults to <mdir>
        #[arg(short = 'b', long = "blastdb")]
        blastdb_dir: Option<PathBuf>,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
