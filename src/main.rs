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
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use vadrtab::TableKind;
use vadrtab::library::LibraryPaths;
use vadrtab::printer::Layout;
use vadrtab::records::PassFail;
use vadrtab::records::Record;
use vadrtab::run::{create_output_dir, output_path, RunDir, RunTables};
use vadrtab::sets::{merge_into, names, status_bitmap, MergeOp, SequenceIndex};

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    // Only fails if a logger is already set
    let _ = stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init();
}

fn parse_kind(
    kind: Option<&str>,
) -> Result<Option<TableKind>, E> {
    match kind {
        Some(kind) => Ok(Some(kind.parse::<TableKind>()?)),
        None => Ok(None),
    }
}

fn create_writer(
    path: &Path,
) -> Result<BufWriter<File>, E> {
    let f = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(BufWriter::new(f))
}

/// Validate each file, returns false if any has errors.
fn check_files(
    input_files: &[PathBuf],
    kind: Option<&str>,
) -> Result<bool, E> {
    let kind = parse_kind(kind)?;
    let stdout = std::io::stdout();
    let mut conn_out = stdout.lock();

    let mut all_ok = true;
    for file in input_files {
        let file_kind = kind.or_else(|| TableKind::from_path(file));
        let report = vadrtab::parser::open_table(file).and_then(|mut conn_in| vadrtab::validate::validate_from_read(&mut conn_in, file_kind));
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                writeln!(conn_out, "{}\t-\tFAILED", file.display())?;
                all_ok = false;
                continue;
            },
        };

        for issue in report.issues.iter() {
            match issue.severity() {
                vadrtab::validate::Severity::Error => log::error!("{}: {}", file.display(), issue),
                vadrtab::validate::Severity::Warning => log::warn!("{}: {}", file.display(), issue),
            }
        }
        let n_errors = report.errors().count();
        let n_warnings = report.warnings().count();
        if report.ok() {
            writeln!(conn_out, "{}\t{}\tOK\t{} records\t{} warnings", file.display(), report.kind, report.n_records, n_warnings)?;
        } else {
            writeln!(conn_out, "{}\t{}\tFAILED\t{} errors\t{} warnings", file.display(), report.kind, n_errors, n_warnings)?;
            all_ok = false;
        }
    }
    conn_out.flush()?;

    Ok(all_ok)
}

fn convert_file(
    input_file: &Path,
    kind: Option<&str>,
    format: &str,
    out_file: Option<&Path>,
) -> Result<(), E> {
    let kind = parse_kind(kind)?.or_else(|| TableKind::from_path(input_file));
    let layout = format.parse::<Layout>()?;
    let mut conn_in = vadrtab::parser::open_table(input_file)?;

    match out_file {
        Some(path) => {
            let mut conn_out = create_writer(path)?;
            vadrtab::convert_from_read_to_write(kind, layout, &mut conn_in, &mut conn_out)?;
        },
        None => {
            let stdout = std::io::stdout();
            let mut conn_out = stdout.lock();
            vadrtab::convert_from_read_to_write(kind, layout, &mut conn_in, &mut conn_out)?;
        },
    }
    Ok(())
}

fn write_list(
    path: &Path,
    names: &[&str],
) -> Result<(), E> {
    let mut conn_out = create_writer(path)?;
    for name in names {
        writeln!(conn_out, "{}", name)?;
    }
    conn_out.flush()?;
    log::info!("Wrote {} names to {}", names.len(), path.display());
    Ok(())
}

fn write_table(
    path: &Path,
    kind: TableKind,
    records: Vec<Record>,
) -> Result<(), E> {
    let mut conn_out = create_writer(path)?;
    vadrtab::write_records(kind, Layout::Vadr, records, &mut conn_out)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn report_run(
    run_dir: &Path,
    out_dir: &Path,
    force: bool,
    fasta: Option<&Path>,
) -> Result<(), E> {
    let run = RunDir::open(run_dir)?;
    let tables = RunTables::load(&run)?;
    let statuses = tables.statuses().ok_or_else(|| format!("{}: no .sqa or .sqc table", run_dir.display()))?;

    let inconsistencies = vadrtab::summary::cross_check(&tables);
    for inconsistency in inconsistencies.iter() {
        log::warn!("{}", inconsistency);
    }

    let mut inputs: Vec<&Path> = vec![run_dir];
    inputs.extend(fasta);
    create_output_dir(out_dir, force, &inputs)?;

    let pass: Vec<&str> = statuses.iter().filter(|(_, status)| **status == PassFail::Pass).map(|(name, _)| name.as_str()).collect();
    let fail: Vec<&str> = statuses.iter().filter(|(_, status)| **status == PassFail::Fail).map(|(name, _)| name.as_str()).collect();
    write_list(&output_path(out_dir, "pass.list")?, &pass)?;
    write_list(&output_path(out_dir, "fail.list")?, &fail)?;

    match &tables.alt {
        Some(alt) => {
            let records = vadrtab::summary::count_alerts(alt).into_iter().map(Record::Alc).collect();
            write_table(&output_path(out_dir, "alc")?, TableKind::Alc, records)?;
        },
        None => log::info!("No .alt table, skipping .alc"),
    }
    match &tables.sqc {
        Some(sqc) => {
            let records = vadrtab::summary::count_models(sqc).into_iter().map(Record::Mdl).collect();
            write_table(&output_path(out_dir, "mdl")?, TableKind::Mdl, records)?;
        },
        None => log::info!("No .sqc table, skipping .mdl"),
    }

    if let Some(fasta) = fasta {
        let conn_in = File::open(fasta).map_err(|e| format!("{}: {}", fasta.display(), e))?;
        let mut pass_out = create_writer(&output_path(out_dir, "pass.fa")?)?;
        let mut fail_out = create_writer(&output_path(out_dir, "fail.fa")?)?;
        let counts = vadrtab::seqsplit::split_fasta_from_read(conn_in, &statuses, &mut pass_out, &mut fail_out)?;
        log::info!("Wrote {} passing and {} failing sequences", counts.n_pass, counts.n_fail);
    }

    log::info!("{} sequences: {} PASS, {} FAIL, {} inconsistencies", statuses.len(), pass.len(), fail.len(), inconsistencies.len());
    Ok(())
}

fn set_runs(
    run_dirs: &[PathBuf],
    merge_op: &MergeOp,
    status: PassFail,
) -> Result<(), E> {
    let mut index = SequenceIndex::default();
    let mut acc = None;
    for run_dir in run_dirs {
        let run = RunDir::open(run_dir)?;
        let statuses = RunTables::load_statuses(&run)?;
        let bits = status_bitmap(&statuses, &mut index, status);
        acc = match acc {
            Some(mut acc) => {
                merge_into(merge_op, &mut acc, bits);
                Some(acc)
            },
            None => Some(bits),
        };
    }

    let stdout = std::io::stdout();
    let mut conn_out = stdout.lock();
    if let Some(acc) = acc {
        for name in names(&index, &acc) {
            writeln!(conn_out, "{}", name)?;
        }
    }
    conn_out.flush()?;
    Ok(())
}

/// List the models and report missing files, returns false if any are missing.
fn list_models(
    paths: &LibraryPaths,
) -> Result<bool, E> {
    let models = if paths.minfo.is_file() {
        paths.load_models()?
    } else {
        Vec::new()
    };

    let stdout = std::io::stdout();
    let mut conn_out = stdout.lock();
    for model in models.iter() {
        writeln!(conn_out, "{}\t{}\t{}\t{}\t{}",
                 model.name,
                 model.group().unwrap_or("-"),
                 model.subgroup().unwrap_or("-"),
                 model.length().map(|x| x.to_string()).unwrap_or("-".to_string()),
                 model.features.len())?;
    }
    conn_out.flush()?;

    let missing = vadrtab::library::check(paths, &models);
    for artifact in missing.iter() {
        log::error!("{}", artifact);
    }
    Ok(missing.is_empty())
}

fn main() {
    let cli = cli::Cli::parse();

    // Subcommands:
    let res: Result<bool, E> = match &cli.command {
        // Check
        Some(cli::Commands::Check {
            input_files,
            kind,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            check_files(input_files, kind.as_deref())
        },

        // Convert
        Some(cli::Commands::Convert {
            input_file,
            kind,
            format,
            out_file,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            convert_file(input_file, kind.as_deref(), format, out_file.as_deref()).map(|_| true)
        },

        // Report
        Some(cli::Commands::Report {
            run_dir,
            out_dir,
            force,
            fasta,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            report_run(run_dir, out_dir, *force, fasta.as_deref()).map(|_| true)
        },

        // Set
        Some(cli::Commands::Set {
            run_dirs,
            pass,
            union,
            intersection,
            diff,
            xor,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            let merge_op = match (*union, *intersection, *diff, *xor) {
                (true, _, _, _) => MergeOp::Union,
                (_, true, _, _) => MergeOp::Intersection,
                (_, _, true, _) => MergeOp::Diff,
                (_, _, _, true) => MergeOp::Xor,
                _ => MergeOp::default(),
            };
            let status = if *pass { PassFail::Pass } else { PassFail::Fail };
            set_runs(run_dirs, &merge_op, status).map(|_| true)
        },

        // Models
        Some(cli::Commands::Models {
            mdir,
            mkey,
            cm_file,
            minfo_file,
            blastdb_dir,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            LibraryPaths::resolve(mdir.as_deref(), mkey, cm_file.as_deref(), minfo_file.as_deref(), blastdb_dir.as_deref())
                .and_then(|paths| list_models(&paths))
        },

        None => {
            init_log(1);
            cli::Cli::command().print_help().map(|_| true).map_err(|e| e.into())
        },
    };

    match res {
        Ok(true) => {},
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        },
    }
}
