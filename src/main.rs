//! reindent - Batch indentation normalizer

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use rayon::prelude::*;
use reindent::process::{
    format_report, process_file, reindent_stream, FileOutcome, OutputMode, RunSummary,
    DEFAULT_MAX_FILE_SIZE,
};
use reindent::{parse_args, CliArgs, Config, FileSelector, Result};

fn main() -> Result<ExitCode> {
    let args = parse_args();
    init_logging(args.debug);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        reindent::build_cli().print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config file applies to every file; otherwise each file
    // discovers its own
    let base_config = match &args.config {
        Some(_) => Some(build_config(&args, None)?),
        None => None,
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                log::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    // Extensions for directory scanning come from the config seen from the
    // current directory (or the explicit one)
    let selection_config = match &base_config {
        Some(config) => config.clone(),
        None => build_config(&args, None)?,
    };
    let selector = FileSelector::new(
        &selection_config.extensions,
        &args.exclude,
        args.recursive,
    );
    let files = selector.collect(&args.inputs);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No source files found to reindent.");
        }
        return Ok(ExitCode::SUCCESS);
    }
    log::debug!("Selected {} files", files.len());

    let mode = if args.stdout {
        OutputMode::Stdout
    } else if args.check {
        OutputMode::Check
    } else {
        OutputMode::InPlace
    };

    let summary = RunSummary::new();
    // Stdout output must not interleave between files
    if args.stdout || args.jobs == Some(1) {
        for path in &files {
            handle_file(path, base_config.as_ref(), &args, mode, &summary);
        }
    } else {
        files
            .par_iter()
            .for_each(|path| handle_file(path, base_config.as_ref(), &args, mode, &summary));
    }

    if !args.silent {
        eprintln!("{}", summary.summary_line());
        for line in summary.detail_lines(args.check) {
            eprintln!("{line}");
        }
    }

    let failed = summary.errors() > 0
        || (args.check && (summary.changed() > 0 || summary.with_diagnostics() > 0));
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Route `log` output to stderr; `--debug` raises the default level
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("Using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    if let Some(indent_unit) = args.indent_unit {
        config.indent_unit = indent_unit;
    }
    if let Some(output_indent) = args.output_indent {
        config.output_indent = output_indent;
    }
    for ext in &args.extensions {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if !config.extensions.iter().any(|e| e == ext) {
            config.extensions.push(ext.to_string());
        }
    }

    log::debug!("Configuration: {config:?}");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print one file's diagnostics as a single block
///
/// Reports go to stdout unless stdout carries reindented content.
fn print_report(source_name: &str, report: &str, to_stderr: bool) {
    let result = if to_stderr {
        io::stderr().lock().write_all(report.as_bytes())
    } else {
        io::stdout().lock().write_all(report.as_bytes())
    };
    if let Err(e) = result {
        log::warn!("failed to print report for {source_name}: {e}");
    }
}

/// Process one file and record the result
fn handle_file(
    path: &Path,
    base_config: Option<&Config>,
    args: &CliArgs,
    mode: OutputMode,
    summary: &RunSummary,
) {
    let result = match base_config {
        Some(config) => run_file(path, config, args, mode),
        None => build_config(args, Some(path))
            .and_then(|config| run_file(path, &config, args, mode)),
    };

    match result {
        Ok(FileOutcome::Processed(file)) => {
            summary.record_processed(file.changed, file.diagnostics.len());
        }
        Ok(FileOutcome::TooLarge { size }) => {
            summary.record_skipped();
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} MB exceeds limit of {} MB)",
                    path.display(),
                    size / (1024 * 1024),
                    DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
                );
            }
        }
        Err(e) => {
            summary.record_error();
            eprintln!("Error reindenting {}: {e:#}", path.display());
        }
    }
}

fn run_file(
    path: &Path,
    config: &Config,
    args: &CliArgs,
    mode: OutputMode,
) -> Result<FileOutcome> {
    log::debug!("Reindenting: {}", path.display());

    let params = config.indent_params()?;
    let outcome = process_file(path, &params, mode, DEFAULT_MAX_FILE_SIZE)?;

    if let FileOutcome::Processed(file) = &outcome {
        let name = path.display().to_string();
        if let Some(report) = format_report(&name, &file.diagnostics) {
            print_report(&name, &report, mode == OutputMode::Stdout);
        }
        if let Some(text) = &file.output {
            io::stdout().lock().write_all(text)?;
        }
        if file.written && !args.silent {
            eprintln!("Reindented: {}", path.display());
        }
    }

    Ok(outcome)
}

/// Process input from stdin, output to stdout
///
/// Without `--check` the input is streamed line by line straight to stdout.
/// `--check` needs the whole input to compare, so it is read into memory up
/// to the file size limit.
fn process_stdin(config: &Config, args: &CliArgs) -> Result<ExitCode> {
    let params = config.indent_params()?;

    if !args.check {
        let mut stdout = BufWriter::new(io::stdout().lock());
        let diagnostics = reindent_stream(io::stdin().lock(), &mut stdout, &params)
            .context("Failed to reindent stdin")?;
        drop(stdout);
        // Stdout carries the content; diagnostics go to stderr
        if let Some(report) = format_report("stdin", &diagnostics) {
            print_report("stdin", &report, true);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut stdin_contents = Vec::new();
    io::stdin()
        .lock()
        .take(DEFAULT_MAX_FILE_SIZE + 1)
        .read_to_end(&mut stdin_contents)
        .context("Failed to read stdin")?;
    let stdin_size = u64::try_from(stdin_contents.len()).unwrap_or(u64::MAX);
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large (exceeds limit of {} MB)",
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let reindented = reindent::format::reindent(&stdin_contents, &params);
    if let Some(report) = format_report("stdin", &reindented.diagnostics) {
        print_report("stdin", &report, true);
    }

    let failed = reindented.changed(&stdin_contents) || !reindented.diagnostics.is_empty();
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
