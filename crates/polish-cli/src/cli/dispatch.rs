//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror the command `*Args` but are populated from clap
//! - `From<*Params>` impls bridge dispatch to the command handlers
//! - the default `polishc` output path is derived here

use std::path::{Path, PathBuf};

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::compile::CompileArgs;
use crate::commands::run::RunArgs;

/// Extension of compiled bytecode files.
pub const BYTECODE_EXT: &str = "pbc";

/// Fuel applied to traced runs that set no `--fuel`; the trace is kept in memory.
pub const DEFAULT_TRACE_FUEL: u64 = 1_000_000;

pub struct RunParams {
    pub program_path: PathBuf,
    pub trace: bool,
    pub stack: bool,
    pub json: bool,
    pub stack_size: Option<usize>,
    pub fuel: Option<u64>,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let trace = m.get_flag("trace");
        let fuel = m
            .get_one::<u64>("fuel")
            .copied()
            .or(trace.then_some(DEFAULT_TRACE_FUEL));

        Self {
            program_path: m
                .get_one::<PathBuf>("program_path")
                .cloned()
                .unwrap_or_default(),
            trace,
            stack: m.get_flag("stack"),
            json: m.get_flag("json"),
            stack_size: m.get_one::<usize>("stack_size").copied(),
            fuel,
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            program_path: p.program_path,
            trace: p.trace,
            stack: p.stack,
            json: p.json,
            stack_size: p.stack_size,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CompileParams {
    /// `None` reads stdin.
    pub source_path: Option<PathBuf>,
    /// `None` writes stdout.
    pub output_path: Option<PathBuf>,
    pub dump: bool,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let source_path = m
            .get_one::<PathBuf>("source_path")
            .filter(|p| p.as_os_str() != "-")
            .cloned();
        let output_path = m.get_one::<PathBuf>("output_path").cloned();
        let output_path = resolve_output(source_path.as_deref(), output_path);

        Self {
            source_path,
            output_path,
            dump: m.get_flag("dump"),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            source_path: p.source_path,
            output_path: p.output_path,
            dump: p.dump,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// An explicit output wins; otherwise a file source gets a sibling `.pbc`
/// and stdin compiles to stdout.
fn resolve_output(source: Option<&Path>, output: Option<PathBuf>) -> Option<PathBuf> {
    if output.is_some() {
        return output;
    }
    source.map(|p| p.with_extension(BYTECODE_EXT))
}
