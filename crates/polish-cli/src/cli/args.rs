//! Shared argument builders for the `polish` and `polishc` commands.
//!
//! Each function returns a `clap::Arg` that is composed into a command in
//! `commands.rs`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Bytecode file to run (positional).
pub fn program_path_arg() -> Arg {
    Arg::new("program_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bytecode file to run")
}

/// Assembly source to compile (positional, `-` for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Assembly source file (use \"-\" for stdin)")
}

/// Where to write bytecode (positional).
pub fn output_path_arg() -> Arg {
    Arg::new("output_path")
        .value_name("OUTPUT")
        .value_parser(value_parser!(PathBuf))
        .help("Output file (default: SOURCE with a .pbc extension, stdout for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Per-step execution trace on stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print each executed unit to stderr")
}

/// Show stack bytes (--stack).
pub fn stack_arg() -> Arg {
    Arg::new("stack")
        .long("stack")
        .action(ArgAction::SetTrue)
        .help("Print the final stack; with --trace, the stack after every step")
}

/// Final stack as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the final VM state as JSON on stdout")
}

/// Stack capacity in bytes (--stack-size).
pub fn stack_size_arg() -> Arg {
    Arg::new("stack_size")
        .long("stack-size")
        .value_name("BYTES")
        .value_parser(value_parser!(usize))
        .help("Stack capacity in bytes [default: 256]")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Stop after N executed units [default with --trace: 1000000]")
}

/// Print disassembly (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .help("Print the disassembly of the compiled program")
}
