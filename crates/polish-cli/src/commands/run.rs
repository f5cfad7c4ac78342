//! `polish <FILE>`: load a bytecode file and execute it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use polish_bytecode::{Colors, Program, ProgramError};
use polish_vm::{ExecLimits, PrintTracer, RuntimeError, VM};
use serde::Serialize;

/// Prefix printed in front of every runtime error.
pub const RUN_ERR: &str = "RUN ERR: ";

pub struct RunArgs {
    pub program_path: PathBuf,
    pub trace: bool,
    pub stack: bool,
    pub json: bool,
    pub stack_size: Option<usize>,
    pub fuel: Option<u64>,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("'{path}': {source}")]
    Program { path: String, source: ProgramError },
}

/// Read a bytecode file from disk.
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: display.clone(),
        source,
    })?;
    Program::load(bytes).map_err(|source| LoadError::Program {
        path: display,
        source,
    })
}

/// VM state after a run, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct StateReport {
    pub ok: bool,
    pub error: Option<String>,
    pub program_pointer: usize,
    pub stack_head: usize,
    pub stack_capacity: usize,
    pub stack: Vec<u8>,
}

impl StateReport {
    pub fn new(vm: &VM<'_>, result: &Result<(), RuntimeError>) -> Self {
        let stack = vm.stack();
        Self {
            ok: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
            program_pointer: vm.program_pointer(),
            stack_head: stack.head(),
            stack_capacity: stack.capacity(),
            stack: stack.as_bytes().to_vec(),
        }
    }
}

/// Hex bytes of the live stack, bottom first.
pub fn format_stack(bytes: &[u8], colors: Colors) -> String {
    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("{}[{}]{}", colors.dim, hex.join(" "), colors.reset)
}

pub fn run(args: RunArgs) {
    let program = match load_program(&args.program_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut limits = ExecLimits::new();
    if let Some(fuel) = args.fuel {
        limits = limits.exec_fuel(fuel);
    }
    let mut builder = VM::builder(&program).limits(limits);
    if let Some(size) = args.stack_size {
        builder = builder.stack_size(size);
    }
    let mut vm = builder.build();

    let colors = Colors::new(args.color);
    let result = if args.trace {
        let mut tracer = PrintTracer::new(args.stack, colors);
        let result = vm.execute_with(&mut tracer);
        tracer.print();
        result
    } else {
        vm.execute()
    };

    if args.json {
        let report = StateReport::new(&vm, &result);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    } else if args.stack && !args.trace {
        eprintln!("{}", format_stack(vm.stack().as_bytes(), colors));
    }

    if let Err(e) = result {
        println!("{RUN_ERR}{e}");
        std::process::exit(1);
    }
}
