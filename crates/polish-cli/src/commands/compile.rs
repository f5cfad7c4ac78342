//! `polishc <SOURCE|-> [OUTPUT]`: assemble source into a bytecode file.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use polish_bytecode::{Colors, Program, dump};
use polish_compiler::{CompileError, compile};

/// Prefix printed in front of every compile error.
pub const CMPL_ERR: &str = "CMPL ERR: ";

pub struct CompileArgs {
    /// `None` reads stdin.
    pub source_path: Option<PathBuf>,
    /// `None` writes stdout.
    pub output_path: Option<PathBuf>,
    pub dump: bool,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let source = match read_source(args.source_path.as_ref()) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let program = match compile(&source) {
        Ok(p) => p,
        Err(e) => {
            report(&e, &source, &args);
            std::process::exit(1);
        }
    };

    if let Err(msg) = write_program(&program, args.output_path.as_ref()) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }

    if args.dump {
        // Keep stdout clean when the bytecode itself goes there.
        let text = dump(&program, Colors::new(args.color));
        if args.output_path.is_some() {
            print!("{text}");
        } else {
            eprint!("{text}");
        }
    }
}

fn read_source(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn write_program(program: &Program, path: Option<&PathBuf>) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, program.as_bytes())
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e)),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(program.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|e| format!("cannot write stdout: {e}"))
        }
    }
}

/// One-line message on stdout, source snippet on stderr.
fn report(error: &CompileError, source: &str, args: &CompileArgs) {
    println!("{CMPL_ERR}{error}");

    let path = args
        .source_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let rendered = error
        .printer()
        .source(source)
        .path(&path)
        .colored(args.color)
        .render();
    eprintln!("{rendered}");
}
