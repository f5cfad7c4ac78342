//! Command builders for the two binaries.

use clap::Command;

use super::args::*;

/// `polish`: run a bytecode file.
pub fn run_command() -> Command {
    Command::new("polish")
        .about("Run a Polish bytecode program")
        .arg(program_path_arg())
        .arg(trace_arg())
        .arg(stack_arg())
        .arg(json_arg())
        .arg(stack_size_arg())
        .arg(fuel_arg())
        .arg(color_arg())
        .after_help(
            r#"EXAMPLES:
  polish sum.pbc                     # run
  polish sum.pbc --trace             # per-step trace on stderr
  polish sum.pbc --trace --stack     # trace with the stack after each step
  polish sum.pbc --json              # final state as JSON
  polish loop.pbc --fuel 1000        # stop runaway loops"#,
        )
}

/// `polishc`: compile assembly source to bytecode.
pub fn compile_command() -> Command {
    Command::new("polishc")
        .about("Compile Polish assembly to bytecode")
        .arg(source_path_arg())
        .arg(output_path_arg())
        .arg(dump_arg())
        .arg(color_arg())
        .after_help(
            r#"EXAMPLES:
  polishc sum.pol                    # writes sum.pbc
  polishc sum.pol out.pbc            # explicit output
  polishc - < sum.pol > sum.pbc      # stdin to stdout
  polishc sum.pol --dump             # also print the disassembly"#,
        )
}
