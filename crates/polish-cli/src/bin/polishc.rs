use polish_cli::cli::{CompileParams, compile_command};
use polish_cli::commands;

fn main() {
    let matches = compile_command().get_matches();
    let params = CompileParams::from_matches(&matches);
    commands::compile::run(params.into());
}
