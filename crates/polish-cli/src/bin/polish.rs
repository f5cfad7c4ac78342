use polish_cli::cli::{RunParams, run_command};
use polish_cli::commands;

fn main() {
    let matches = run_command().get_matches();
    let params = RunParams::from_matches(&matches);
    commands::run::run(params.into());
}
