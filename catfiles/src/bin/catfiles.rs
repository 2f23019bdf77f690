use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use cat_config::cat_config;
use catfiles::cli::{CatCommand, print_usage};
use catfiles::logging::init_logging_from_env;
use clap::Parser;

fn run(cli: CatCommand) -> Result<ExitCode> {
    // Logging goes first; reading the configuration may warn about unparsable environment values.
    init_logging_from_env();
    let config = cli.overrides.apply(cat_config().clone());

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    match runtime.block_on(cli.run(&config)) {
        Ok(data) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        },
    }
}

fn main() -> ExitCode {
    let cli = CatCommand::parse();

    if cli.inputs.is_empty() {
        let _ = print_usage(&mut std::io::stdout());
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        },
    }
}
