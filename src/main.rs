//! dupelink - Duplicate File Hard Linker
//!
//! Entry point for the dupelink CLI application.

use dupelink::{
    cli::{parse_args, Invocation, UsageError},
    config::RunConfig,
    error::ExitCode,
    logging::init_logging,
};

fn main() {
    let cli = match parse_args(std::env::args_os()) {
        Ok(Invocation::Run(cli)) => cli,
        Ok(Invocation::Help(text)) => {
            println!("{}", text);
            std::process::exit(ExitCode::Success.as_i32());
        }
        Err(UsageError::Arguments(text)) => {
            eprint!("{}", text);
            std::process::exit(ExitCode::Failure.as_i32());
        }
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(ExitCode::Failure.as_i32());
        }
    };

    let config = RunConfig::from_cli(&cli);
    init_logging(config.verbosity);

    let stdout = std::io::stdout();
    match dupelink::run_app(&config, &mut stdout.lock()) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("ERROR: {:#}", err);
            std::process::exit(ExitCode::Failure.as_i32());
        }
    }
}
