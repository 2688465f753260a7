use clap::Parser;
use colored::Colorize;
use fieldnorm_core::cli::{self, Cli};
use fieldnorm_core::exit::FieldnormExit;

fn main() -> FieldnormExit {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, &cli.engine)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(FieldnormExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            FieldnormExit::Error
        }
    }
}
