use std::process::ExitCode;

use clap::Parser;

use classifier::cli::Cli;
use classifier::commands::sync;
use classifier::config::Settings;
use classifier::error::{EXIT_SUCCESS, exit_code};
use classifier::logging::{self, Logger};
use classifier::platform::native_shell;
use classifier::prompt::{AssumeYes, Confirm, TerminalConfirm};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, "sync");
    let log = Logger::new("sync");

    let result = Settings::from_cli(&args)
        .map_err(anyhow::Error::from)
        .and_then(|settings| {
            let confirm: &dyn Confirm = if settings.assume_yes {
                &AssumeYes
            } else {
                &TerminalConfirm
            };
            sync::run(settings, native_shell().as_ref(), confirm, &log)
        });
    log.print_summary();

    match result {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("classifier: {e:#}");
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
