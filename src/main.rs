use anyhow::Result;
use clap::Parser;

use extsync::cli::{Cli, Command};
use extsync::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, args.command.name());

    let result = match &args.command {
        Command::List(opts) => commands::list::run(&args.global, opts),
        Command::Enable(opts) => commands::toggle::enable(&args.global, opts),
        Command::Disable(opts) => commands::toggle::disable(&args.global, opts),
        Command::Uninstall(opts) => commands::uninstall::run(&args.global, opts),
        Command::Import(opts) => commands::import::run(&args.global, opts),
        Command::ImportAll(opts) => commands::import::run_all(&args.global, opts),
        Command::Sync(opts) => commands::sync::run(&args.global, opts),
        Command::Copy(opts) => commands::copy::run(&args.global, opts),
        Command::Resolve(opts) => commands::resolve::run(&args.global, opts),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    };
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
