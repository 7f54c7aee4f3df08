//! qsim: runs one demo subcommand, a circuit file or the interactive menu.
use std::io;
use std::process::exit;

use clap::Parser; // trait import enables QsimCli::parse()
use colored::Colorize;
use tracing::debug;

use qsim::cli::QsimCli;
use qsim::commands::{dispatch, session::Session};
use qsim::config::Settings;
use qsim::core::debug::init_logging;
use qsim::io::dump::write_state_json;

fn run(args: QsimCli) -> anyhow::Result<()> {
    let mut settings = Settings::load(&args.config)?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    debug!(?settings, "settings resolved");

    let mut session = Session::new(settings, io::stdout().lock());
    dispatch(&mut session, args.cmd)?;

    if let Some(path) = &args.json {
        match session.last_state() {
            Some(state) => {
                write_state_json(path, state)?;
                debug!(path = %path.display(), "state written");
            }
            None => session.notice("no final state to write")?,
        }
    }
    Ok(())
}

fn main() {
    let args = QsimCli::parse();
    init_logging(args.debug);

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "err:".red().bold(), e);
        exit(1);
    }
}
