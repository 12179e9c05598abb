use std::{ffi::OsString, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use eslint_cli::{init, launch};
use log::debug;

/// Runs the ESLint installed in the current project.
///
/// Every argument is passed to ESLint untouched, except `--init`, which
/// starts the configuration wizard.
#[derive(Parser, Debug)]
#[command(name = "eslint", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments forwarded to ESLint.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    args: Vec<OsString>,
}

impl Cli {
    /// Parses the process arguments, keeping them exactly as given.
    ///
    /// clap consumes a leading `--` as the end of its own options, but ESLint
    /// has to see it, so the forwarded list is the raw argument tail.
    fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let raw: Vec<OsString> = raw.into_iter().collect();
        let mut cli = Self::parse_from(&raw);
        cli.args = raw.into_iter().skip(1).collect();
        cli
    }

    /// `--init` only counts as an option before `--`.
    fn wants_init(&self) -> bool {
        self.args
            .iter()
            .take_while(|arg| *arg != "--")
            .any(|arg| arg == "--init")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::from_raw(std::env::args_os());
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("{}", format!("Cannot read the current directory: {e}").red());
            return ExitCode::from(1);
        }
    };

    debug!("START {:?}", cli.args);
    debug!("ROOT '{}'", cwd.display());

    if cli.wants_init() {
        return init::run(&cwd).await;
    }

    match launch::run(&cwd, &cli.args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red().bold());
            ExitCode::from(1)
        }
    }
}
