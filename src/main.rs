#[macro_use] mod core;

mod app;
mod cli;
mod config;
mod forge;
mod git;
mod github;
mod project;
mod scaffold;
mod util;

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use easy_logging::LoggingConfig;
use log::{debug, error};

use crate::app::{Console, Outcome, Services};
use crate::cli::Action;
use crate::git::SystemGit;
use crate::github::Github;

fn main() -> ExitCode {
    let args = match cli::parse_args(env::args_os()) {
        Ok(args) => args,
        Err(err) => return ExitCode::from(cli::report_error(&err, &mut io::stdout(), &mut io::stderr())),
    };

    if let Err(err) = LoggingConfig::new(module_path!(), args.log_level).minimal().build() {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {}.", err);
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let mut console = Console {input: &mut input, output: &mut output};
    let config_path = args.config_path.as_deref();

    let result = match args.action {
        Action::GenerateConfig => app::generate_config(config_path, &mut console),
        Action::Create {name} => Github::new(github::API_URL).and_then(|github| {
            app::create(&name, config_path, &mut console, &Services {forge: &github, git: &SystemGit})
        }),
    };

    match result {
        Ok(Outcome::Created(path) | Outcome::ConfigGenerated(path)) => {
            debug!("Done: {path:?}.");
            ExitCode::SUCCESS
        },
        Ok(Outcome::Declined) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", util::format_sentence(&err.message));
            ExitCode::FAILURE
        },
    }
}
