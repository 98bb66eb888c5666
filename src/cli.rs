use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};
use clap::error::{Error, ErrorKind};
use const_format::formatcp;
use log::Level;

#[cfg_attr(test, derive(Debug))]
pub struct CliArgs {
    pub log_level: Level,
    pub config_path: Option<PathBuf>,
    pub action: Action,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum Action {
    GenerateConfig,
    Create {name: String},
}

macro_rules! long_about {
    ($text:expr) => {{
        textwrap::fill(indoc::indoc!($text).trim_matches('\n'), 100)
    }}
}

pub fn parse_args<I, T>(args: I) -> Result<CliArgs, Error>
    where I: IntoIterator<Item = T>, T: Into<OsString> + Clone
{
    const DEFAULT_CONFIG_PATH: &str = formatcp!("<config dir>/{}/config", env!("CARGO_PKG_NAME"));

    let mut command = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Creates new programming project")
        .long_about(long_about!("
            Creates a GitHub repository with the specified name, clones it into the projects directory, adds
            README.md and .gitignore to it and pushes the initial commit.
        "))

        .dont_collapse_args_in_usage(true)
        .help_expected(true)

        .arg(Arg::new("name")
            .value_name("NAME")
            .required_unless_present("gen_config")
            .help("Project name in kebab-case"))

        .arg(Arg::new("gen_config").long("gen-config")
            .action(ArgAction::SetTrue)
            .conflicts_with("name")
            .help("Generate configuration file"))

        .arg(Arg::new("config").short('c').long("config")
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .help(formatcp!("Configuration file path [default: {}]", DEFAULT_CONFIG_PATH)))

        .arg(Arg::new("verbose")
            .short('v').long("verbose")
            .action(ArgAction::Count)
            .help("Set verbosity level"));

    let matches = command.try_get_matches_from_mut(separate_names(args))?;

    let log_level = match matches.get_count("verbose") {
        0 => Level::Info,
        1 => Level::Debug,
        2 => Level::Trace,
        _ => return Err(command.error(ErrorKind::TooManyValues, "Invalid verbosity level")),
    };

    let action = match matches.get_one::<String>("name") {
        Some(name) => Action::Create {name: name.clone()},
        None => Action::GenerateConfig,
    };

    Ok(CliArgs {
        log_level,
        config_path: matches.get_one("config").cloned(),
        action,
    })
}

// Only `--` starts a long option, so a project name may begin with a single hyphen ("-leading"). Such names
// are moved behind `--` to stop clap from parsing them as a group of short flags.
fn separate_names<I, T>(args: I) -> Vec<OsString>
    where I: IntoIterator<Item = T>, T: Into<OsString>
{
    let mut args = args.into_iter().map(Into::into);
    let mut options: Vec<OsString> = args.next().into_iter().collect();
    let mut names = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            names.extend(args.by_ref());
            break;
        }

        if arg.to_str().is_some_and(is_hyphenated_name) {
            names.push(arg);
            continue;
        }

        let takes_value = arg == "-c" || arg == "--config";
        options.push(arg);
        if takes_value {
            options.extend(args.next());
        }
    }

    if !names.is_empty() {
        options.push("--".into());
        options.extend(names);
    }

    options
}

fn is_hyphenated_name(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };

    if rest.is_empty() || rest.starts_with('-') {
        return false;
    }

    !matches!(rest, "c" | "h" | "V") && !rest.chars().all(|c| c == 'v')
}

/// Prints the argument parsing error (or help/version) to the proper stream and returns the exit status.
pub fn report_error(err: &Error, stdout: &mut dyn Write, stderr: &mut dyn Write) -> u8 {
    let message = err.render();

    if err.use_stderr() {
        let _ = write!(stderr, "{message}");
        1
    } else {
        let _ = write!(stdout, "{message}");
        0
    }
}
