use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{self, Config};
use crate::core::{EmptyResult, Error, ErrorKind, GenericResult};
use crate::forge::{self, Forge};
use crate::git::{self, Git};
use crate::project::Project;
use crate::scaffold;

/// User-facing streams: the confirmation is read from `input`, progress goes to `output`.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
}

impl Console<'_> {
    fn say(&mut self, message: &str) -> EmptyResult {
        writeln!(self.output, "{message}")
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::new(ErrorKind::Console, format!("Failed to write to stdout: {e}")))
    }

    fn confirm(&mut self, question: &str) -> GenericResult<bool> {
        self.say(&format!("{question} (y/n)"))?;

        let mut answer = String::new();
        let size = self.input.read_line(&mut answer).map_err(|e| Error::new(
            ErrorKind::Console, format!("Failed to scan user input: {e}")))?;

        // End of input is an empty answer
        if size == 0 {
            debug!("Got end of input instead of an answer.");
        }

        let answer = answer.trim_end_matches(['\n', '\r']);
        Ok(answer.is_empty() || answer == "y")
    }
}

pub struct Services<'a> {
    pub forge: &'a dyn Forge,
    pub git: &'a dyn Git,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum Outcome {
    ConfigGenerated(PathBuf),
    Created(PathBuf),
    Declined,
}

pub fn generate_config(config_path: Option<&Path>, console: &mut Console) -> GenericResult<Outcome> {
    let config_path = resolve_config_path(config_path)?;

    config::generate(&config_path)?;
    console.say(&format!("Config created {}", config_path.display()))?;

    Ok(Outcome::ConfigGenerated(config_path))
}

pub fn create(name: &str, config_path: Option<&Path>, console: &mut Console, services: &Services) -> GenericResult<Outcome> {
    let config_path = resolve_config_path(config_path)?;

    console.say("Loading config file...")?;
    let config = Config::load(&config_path)?;
    debug!("Loaded {config:?}.");

    let project = Project::new(name, &config);
    if !console.confirm(&format!("Create project {}", project.path.display()))? {
        return Ok(Outcome::Declined);
    }

    console.say("Creating GitHub repository...")?;
    forge::create_remote(services.forge, &config.api_key, &project.name)?;

    populate(&project, &config, console, services).map_err(|err| {
        let prefix = format!("{} repository has been created on GitHub, but", project.full_name());
        Error::new(err.kind, format!("{prefix} {}", lowercase_first(&err.message)))
    })?;

    console.say("Success")?;
    Ok(Outcome::Created(project.path))
}

fn populate(project: &Project, config: &Config, console: &mut Console, services: &Services) -> EmptyResult {
    console.say(&format!("Cloning repository into {}...", project.path.display()))?;
    git::clone_remote(services.git, &config.username, &project.name, &config.projects_path())?;

    console.say("Creating README.md and .gitignore...")?;
    scaffold::write(&project.path, &project.title())?;

    console.say("Committing changes to the repository...")?;
    git::publish(services.git, &project.path)
}

fn resolve_config_path(config_path: Option<&Path>) -> GenericResult<PathBuf> {
    Ok(match config_path {
        Some(path) => path.to_owned(),
        None => config::default_path()?,
    })
}

fn lowercase_first(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
