use std::path::PathBuf;

use itertools::Itertools;

use crate::config::Config;

pub struct Project {
    pub name: String,
    pub owner: String,
    pub path: PathBuf,
}

impl Project {
    pub fn new(name: &str, config: &Config) -> Project {
        Project {
            name: name.to_owned(),
            owner: config.username.clone(),
            path: config.projects_path().join(name),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn title(&self) -> String {
        title(&self.name)
    }
}

/// Converts a kebab-case project name into a human-readable title: "my-cool-project" -> "My Cool Project".
///
/// Empty words (leading, trailing or repeated hyphens) are skipped.
pub fn title(name: &str) -> String {
    name.split('-').filter(|word| !word.is_empty()).map(capitalize).join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
