use std::path::Path;
use std::process::Command;

use log::debug;

use crate::core::EmptyResult;
use crate::github;
use crate::util;

pub const COMMIT_MESSAGE: &str = "initial commit";

pub trait Git {
    /// Runs `git <command> <args>` inside `dir`.
    fn run(&self, command: &str, args: &[&str], dir: &Path) -> EmptyResult;
}

pub struct SystemGit;

impl Git for SystemGit {
    fn run(&self, command: &str, args: &[&str], dir: &Path) -> EmptyResult {
        let mut process = Command::new("git");
        process.arg(command).args(args).current_dir(dir);

        debug!("Executing `{process:?}` in {dir:?}...");

        let result = match process.output() {
            Ok(result) => result,
            Err(err) => return Err!(Git, "Unable to spawn git process: {err}"),
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err!(Git, "git {command} returned an error ({}):{}", result.status, util::format_multiline(&stderr));
        }

        Ok(())
    }
}

pub fn clone_remote(git: &dyn Git, username: &str, name: &str, projects_dir: &Path) -> EmptyResult {
    let remote = format!("{host}:{username}/{name}.git", host=github::SSH_HOST);
    git.run("clone", &[&remote], projects_dir).map_err(|e| e.context("Failed to clone repository"))
}

pub fn publish(git: &dyn Git, path: &Path) -> EmptyResult {
    git.run("add", &["."], path).map_err(|e| e.context("Failed to add changes"))?;
    git.run("commit", &["-m", COMMIT_MESSAGE], path).map_err(|e| e.context("Failed to commit changes"))?;

    // The clone checks out the remote's default branch, so pushing HEAD doesn't depend on its name
    git.run("push", &["--set-upstream", "origin", "HEAD"], path).map_err(|e| e.context("Failed to push changes"))?;

    Ok(())
}
