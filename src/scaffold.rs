use std::fs::{self, File, Permissions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use log::debug;

use crate::core::EmptyResult;

const FILE_MODE: u32 = 0o644;

pub fn write(path: &Path, title: &str) -> EmptyResult {
    create_file(&path.join(".gitignore"), b"")?;
    create_file(&path.join("README.md"), format!("# {title}\n").as_bytes())?;
    Ok(())
}

fn create_file(path: &Path, data: &[u8]) -> EmptyResult {
    debug!("Creating {path:?}...");

    let mut file = match File::create(path) {
        Ok(file) => file,
        Err(err) => return Err!(Filesystem, "Failed to create {path:?}: {err}"),
    };

    if let Err(err) = fs::set_permissions(path, Permissions::from_mode(FILE_MODE)) {
        return Err!(Filesystem, "Failed to change {path:?} mode: {err}");
    }

    if let Err(err) = file.write_all(data) {
        return Err!(Filesystem, "Failed to write {path:?}: {err}");
    }

    Ok(())
}
