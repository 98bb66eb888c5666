use http::StatusCode;
use log::debug;
use serde_derive::Serialize;

use crate::core::{EmptyResult, GenericResult};

#[derive(Serialize)]
pub struct CreateRepository<'a> {
    pub name: &'a str,
}

pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// A hosted git service which is able to create repositories on behalf of the user.
pub trait Forge {
    fn create_repository(&self, token: &str, request: &CreateRepository) -> GenericResult<Response>;
}

pub fn create_remote(forge: &dyn Forge, token: &str, name: &str) -> EmptyResult {
    let response = forge.create_repository(token, &CreateRepository {name})?;
    if response.status == StatusCode::CREATED {
        debug!("The repository has been created.");
        return Ok(());
    }

    let details = match serde_json::from_slice::<serde_json::Value>(&response.body)
        .and_then(|body| serde_json::to_string_pretty(&body))
    {
        Ok(details) => details,
        Err(err) => return Err!(Api,
            "Failed to create repository ({}): got an invalid JSON response ({err}):{}",
            response.status, crate::util::format_multiline(&String::from_utf8_lossy(&response.body))),
    };

    Err!(Api, "Failed to create repository ({}):\n{details}", response.status)
}
