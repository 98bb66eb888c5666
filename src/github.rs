use const_format::formatcp;
use http::header::{ACCEPT, AUTHORIZATION};
use log::{debug, trace};
use reqwest::blocking::{Client, ClientBuilder};
use url::Url;

use crate::core::{Error, ErrorKind, GenericResult};
use crate::forge::{CreateRepository, Forge, Response};

pub const API_URL: &str = "https://api.github.com";
pub const SSH_HOST: &str = "git@github.com";

static USER_AGENT: &str = formatcp!("{name}/{version}", name=env!("CARGO_PKG_NAME"), version=env!("CARGO_PKG_VERSION"));

pub struct Github {
    client: Client,
    api_url: Url,
}

impl Github {
    pub fn new(api_url: &str) -> GenericResult<Github> {
        let api_url = Url::parse(api_url).map_err(|e| Error::new(
            ErrorKind::Api, format!("Invalid GitHub API URL {api_url:?}: {e}")))?;

        let client = ClientBuilder::new().user_agent(USER_AGENT).build().map_err(|e| Error::new(
            ErrorKind::Api, format!("Failed to create HTTP client: {e}")))?;

        Ok(Github {client, api_url})
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url.as_str().trim_end_matches('/'))
    }
}

impl Forge for Github {
    fn create_repository(&self, token: &str, request: &CreateRepository) -> GenericResult<Response> {
        let url = self.endpoint("user/repos");
        debug!("Sending POST {url} for {:?}...", request.name);

        let response = self.client.post(&url)
            .header(AUTHORIZATION, format!("token {token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .json(request)
            .send()
            .map_err(|e| Error::new(ErrorKind::Api, format!("Failed to execute request: {e}")))?;

        let status = response.status();
        let body = response.bytes().map_err(|e| Error::new(
            ErrorKind::Api, format!("Failed to read response body: {e}")))?;

        trace!("Got {status} response:{}", crate::util::format_multiline(&String::from_utf8_lossy(&body)));

        Ok(Response {status, body: body.to_vec()})
    }
}
