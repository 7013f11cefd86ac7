/// The `builder` module contains the `RelfetchBuilder` struct which is used
/// to create a `Relfetch` instance.
use crate::{downloader::ArtifactDownloader, relfetch::Relfetch, resolver::AssetResolver};
use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client,
};
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

const METADATA_URL_ENV: &str = "GH_TAGS";
const TOKEN_ENV: &str = "TOKEN";

// Substituted when a setting is missing entirely. Deliberately not an error:
// the run still issues a request carrying the placeholder, so the failure it
// produces names the missing setting.
const METADATA_URL_PLACEHOLDER: &str = "GH_TAGS is not defined";
const TOKEN_PLACEHOLDER: &str = "TOKEN is not defined";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// `RelfetchBuilder` is used to create a [`Relfetch`] instance.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct RelfetchBuilder<'a> {
    metadata_url: Option<&'a str>,
    token: Option<&'a str>,
    install_root: Option<PathBuf>,
}

impl<'a> RelfetchBuilder<'a> {
    /// Returns a new empty `RelfetchBuilder`.
    #[must_use]
    pub fn new() -> Self {
        RelfetchBuilder::default()
    }

    /// Set the release metadata endpoint to query, like
    /// `https://api.github.com/repos/owner/repo/releases/tags/v1.2.0`. If
    /// this is not set, it is taken from the `GH_TAGS` env var.
    #[must_use]
    pub fn metadata_url(mut self, metadata_url: &'a str) -> Self {
        self.metadata_url = Some(metadata_url);
        self
    }

    /// Set the access token sent with every request. If this is not set, it
    /// is taken from the `TOKEN` env var.
    #[must_use]
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the directory the artifact is written into, as `api_blog.zip`.
    /// If not set, it will default to the current directory. The directory
    /// must already exist; it is not created.
    #[must_use]
    pub fn install_root<P: AsRef<Path>>(mut self, install_root: P) -> Self {
        self.install_root = Some(install_root.as_ref().to_path_buf());
        self
    }

    /// Builds a new [`Relfetch`] instance and returns it.
    ///
    /// # Errors
    ///
    /// This can fail if the current directory cannot be determined or the
    /// HTTP client cannot be constructed. A missing endpoint or token is not
    /// an error here; see [`RelfetchBuilder::metadata_url`] and
    /// [`RelfetchBuilder::token`].
    pub fn build(self) -> Result<Relfetch> {
        let metadata_url = setting(self.metadata_url, METADATA_URL_ENV, METADATA_URL_PLACEHOLDER);
        let token = setting(self.token, TOKEN_ENV, TOKEN_PLACEHOLDER);
        let install_root = match self.install_root {
            Some(install_root) => install_root,
            None => env::current_dir().context("could not determine the current directory")?,
        };
        debug!("install root is {}", install_root.display());

        Ok(Relfetch::new(
            AssetResolver::new(metadata_url, token.clone()),
            ArtifactDownloader::new(token, install_root),
            reqwest_client()?,
        ))
    }
}

fn setting(given: Option<&str>, var: &str, placeholder: &str) -> String {
    if let Some(given) = given {
        return given.to_string();
    }
    match env::var(var) {
        Ok(value) => {
            debug!("using the value of the {var} env var");
            value
        }
        Err(_) => placeholder.to_string(),
    }
}

fn reqwest_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("relfetch version {}", super::VERSION))?,
    );
    Client::builder()
        .gzip(true)
        .default_headers(headers)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build the HTTP client")
}
