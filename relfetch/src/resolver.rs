use crate::{
    auth,
    error::FetchError,
    release::{Asset, Release},
};
use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};

/// The filename suffix that identifies the Linux build among the release
/// assets. A release is assumed to attach at most one such artifact; when it
/// attaches more, the first one in listing order wins.
pub(crate) const ASSET_NAME_SUFFIX: &str = "unknown-linux-gnu.zip";

/// Fetches the release metadata and picks the asset to download.
#[derive(Debug)]
pub(crate) struct AssetResolver {
    metadata_url: String,
    token: String,
}

impl AssetResolver {
    pub(crate) fn new(metadata_url: String, token: String) -> AssetResolver {
        AssetResolver {
            metadata_url,
            token,
        }
    }

    /// Issues one GET to the metadata endpoint and returns the first asset
    /// whose name ends with [`ASSET_NAME_SUFFIX`], in listing order. The
    /// selected asset is echoed to the log before this returns, so a record
    /// of what was picked exists before any download starts.
    pub(crate) async fn resolve(&self, client: &Client) -> Result<Asset> {
        debug!("fetching release metadata from `{}`", self.metadata_url);

        let req = client
            .get(&self.metadata_url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, auth::token_header(&self.token)?)
            .build()
            .with_context(|| format!("failed to build HTTP request for `{}`", self.metadata_url))?;
        let resp = client.execute(req).await.with_context(|| {
            format!(
                "failed to execute HTTP request for release metadata from `{}`",
                self.metadata_url
            )
        })?;
        if !resp.status().is_success() {
            return Err(FetchError::MetadataFetchFailed {
                url: self.metadata_url.clone(),
                status: resp.status(),
            }
            .into());
        }

        let body = resp.text().await.with_context(|| {
            format!(
                "failed to read the release metadata response from `{}`",
                self.metadata_url
            )
        })?;
        let release: Release =
            serde_json::from_str(&body).map_err(|source| FetchError::ReleaseParseFailed {
                url: self.metadata_url.clone(),
                source,
            })?;
        debug!("the release lists {} assets", release.assets.len());

        let asset = release
            .assets
            .into_iter()
            .find(|asset| asset.name.ends_with(ASSET_NAME_SUFFIX))
            .ok_or(FetchError::AssetNotFound {
                suffix: ASSET_NAME_SUFFIX,
            })?;
        info!("selected asset `{}` at {}", asset.name, asset.url);

        Ok(asset)
    }
}
