use crate::{downloader::ArtifactDownloader, release::Asset, resolver::AssetResolver};
use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;

/// `Relfetch` is the core of this library, and is used to download a release
/// artifact. Use the [`RelfetchBuilder`](crate::RelfetchBuilder) struct to
/// create a new `Relfetch` instance.
#[derive(Debug)]
pub struct Relfetch {
    resolver: AssetResolver,
    downloader: ArtifactDownloader,
    client: Client,
}

impl Relfetch {
    pub(crate) fn new(
        resolver: AssetResolver,
        downloader: ArtifactDownloader,
        client: Client,
    ) -> Relfetch {
        Relfetch {
            resolver,
            downloader,
            client,
        }
    }

    /// Downloads the release artifact. This fetches the release metadata,
    /// picks the asset whose name ends with `unknown-linux-gnu.zip`, and
    /// streams that asset's content to `api_blog.zip` in the install root.
    /// Returns the path of the written file.
    ///
    /// The two requests run in strict sequence, and any failure ends the run.
    /// A resolution failure means no download request is ever issued; a
    /// download failure leaves whatever was already written on disk.
    ///
    /// # Errors
    ///
    /// There are a number of cases where an error can be returned:
    ///
    /// * Network errors on either request, including an unreachable or
    ///   placeholder endpoint.
    /// * A non-success response to the metadata or the artifact request.
    /// * A metadata body that is not a release document.
    /// * No asset with the expected filename suffix.
    /// * An interrupted transfer, or being unable to write the destination
    ///   file.
    pub async fn fetch(&self) -> Result<PathBuf> {
        let asset = self.resolve().await?;
        self.downloader.download(&self.client, &asset).await
    }

    pub(crate) async fn resolve(&self) -> Result<Asset> {
        self.resolver.resolve(&self.client).await
    }
}
