use crate::{auth, error::FetchError, release::Asset};
use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use std::{fs::File, io::Write, path::PathBuf};

/// The artifact is always written under this name, regardless of what the
/// asset is called in the release.
pub(crate) const ARTIFACT_FILE_NAME: &str = "api_blog.zip";

/// Streams a selected asset's content to disk.
#[derive(Debug)]
pub(crate) struct ArtifactDownloader {
    token: String,
    install_root: PathBuf,
}

impl ArtifactDownloader {
    pub(crate) fn new(token: String, install_root: PathBuf) -> ArtifactDownloader {
        ArtifactDownloader {
            token,
            install_root,
        }
    }

    pub(crate) fn destination(&self) -> PathBuf {
        self.install_root.join(ARTIFACT_FILE_NAME)
    }

    /// Issues one GET to the asset's endpoint and writes the response body to
    /// `<install_root>/api_blog.zip`, chunk by chunk as it arrives. The body
    /// is never held in memory whole, so the artifact may be larger than
    /// available memory. If the transfer stops partway through, the partial
    /// file is left in place.
    ///
    /// The `Accept: application/octet-stream` header is required here; the
    /// asset endpoint serves JSON metadata without it.
    pub(crate) async fn download(&self, client: &Client, asset: &Asset) -> Result<PathBuf> {
        debug!("downloading asset from {}", asset.url);

        let req = client
            .get(asset.url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/octet-stream"))
            .header(AUTHORIZATION, auth::token_header(&self.token)?)
            .build()
            .with_context(|| format!("failed to build HTTP request for {}", asset.url))?;
        let mut resp = client.execute(req).await.with_context(|| {
            format!(
                "failed to execute HTTP request to download the asset from {}",
                asset.url
            )
        })?;
        if !resp.status().is_success() {
            return Err(FetchError::ArtifactFetchFailed {
                url: asset.url.clone(),
                status: resp.status(),
            }
            .into());
        }

        let destination = self.destination();
        debug!("writing the artifact to {}", destination.display());

        // The file is scoped so that it is closed, with every write
        // committed, before the download reports success.
        {
            let mut file = File::create(&destination).with_context(|| {
                format!(
                    "failed to create a file at {} for the downloaded asset",
                    destination.display()
                )
            })?;
            while let Some(chunk) = resp.chunk().await.map_err(|source| {
                FetchError::TransferInterrupted {
                    url: asset.url.clone(),
                    source,
                }
            })? {
                file.write_all(chunk.as_ref()).with_context(|| {
                    format!("failed to write a chunk to {}", destination.display())
                })?;
            }
        }

        info!("wrote the artifact to {}", destination.display());
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::Server;
    use reqwest::StatusCode;
    use std::{fs, io};
    use tempfile::tempdir;
    use url::Url;

    fn asset_for(server: &Server, path: &str, name: &str) -> Result<Asset> {
        Ok(Asset {
            name: name.to_string(),
            url: Url::parse(&format!("{}{path}", server.url()))?,
        })
    }

    #[tokio::test]
    async fn writes_the_body_verbatim() -> Result<()> {
        let body = (0..=255u8).collect::<Vec<_>>().repeat(17);

        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/assets/1")
            .match_header("Authorization", "token ghp_sometoken")
            .match_header("Accept", "application/octet-stream")
            .with_status(200)
            .with_body(body.clone())
            .create_async()
            .await;

        let td = tempdir()?;
        let downloader =
            ArtifactDownloader::new("ghp_sometoken".to_string(), td.path().to_path_buf());
        let asset = asset_for(&server, "/assets/1", "app-x86_64-unknown-linux-gnu.zip")?;
        let destination = downloader.download(&Client::new(), &asset).await?;

        assert_eq!(destination, td.path().join(ARTIFACT_FILE_NAME));
        assert_eq!(fs::read(&destination)?, body);

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn reassembles_tiny_chunks_in_order() -> Result<()> {
        let body = b"streamed one byte at a time".to_vec();

        let mut server = Server::new_async().await;
        let send = body.clone();
        let m = server
            .mock("GET", "/assets/1")
            .with_status(200)
            .with_chunked_body(move |w| {
                for byte in &send {
                    w.write_all(std::slice::from_ref(byte))?;
                }
                Ok(())
            })
            .create_async()
            .await;

        let td = tempdir()?;
        let downloader = ArtifactDownloader::new("t".to_string(), td.path().to_path_buf());
        let asset = asset_for(&server, "/assets/1", "app-x86_64-unknown-linux-gnu.zip")?;
        let destination = downloader.download(&Client::new(), &asset).await?;

        assert_eq!(fs::read(&destination)?, body);

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_fails_the_download() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/assets/1")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let td = tempdir()?;
        let downloader = ArtifactDownloader::new("t".to_string(), td.path().to_path_buf());
        let asset = asset_for(&server, "/assets/1", "app-x86_64-unknown-linux-gnu.zip")?;
        let err = downloader
            .download(&Client::new(), &asset)
            .await
            .unwrap_err();

        let Some(FetchError::ArtifactFetchFailed { status, .. }) = err.downcast_ref::<FetchError>()
        else {
            panic!("expected ArtifactFetchFailed, got {err}");
        };
        assert_eq!(*status, StatusCode::NOT_FOUND);
        assert!(
            !td.path().join(ARTIFACT_FILE_NAME).exists(),
            "nothing is written when the request is rejected"
        );

        m.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn interrupted_transfer_is_not_a_success() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/assets/1")
            .with_status(200)
            .with_chunked_body(|w| {
                // A prefix of the body, then the connection drops without the
                // terminating chunk.
                w.write_all(&[42; 1024])?;
                Err(io::Error::other("connection dropped"))
            })
            .create_async()
            .await;

        let td = tempdir()?;
        let downloader = ArtifactDownloader::new("t".to_string(), td.path().to_path_buf());
        let asset = asset_for(&server, "/assets/1", "app-x86_64-unknown-linux-gnu.zip")?;
        let err = downloader
            .download(&Client::new(), &asset)
            .await
            .unwrap_err();

        let Some(FetchError::TransferInterrupted { .. }) = err.downcast_ref::<FetchError>() else {
            panic!("expected TransferInterrupted, got {err}");
        };
        // The partial file is left as-is. No cleanup, no rollback.
        assert!(td.path().join(ARTIFACT_FILE_NAME).exists());

        m.assert_async().await;

        Ok(())
    }
}
