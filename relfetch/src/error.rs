use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// The ways a fetch run can fail. Every variant is terminal for the run;
/// nothing is retried internally, and a failure during the download leaves
/// whatever was already written on disk.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The release metadata endpoint answered with a non-success status.
    #[error("release metadata request to `{url}` returned {status}")]
    MetadataFetchFailed { url: String, status: StatusCode },

    /// The release metadata response body was not a valid release document.
    #[error("could not parse the release metadata from `{url}`: {source}")]
    ReleaseParseFailed {
        url: String,
        source: serde_json::Error,
    },

    /// No asset name in the release ends with the expected suffix.
    #[error("the release has no asset whose name ends with `{suffix}`")]
    AssetNotFound { suffix: &'static str },

    /// The asset endpoint answered with a non-success status.
    #[error("artifact request to `{url}` returned {status}")]
    ArtifactFetchFailed { url: Url, status: StatusCode },

    /// The asset endpoint stopped sending body bytes before the end of the
    /// artifact.
    #[error("transfer from `{url}` was interrupted: {source}")]
    TransferInterrupted { url: Url, source: reqwest::Error },
}
