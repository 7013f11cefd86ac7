use serde::{Deserialize, Serialize};
use url::Url;

/// A release as the forge API describes it. Everything except the asset list
/// is ignored.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct Release {
    pub(crate) assets: Vec<Asset>,
}

/// One downloadable file attached to a release. The `url` field is the
/// asset's API endpoint, which serves the raw content when asked for an
/// octet stream. It is not the public browser download URL.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub(crate) struct Asset {
    pub(crate) name: String,
    pub(crate) url: Url,
}
