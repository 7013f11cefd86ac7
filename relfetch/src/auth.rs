use anyhow::{Context, Result};
use reqwest::header::HeaderValue;

/// Builds the `Authorization` value sent with both the metadata and the
/// artifact requests. The release API expects the `token` scheme here, not
/// `Bearer`.
pub(crate) fn token_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("token {token}"))
        .context("failed to create header value for the Authorization header")?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_the_token_scheme() -> Result<()> {
        let value = token_header("ghp_sometoken")?;
        assert_eq!(value.as_bytes(), b"token ghp_sometoken");
        assert!(value.is_sensitive(), "token is excluded from debug output");
        Ok(())
    }

    #[test]
    fn placeholder_token_is_still_a_legal_header() -> Result<()> {
        // The builder substitutes a phrase with spaces when the TOKEN env var
        // is missing. It must survive header validation so the server, not
        // this library, rejects the request.
        let value = token_header("TOKEN is not defined")?;
        assert_eq!(value.as_bytes(), b"token TOKEN is not defined");
        Ok(())
    }
}
