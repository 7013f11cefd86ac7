//! A library for downloading the Linux build attached to a tagged release.
//!
//! `relfetch` asks a forge's release API for the metadata of a tagged release,
//! picks the attached asset whose filename ends with `unknown-linux-gnu.zip`,
//! and streams that asset's content to a local file named `api_blog.zip`. It
//! is designed to be driven from deploy scripts and other automation.
//!
//! This project also ships a CLI tool named `relfetch`. See the `relfetch-cli`
//! crate for details on using this tool.
//!
//! The main entry point for programmatic use is the [`RelfetchBuilder`]
//! struct. Here is an example of its usage:
//!
//! ```ignore
//! use relfetch::RelfetchBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let relfetch = RelfetchBuilder::new()
//!         .metadata_url("https://api.github.com/repos/owner/repo/releases/tags/v1.2.0")
//!         .token("ghp_sometoken")
//!         .build()?;
//!
//!     let destination = relfetch.fetch().await?;
//!     println!("wrote {}", destination.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! The metadata endpoint and the token can also come from the `GH_TAGS` and
//! `TOKEN` environment variables. When neither the builder argument nor the
//! environment variable is set, the run still issues a request using a
//! placeholder value, so the resulting error names the missing setting
//! instead of failing before any network attempt.
//!
//! Every failure is terminal. The distinct failure kinds are captured by
//! [`FetchError`]; nothing is retried and an interrupted download leaves the
//! partially written file in place.
//!
//! ## Features
//!
//! This crate offers several features to control the TLS dependency used by
//! `reqwest`, plus an optional logger:
//!
#![doc = document_features::document_features!()]

mod auth;
mod builder;
mod downloader;
mod error;
mod release;
mod relfetch;
mod resolver;

pub use crate::{builder::RelfetchBuilder, error::FetchError, relfetch::Relfetch};

// The version of the `relfetch` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "logging")]
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};

/// This function initializes logging for the application. It's public for the
/// sake of the `relfetch` binary, but it lives in the library crate so that
/// test code can also enable logging.
///
/// # Errors
///
/// This can return a `log::SetLoggerError` error.
#[cfg(feature = "logging")]
pub fn init_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::BrightBlack)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{target}][{level}] {message}",
                target = record.target(),
                level = colors.color(record.level()),
                message = message,
            ));
        })
        .level(level)
        // This is very noisy.
        .level_for("hyper", log::LevelFilter::Error)
        .chain(std::io::stderr())
        .apply()
}
