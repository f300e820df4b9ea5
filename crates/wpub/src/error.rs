//! CLI error types.

use wpub_config::ConfigError;
use wpub_wordpress::ImageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Image(#[from] ImageError),

    #[error("cannot read image: {0}")]
    Decode(#[from] image::ImageError),
}
