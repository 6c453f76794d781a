//! Theme command.

use shopfront_storefront::theme::THEME;
use tracing::info;

/// Log the theme palette as JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if the theme cannot be encoded.
pub fn show() -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(&THEME)?;
    info!("{json}");
    Ok(())
}
