//! Folder identity: the persistent key one folder page maps to.

use anyhow::{Context, Result};
use url::Url;

/// Key prefix kept stable across releases so old ledgers stay valid.
const KEY_PREFIX: &str = "progress_";

/// Derive the progress key for a folder page.
///
/// Host, path, and fragment all participate: files.fm addresses distinct
/// views by path and by `#fragment`, and two views must never share a
/// ledger. The same URL always yields the same key.
pub fn folder_key(page_url: &str) -> Result<String> {
    let url =
        Url::parse(page_url).with_context(|| format!("invalid folder URL: {page_url}"))?;
    let host = url.host_str().context("folder URL has no host")?;
    let fragment = url
        .fragment()
        .map(|f| format!("#{f}"))
        .unwrap_or_default();
    Ok(format!("{KEY_PREFIX}{host}{}{fragment}", url.path()))
}

/// True when the URL points at a files.fm page this tool knows how to drive.
pub fn is_supported(page_url: &str) -> bool {
    Url::parse(page_url)
        .ok()
        .and_then(|url| {
            url.host_str()
                .map(|host| host == "files.fm" || host.ends_with(".files.fm"))
        })
        .unwrap_or(false)
}
