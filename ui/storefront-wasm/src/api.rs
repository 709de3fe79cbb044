//! HTTP fetch for the static catalog document.

use gloo_net::http::Request;
use storefront_core::{Error, Result};

/// GET `url` and return the body, mapping transport and status failures
/// onto the load-failure variants.
pub async fn fetch_text(url: &str) -> Result<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;

    if !resp.ok() {
        return Err(Error::Status {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    resp.text().await.map_err(|e| Error::Fetch(e.to_string()))
}
