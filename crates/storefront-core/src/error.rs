//! Error taxonomy shared by the loader, the controller and the browser shell.
//!
//! Nothing here is fatal: every variant maps to a visible but non-blocking
//! UI state (error placeholder, silent no-op, abandoned init, or fallback).

use rust_decimal::Decimal;

use crate::product::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog fetch failed: {0}")]
    Fetch(String),

    #[error("catalog request returned {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product {0} is not in the catalog")]
    LookupMiss(ProductId),

    #[error("failed to render markup: {0}")]
    Render(#[from] askama::Error),

    #[error("missing element {0}")]
    MissingElement(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("price must be non-negative, got {0}")]
    NegativePrice(Decimal),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
