//! Catalog document parsing and the loader → controller readiness channel.
//!
//! The loader owns a [`CatalogPublisher`]; every consumer holds a cheap
//! [`CatalogReader`] clone. Readers pull snapshots on demand and can await
//! the first settled status instead of polling for it.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{broadcast, watch};

use crate::error::Result;
use crate::product::{Product, ProductId};

/// Parse the catalog document body.
///
/// A body that is not JSON is a load failure. A missing or non-array
/// `products` field is treated as an empty catalog; individual records that
/// do not decode are skipped.
pub fn parse_document(body: &str) -> Result<Vec<Product>> {
    let doc: serde_json::Value = serde_json::from_str(body)?;
    let Some(records) = doc.get("products").and_then(serde_json::Value::as_array) else {
        tracing::debug!("no products collection, using empty catalog");
        return Ok(Vec::new());
    };
    let products = records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match Product::deserialize(raw) {
            Ok(product) => Some(product),
            Err(err) => {
                tracing::warn!(index, %err, "skipping invalid product record");
                None
            }
        })
        .collect();
    Ok(products)
}

/// Absolute (`http…`) and root-relative (`/…`) paths pass through; anything
/// else is made explicitly relative with a `./` prefix.
pub fn normalize_image_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path.starts_with("http") || path.starts_with('/') || path.starts_with("./")
    {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("./{path}"))
    }
}

#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    #[default]
    Pending,
    Loaded(Arc<[Product]>),
    Failed,
}

impl CatalogStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn products(&self) -> &[Product] {
        match self {
            Self::Loaded(products) => products,
            _ => &[],
        }
    }
}

/// Typed replacement for the `productsLoaded` / `productsRendered` window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    Loaded { count: usize },
    Rendered,
    Failed,
}

const EVENT_CAPACITY: usize = 16;

pub fn channel() -> (CatalogPublisher, CatalogReader) {
    let (status_tx, status_rx) = watch::channel(CatalogStatus::Pending);
    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    let reader = CatalogReader {
        status: status_rx,
        events: events.clone(),
    };
    (
        CatalogPublisher {
            status: status_tx,
            events,
        },
        reader,
    )
}

/// Write side, held by the catalog loader only.
pub struct CatalogPublisher {
    status: watch::Sender<CatalogStatus>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogPublisher {
    /// Replace the product list. Re-invocation replaces, never appends.
    pub fn publish(&self, products: Vec<Product>) {
        let count = products.len();
        tracing::debug!(count, "catalog published");
        self.status.send_replace(CatalogStatus::Loaded(products.into()));
        self.emit(CatalogEvent::Loaded { count });
    }

    pub fn fail(&self) {
        tracing::warn!("catalog load failed");
        self.status.send_replace(CatalogStatus::Failed);
        self.emit(CatalogEvent::Failed);
    }

    /// Announce that cards for the current snapshot are in the DOM.
    pub fn rendered(&self) {
        self.emit(CatalogEvent::Rendered);
    }

    pub fn reader(&self) -> CatalogReader {
        CatalogReader {
            status: self.status.subscribe(),
            events: self.events.clone(),
        }
    }

    fn emit(&self, event: CatalogEvent) {
        // No subscribers is fine; readers can always pull the status.
        let _ = self.events.send(event);
    }
}

/// Read side. Cloning is cheap; snapshots are copied out on read.
#[derive(Clone)]
pub struct CatalogReader {
    status: watch::Receiver<CatalogStatus>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogReader {
    pub fn is_pending(&self) -> bool {
        self.status.borrow().is_pending()
    }

    /// Current product list; empty before the load settles or after a failure.
    pub fn products(&self) -> Vec<Product> {
        self.status.borrow().products().to_vec()
    }

    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.status.borrow().products().iter().find(|p| p.id == id).cloned()
    }

    /// Resolves once the loader has at least attempted its fetch.
    pub async fn ready(&self) -> CatalogStatus {
        let mut rx = self.status.clone();
        // Err means the publisher is gone; whatever it last sent is final.
        let _ = rx.wait_for(|status| !status.is_pending()).await;
        rx.borrow().clone()
    }

    /// Events sent after this call; earlier ones are not replayed.
    pub fn subscribe(&self) -> CatalogEvents {
        CatalogEvents(self.events.subscribe())
    }
}

/// Subscription to loader events.
pub struct CatalogEvents(broadcast::Receiver<CatalogEvent>);

impl CatalogEvents {
    /// Next event, or `None` once the publisher is gone. A lagging
    /// subscriber skips what it missed.
    pub async fn next(&mut self) -> Option<CatalogEvent> {
        loop {
            match self.0.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "catalog event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TWO_PRODUCTS: &str = r#"{"products":[
        {"id":1,"name":"A","price":100,"image":"a.jpg"},
        {"id":2,"name":"B","price":50,"image":"b.jpg"}
    ]}"#;

    #[test]
    fn parses_products_in_document_order() -> anyhow::Result<()> {
        let products = parse_document(TWO_PRODUCTS)?;
        let ids: Vec<i64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(products[1].name, "B");
        Ok(())
    }

    #[test]
    fn missing_or_malformed_collection_is_empty() -> anyhow::Result<()> {
        assert!(parse_document("{}")?.is_empty());
        assert!(parse_document(r#"{"products":"nope"}"#)?.is_empty());
        assert!(parse_document(r#"{"products":[{"id":"x"}]}"#)?.is_empty());
        assert!(parse_document(r#"{"products":null}"#)?.is_empty());
        assert!(parse_document(r#"[1,2,3]"#)?.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_records_are_skipped_not_fatal() -> anyhow::Result<()> {
        let products = parse_document(
            r#"{"products":[
                {"id":1,"name":"A","price":-1,"image":"a.jpg"},
                {"id":2,"name":"B","price":50,"image":"b.jpg"},
                {"name":"no id","price":5}
            ]}"#,
        )?;
        let ids: Vec<i64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2]);
        Ok(())
    }

    #[test]
    fn invalid_json_is_a_load_failure() {
        let err = parse_document("<html>404</html>").unwrap_err();
        assert!(matches!(err, crate::error::Error::Parse(_)));
    }

    #[test]
    fn image_paths_are_normalized() {
        assert_eq!(normalize_image_path("https://cdn.example/a.jpg"), "https://cdn.example/a.jpg");
        assert_eq!(normalize_image_path("/assets/a.jpg"), "/assets/a.jpg");
        assert_eq!(normalize_image_path("./a.jpg"), "./a.jpg");
        assert_eq!(normalize_image_path("assets/a.jpg"), "./assets/a.jpg");
        assert_eq!(normalize_image_path(""), "");
    }

    #[test]
    fn reader_is_empty_until_published() -> anyhow::Result<()> {
        let (publisher, reader) = channel();
        assert!(reader.is_pending());
        assert!(reader.products().is_empty());

        publisher.publish(parse_document(TWO_PRODUCTS)?);
        assert!(!reader.is_pending());
        assert_eq!(reader.products().len(), 2);
        assert_eq!(reader.find(ProductId::new(2)).map(|p| p.name), Some("B".to_owned()));
        assert!(reader.find(ProductId::new(9)).is_none());
        Ok(())
    }

    #[test]
    fn republishing_replaces_the_snapshot() -> anyhow::Result<()> {
        let (publisher, reader) = channel();
        publisher.publish(parse_document(TWO_PRODUCTS)?);
        publisher.publish(parse_document(r#"{"products":[{"id":7,"name":"C","price":1}]}"#)?);
        let ids: Vec<i64> = reader.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![7]);
        Ok(())
    }

    #[test]
    fn failure_leaves_products_empty() {
        let (publisher, reader) = channel();
        publisher.fail();
        assert!(!reader.is_pending());
        assert!(reader.products().is_empty());
    }

    #[tokio::test]
    async fn ready_resolves_after_publish() -> anyhow::Result<()> {
        let (publisher, reader) = channel();
        let waiter = {
            let reader = reader.clone();
            tokio::spawn(async move { reader.ready().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        publisher.publish(parse_document(TWO_PRODUCTS)?);

        let status = waiter.await?;
        assert_eq!(status.products().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn ready_resolves_on_failure_too() {
        let (publisher, reader) = channel();
        publisher.fail();
        assert!(matches!(reader.ready().await, CatalogStatus::Failed));
    }

    #[tokio::test]
    async fn events_are_broadcast_in_order() -> anyhow::Result<()> {
        let (publisher, reader) = channel();
        let mut events = reader.subscribe();

        publisher.publish(Vec::new());
        publisher.rendered();

        assert_eq!(events.next().await, Some(CatalogEvent::Loaded { count: 0 }));
        assert_eq!(events.next().await, Some(CatalogEvent::Rendered));
        Ok(())
    }

    #[tokio::test]
    async fn subscription_ends_when_loader_is_dropped() {
        let (publisher, reader) = channel();
        let mut events = reader.subscribe();
        publisher.rendered();
        drop(publisher);
        drop(reader);
        assert_eq!(events.next().await, Some(CatalogEvent::Rendered));
        assert_eq!(events.next().await, None);
    }
}
