//! Remote content API: wire types, the [`ContentSource`] seam, and the HTTP
//! client.
//!
//! The export engine only ever talks to a [`ContentSource`]; the bundled
//! [`NotionClient`] is one implementation, and tests substitute in-memory
//! sources.

mod client;
mod types;

pub use client::NotionClient;
pub use types::{
    Annotations, BlockKind, BlockRecord, ChildPageContent, FileRef, ImageContent, PageProperty,
    PageRecord, Paginated, RichTextContent, RichTextSpan, TableMeta, TableRowContent,
};

use crate::error::Result;

/// A paginated source of pages and blocks.
///
/// Contract: within one listing call, `results` are in document order, and
/// the renderer trusts that order as the document order. A source that
/// cannot guarantee stable per-call ordering cannot back this exporter.
///
/// Every listing is cursor-paginated; the provided `all_*` helpers drain
/// cursors until `has_more` is false, so callers never read a truncated
/// listing.
pub trait ContentSource {
    /// Fetch one page of the top-level collection listing.
    fn query_collection(
        &self,
        collection_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<PageRecord>>;

    /// Fetch a single page record (title and metadata).
    fn get_page(&self, page_id: &str) -> Result<PageRecord>;

    /// Fetch one page of a node's direct children.
    fn list_children(&self, node_id: &str, cursor: Option<&str>)
        -> Result<Paginated<BlockRecord>>;

    /// Drain the collection listing across all cursors.
    fn all_collection_pages(&self, collection_id: &str) -> Result<Vec<PageRecord>> {
        drain(|cursor| self.query_collection(collection_id, cursor))
    }

    /// Drain a node's child listing across all cursors.
    fn all_children(&self, node_id: &str) -> Result<Vec<BlockRecord>> {
        drain(|cursor| self.list_children(node_id, cursor))
    }
}

/// Follow `next_cursor` until the listing reports no further pages.
fn drain<T>(mut fetch: impl FnMut(Option<&str>) -> Result<Paginated<T>>) -> Result<Vec<T>> {
    let mut all = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor.as_deref())?;
        all.extend(page.results);
        if !page.has_more {
            return Ok(all);
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            // has_more without a cursor: the listing cannot continue.
            None => return Ok(all),
        }
    }
}
