//! # unnotion
//!
//! Export a hierarchical Notion workspace into flat Markdown files.
//!
//! The library walks a cursor-paginated remote API (database query, page
//! metadata, block children), renders typed blocks to Markdown, decides
//! which pages of the tree become standalone files, and writes one
//! document per selected page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unnotion::{export_collection, MarkdownWriter, NotionClient, OutputUnitPolicy};
//!
//! fn main() -> unnotion::Result<()> {
//!     let client = NotionClient::new("secret_token")?;
//!     let writer = MarkdownWriter::new("notion_data");
//!     let summary = export_collection(&client, &writer, &OutputUnitPolicy::new(), "a1b2c3")?;
//!     println!("{} documents written", summary.documents_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior
//!
//! - **Order preservation**: every visited block takes one value from a
//!   per-page order counter, so documents reassemble in exact pre-order
//!   even though tables and nested blocks interleave extra fetches.
//! - **Uniform pagination**: the collection query, block children and
//!   table rows all drain cursors until `has_more` is false.
//! - **Best-effort export**: a failed fetch costs its own subtree or page,
//!   never the run; failures are logged with the offending identifier.
//! - **Sequential**: one blocking call at a time, in traversal order.
//!   No parallel fetches, no retries.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod writer;

// Re-export commonly used types
pub use api::{
    Annotations, BlockKind, BlockRecord, ContentSource, NotionClient, PageRecord, Paginated,
    RichTextSpan,
};
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use export::{
    assemble_lines, collect_fragments, discover_page_tree, export_collection, export_unit,
    ExportSummary,
};
pub use model::{
    CollectionState, OutputUnit, OutputUnitPolicy, PageNode, RenderedFragment, TraversalContext,
};
pub use render::compose;
pub use writer::{sanitize_file_name, DocumentSink, MarkdownWriter};
