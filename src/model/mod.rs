//! Export-domain model types.
//!
//! These sit between the wire records fetched from the API and the Markdown
//! renderer: per-page traversal state, rendered fragments, and the page
//! hierarchy with its output-unit classification.

mod fragment;
mod page_tree;

pub use fragment::{RenderedFragment, TraversalContext};
pub use page_tree::{CollectionState, OutputUnit, OutputUnitPolicy, PageNode, NESTED_PAGE_DEPTH};
