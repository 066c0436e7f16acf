//! Tree traversal and document assembly.
//!
//! Three phases: the page-tree walk discovers the hierarchy and classifies
//! output units, the block-tree walk turns one page into ordered fragments,
//! and the assembler serializes those fragments into a document handed to a
//! [`DocumentSink`](crate::writer::DocumentSink).
//!
//! Every remote failure is recovered at the smallest enclosing frame and
//! logged with the offending identifier; a bad node costs its own subtree,
//! never the run.

use log::warn;

use crate::api::{BlockKind, BlockRecord, ContentSource};
use crate::error::Result;
use crate::model::{
    CollectionState, OutputUnit, OutputUnitPolicy, PageNode, RenderedFragment, TraversalContext,
    NESTED_PAGE_DEPTH,
};
use crate::render::render_block;
use crate::writer::DocumentSink;

/// Depth assigned to the collection's root pages.
const ROOT_PAGE_DEPTH: u32 = 1;

/// Counts reported after a full export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Pages visited during discovery.
    pub total_pages: u32,

    /// Documents successfully written.
    pub documents_written: u32,

    /// Documents lost to write failures.
    pub documents_failed: u32,
}

/// Walk one page's block tree and collect its rendered fragments.
///
/// Pre-order, depth-first, iterative: an explicit stack of child iterators
/// replaces recursion over remote calls, so nesting depth never grows the
/// call stack. The shared [`TraversalContext`] assigns every visited block
/// an order value whether or not it renders, and carries the numbered-list
/// counter across the whole walk.
///
/// A failed child fetch is logged and that subtree contributes no further
/// fragments; fragments already collected are kept.
pub fn collect_fragments<S: ContentSource>(source: &S, root_id: &str) -> Vec<RenderedFragment> {
    let mut ctx = TraversalContext::new();
    let mut fragments = Vec::new();
    let mut stack: Vec<std::vec::IntoIter<BlockRecord>> = Vec::new();

    match source.all_children(root_id) {
        Ok(blocks) => stack.push(blocks.into_iter()),
        Err(e) => {
            warn!("failed to fetch children of {root_id}: {e}");
            return fragments;
        }
    }

    while let Some(current) = stack.last_mut() {
        let Some(block) = current.next() else {
            stack.pop();
            continue;
        };

        let order = ctx.next_order();
        if let Some(text) = render_block(source, &block, &mut ctx) {
            fragments.push(RenderedFragment::new(order, text));
        }

        // Tables are not descended into: the renderer already consumed
        // their row children through its side fetch.
        if block.has_children && !matches!(block.kind, BlockKind::Table { .. }) {
            match source.all_children(&block.id) {
                Ok(children) => stack.push(children.into_iter()),
                Err(e) => warn!("failed to fetch children of block {}: {e}", block.id),
            }
        }
    }

    fragments
}

/// Resolve one root page into the collection state.
///
/// Child pages that fail to resolve are logged and omitted without
/// aborting their siblings. A root that fails entirely is reported to the
/// caller, who decides whether to continue with other roots.
pub fn discover_page_tree<S: ContentSource>(
    source: &S,
    policy: &OutputUnitPolicy,
    state: &mut CollectionState,
    root_id: &str,
) -> Result<()> {
    let node = page_node(source, policy, state, root_id, ROOT_PAGE_DEPTH)?;
    state.root_pages.insert(node.id.clone(), node);
    Ok(())
}

fn page_node<S: ContentSource>(
    source: &S,
    policy: &OutputUnitPolicy,
    state: &mut CollectionState,
    page_id: &str,
    depth: u32,
) -> Result<PageNode> {
    let record = source.get_page(page_id)?;
    let raw_title = record
        .title()
        .unwrap_or_else(|| format!("page_{page_id}"));
    let is_output_unit = policy.is_output_unit(&raw_title, depth);
    let title = policy.stored_title(&raw_title);

    state.total_page_count += 1;
    if is_output_unit {
        state.output_units.push(OutputUnit {
            id: page_id.to_string(),
            title: title.clone(),
        });
    }

    let mut children = Vec::new();
    for block in source.all_children(page_id)? {
        if matches!(block.kind, BlockKind::ChildPage { .. }) {
            match page_node(source, policy, state, &block.id, NESTED_PAGE_DEPTH) {
                Ok(child) => children.push(child),
                Err(e) => warn!("skipping child page {}: {e}", block.id),
            }
        }
    }

    Ok(PageNode {
        id: page_id.to_string(),
        title,
        children,
        is_output_unit,
    })
}

/// Order fragments into the final line sequence.
///
/// The stable sort is a no-op while the walker's counter invariant holds;
/// it guards the assembly step against any out-of-order emission.
pub fn assemble_lines(mut fragments: Vec<RenderedFragment>) -> Vec<String> {
    fragments.sort_by_key(|f| f.order);
    fragments.into_iter().map(|f| f.text).collect()
}

/// Assemble one output unit and hand it to the sink. An empty page still
/// produces an (empty) document.
pub fn export_unit<S: ContentSource, K: DocumentSink>(
    source: &S,
    sink: &K,
    unit: &OutputUnit,
) -> Result<()> {
    let lines = assemble_lines(collect_fragments(source, &unit.id));
    sink.write_document(&unit.title, &lines)
}

/// Run the full pipeline: drain the collection query, discover the page
/// tree, and export every output unit in discovery order.
///
/// Only the top-level collection query can fail the run; per-root and
/// per-document failures are logged and counted.
pub fn export_collection<S: ContentSource, K: DocumentSink>(
    source: &S,
    sink: &K,
    policy: &OutputUnitPolicy,
    collection_id: &str,
) -> Result<ExportSummary> {
    let roots = source.all_collection_pages(collection_id)?;

    let mut state = CollectionState::new();
    for root in &roots {
        if let Err(e) = discover_page_tree(source, policy, &mut state, &root.id) {
            warn!("failed to resolve root page {}: {e}", root.id);
        }
    }

    let mut summary = ExportSummary {
        total_pages: state.total_page_count,
        ..Default::default()
    };
    for unit in &state.output_units {
        match export_unit(source, sink, unit) {
            Ok(()) => summary.documents_written += 1,
            Err(e) => {
                warn!("failed to write document '{}': {e}", unit.title);
                summary.documents_failed += 1;
            }
        }
    }

    Ok(summary)
}
