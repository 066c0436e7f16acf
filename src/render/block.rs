//! Per-block Markdown rendering rules.

use crate::api::{BlockKind, BlockRecord, ContentSource, RichTextContent};
use crate::model::TraversalContext;
use crate::render::compose;

/// Render one block to zero or one Markdown fragment.
///
/// Rich-text blocks whose composed text is empty produce nothing; a heading
/// still resets the numbered-list counter first, and a numbered item only
/// advances the counter when it emits. Tables fetch their row children
/// through `source` as a side call; a failed row fetch is logged and the
/// table contributes nothing. Block kinds outside the rendered set emit
/// nothing.
pub fn render_block<S: ContentSource>(
    source: &S,
    block: &BlockRecord,
    ctx: &mut TraversalContext,
) -> Option<String> {
    match &block.kind {
        BlockKind::Heading1 { heading_1 } => heading(heading_1, 1, ctx),
        BlockKind::Heading2 { heading_2 } => heading(heading_2, 2, ctx),
        BlockKind::Heading3 { heading_3 } => heading(heading_3, 3, ctx),
        BlockKind::Paragraph { paragraph } => non_empty(compose(&paragraph.rich_text)),
        BlockKind::BulletedListItem { bulleted_list_item } => {
            non_empty(compose(&bulleted_list_item.rich_text)).map(|text| format!("- {text}"))
        }
        BlockKind::NumberedListItem { numbered_list_item } => {
            let text = compose(&numbered_list_item.rich_text);
            if text.is_empty() {
                return None;
            }
            Some(format!("{}. {}", ctx.advance_list(), text))
        }
        BlockKind::Table { .. } => render_table(source, &block.id),
        BlockKind::Image { image } => image.url().map(|url| format!("![image]({url})")),
        BlockKind::TableRow { .. } | BlockKind::ChildPage { .. } | BlockKind::Other => None,
    }
}

fn heading(content: &RichTextContent, level: usize, ctx: &mut TraversalContext) -> Option<String> {
    ctx.reset_list();
    non_empty(compose(&content.rich_text)).map(|text| format!("{} {}", "#".repeat(level), text))
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Fetch a table's row children and build a Markdown table: header row from
/// the first row, one `---` separator per column, then the remaining rows,
/// as a single multi-line fragment.
fn render_table<S: ContentSource>(source: &S, table_id: &str) -> Option<String> {
    let children = match source.all_children(table_id) {
        Ok(children) => children,
        Err(e) => {
            log::warn!("failed to fetch rows of table {table_id}: {e}");
            return None;
        }
    };

    let rows: Vec<Vec<String>> = children
        .iter()
        .filter_map(|child| match &child.kind {
            BlockKind::TableRow { table_row } => Some(
                table_row
                    .cells
                    .iter()
                    .map(|cell| compose(cell).trim().to_string())
                    .collect(),
            ),
            _ => None,
        })
        .collect();

    let first = rows.first()?;
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(first));
    lines.push(format!("|{}|", vec!["---"; first.len()].join("|")));
    for row in &rows[1..] {
        lines.push(format_row(row));
    }
    Some(lines.join("\n"))
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
