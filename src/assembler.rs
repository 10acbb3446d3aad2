use crate::block::{Block, InlineNode, List, ListItem, RenderedDocument, Segment};
use crate::config::ListsConfig;
use crate::inline::{Line, MarkerKind, classify_line, line_inline, transform_inline};

/// Group split segments into paragraphs, lists and code blocks.
pub fn assemble(segments: &[Segment<'_>], config: &ListsConfig) -> RenderedDocument {
    let mut blocks = Vec::new();

    for segment in segments {
        match *segment {
            Segment::CodeFence { language, body } => blocks.push(Block::CodeBlock {
                language: language.map(str::to_string),
                content: body.to_string(),
            }),
            Segment::Text { content } => {
                for unit in sub_units(content) {
                    assemble_unit(&unit, config, &mut blocks);
                }
            }
        }
    }

    RenderedDocument { blocks }
}

/// Runs of lines separated by empty lines. Whitespace-only lines stay inside
/// their unit; those at either end of a unit are dropped.
fn sub_units(content: &str) -> Vec<Vec<Line<'_>>> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|raw| raw.strip_suffix('\r').unwrap_or(raw))
        .collect();

    lines
        .split(|raw| raw.is_empty())
        .map(|unit| unit.iter().map(|&raw| classify_line(raw)).collect::<Vec<_>>())
        .map(|unit| trim_blank(&unit).to_vec())
        .filter(|unit| !unit.is_empty())
        .collect()
}

fn trim_blank<'a, 'b>(lines: &'b [Line<'a>]) -> &'b [Line<'a>] {
    let start = lines.iter().position(|line| !line.is_blank()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|line| !line.is_blank()).map_or(start, |i| i + 1);
    &lines[start..end]
}

fn assemble_unit(unit: &[Line<'_>], config: &ListsConfig, blocks: &mut Vec<Block>) {
    let is_list = unit
        .iter()
        .filter(|line| !line.is_blank())
        .all(|line| line.marker.is_some());
    if is_list {
        blocks.push(Block::List(list_block(unit)));
    } else if config.loose_runs {
        for run in unit.chunk_by(|a, b| a.marker.is_some() == b.marker.is_some()) {
            if run[0].marker.is_some() {
                blocks.push(Block::List(list_block(run)));
            } else {
                let run = trim_blank(run);
                if !run.is_empty() {
                    blocks.push(paragraph(run));
                }
            }
        }
    } else {
        blocks.push(paragraph(unit));
    }
}

/// Build a list from marked lines. The first line's marker kind decides the
/// list kind; a line marked differently continues the previous item as
/// literal text. Whitespace-only lines are skipped.
fn list_block(lines: &[Line<'_>]) -> List {
    let (kind, start) = lines
        .first()
        .and_then(|line| line.marker)
        .map_or((MarkerKind::Bullet, None), |m| (m.kind, m.number));
    let mut items: Vec<ListItem> = Vec::new();

    for line in lines.iter().filter(|line| !line.is_blank()) {
        let same_kind = line.marker.is_some_and(|m| m.kind == kind);
        if !same_kind {
            if let Some(item) = items.last_mut() {
                tracing::debug!(line = line.text, "mixed list marker kept as continuation");
                item.content.push(InlineNode::LineBreak);
                item.content.extend(line_inline(line));
                continue;
            }
        }
        items.push(ListItem {
            content: transform_inline(line.content),
        });
    }

    List {
        ordered: kind == MarkerKind::Ordered,
        start: if kind == MarkerKind::Ordered { start } else { None },
        items,
    }
}

fn paragraph(lines: &[Line<'_>]) -> Block {
    let mut content = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push(InlineNode::LineBreak);
        }
        content.extend(line_inline(line));
    }
    Block::Paragraph { content }
}
