use std::sync::LazyLock;

mod assembler;
mod block;
mod config;
mod error;
mod html;
mod inline;
mod splitter;
mod turns;

pub use assembler::assemble;
pub use block::{Block, InlineNode, List, ListItem, RenderedDocument, Segment};
pub use config::{CodeConfig, Config, HtmlConfig, ListsConfig, TurnsConfig};
pub use error::ConfigError;
pub use html::serialize;
pub use inline::{Line, ListMarker, MarkerKind, classify_line, line_inline, transform_inline};
pub use splitter::split;
pub use turns::{Sender, Turn, render_transcript, render_turn};

static DEFAULT_CONFIG: LazyLock<Config> = LazyLock::new(Config::compiled_default);

/// The bundled defaults, parsed once per process.
pub fn default_config() -> &'static Config {
    &DEFAULT_CONFIG
}

/// Parse a model response into blocks using default config.
pub fn parse(raw: &str) -> RenderedDocument {
    parse_with_config(raw, default_config())
}

/// Parse a model response into blocks with custom config.
pub fn parse_with_config(raw: &str, config: &Config) -> RenderedDocument {
    let segments = split(raw);
    assemble(&segments, &config.lists)
}

/// Convert a model response to HTML using default config.
pub fn render(raw: &str) -> String {
    render_with_config(raw, default_config())
}

/// Convert a model response to HTML with custom config.
pub fn render_with_config(raw: &str, config: &Config) -> String {
    let doc = parse_with_config(raw, config);
    serialize(&doc, config)
}

/// Text of a document with all markup dropped.
pub fn to_plain_text(doc: &RenderedDocument) -> String {
    let blocks: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph { content } => nodes_text(content),
            Block::CodeBlock { content, .. } => content.clone(),
            Block::List(list) => list
                .items
                .iter()
                .map(|item| nodes_text(&item.content))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();
    blocks.join("\n\n")
}

fn nodes_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(node_text).collect()
}

fn node_text(node: &InlineNode) -> String {
    match node {
        InlineNode::PlainRun(t) | InlineNode::InlineCode(t) => t.clone(),
        InlineNode::Bold(inner) | InlineNode::Italic(inner) => nodes_text(inner),
        InlineNode::LineBreak => "\n".to_string(),
    }
}
