use serde::Serialize;

/// A top-level slice of the raw input, as found by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<'a> {
    CodeFence {
        language: Option<&'a str>,
        body: &'a str,
    },
    Text {
        content: &'a str,
    },
}

/// Inline nodes with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InlineNode {
    PlainRun(String),
    Bold(Vec<InlineNode>),
    Italic(Vec<InlineNode>),
    InlineCode(String),
    LineBreak,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<InlineNode>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    /// Number of the first marker of an ordered list, when it could be read.
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

/// Block-level elements of a rendered message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        content: Vec<InlineNode>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    List(List),
}

/// The assembled blocks of one message, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn segments_serialize_with_kind_tag() {
        let segment = Segment::CodeFence {
            language: Some("js"),
            body: "let a;",
        };
        assert_eq!(
            serde_json::to_value(segment).unwrap(),
            serde_json::json!({ "kind": "code_fence", "language": "js", "body": "let a;" })
        );
        assert_eq!(
            serde_json::to_value(Segment::Text { content: "hi" }).unwrap(),
            serde_json::json!({ "kind": "text", "content": "hi" })
        );
    }
}
