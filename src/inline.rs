use crate::block::InlineNode;

/// Kind of list marker leading a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `-` or `*`
    Bullet,
    /// A digit sequence followed by `.`
    Ordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: MarkerKind,
    /// Value of an ordered marker. `None` for bullets and for numbers too large to hold.
    pub number: Option<u64>,
}

/// A source line tagged with its list marker, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The whole line with surrounding whitespace removed.
    pub text: &'a str,
    pub marker: Option<ListMarker>,
    /// What follows the marker, or the whole trimmed line when unmarked.
    pub content: &'a str,
}

impl<'a> Line<'a> {
    /// The marker and the whitespace after it, empty when unmarked.
    pub fn marker_text(&self) -> &'a str {
        &self.text[..self.text.len() - self.content.len()]
    }

    /// Is this line empty once trimmed?
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Tag a line with its list marker.
pub fn classify_line(line: &str) -> Line<'_> {
    let text = line.trim();
    match split_marker(text) {
        Some((marker, content)) => Line {
            text,
            marker: Some(marker),
            content,
        },
        None => Line {
            text,
            marker: None,
            content: text,
        },
    }
}

fn split_marker(text: &str) -> Option<(ListMarker, &str)> {
    let (marker, rest) = if let Some(rest) = text.strip_prefix(['-', '*']) {
        let marker = ListMarker {
            kind: MarkerKind::Bullet,
            number: None,
        };
        (marker, rest)
    } else {
        let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        let rest = text[digits..].strip_prefix('.')?;
        let marker = ListMarker {
            kind: MarkerKind::Ordered,
            number: text[..digits].parse().ok(),
        };
        (marker, rest)
    };

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    if content.is_empty() {
        return None;
    }
    Some((marker, content))
}

/// Convert one line of text into inline nodes.
///
/// Inline code binds tightest, then bold, then italic. A span claimed by an
/// earlier tier is never rescanned by a later one, and any delimiter without a
/// partner is kept as literal text.
pub fn transform_inline(text: &str) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    push_inline(text, &mut nodes);
    nodes
}

/// Inline nodes for a whole line read as text, with any list marker kept literal.
pub fn line_inline(line: &Line<'_>) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    push_plain(line.marker_text(), &mut nodes);
    push_inline(line.content, &mut nodes);
    nodes
}

fn push_inline(text: &str, nodes: &mut Vec<InlineNode>) {
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('`') {
        let open = cursor + offset;
        match text[open + 1..].find('`') {
            // Adjacent backticks enclose nothing
            Some(0) => cursor = open + 1,
            Some(len) => {
                push_bold_tier(&text[plain_start..open], nodes);
                let code = &text[open + 1..open + 1 + len];
                nodes.push(InlineNode::InlineCode(code.to_string()));
                cursor = open + len + 2;
                plain_start = cursor;
            }
            None => break,
        }
    }

    push_bold_tier(&text[plain_start..], nodes);
}

fn push_bold_tier(text: &str, nodes: &mut Vec<InlineNode>) {
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find("**") {
        let open = cursor + offset;
        let body_start = open + 2;
        let Some(close) = closing_delimiter(text, body_start, "**") else {
            break;
        };
        push_italic_tier(&text[plain_start..open], nodes);
        let mut inner = Vec::new();
        push_italic_tier(&text[body_start..close], &mut inner);
        nodes.push(InlineNode::Bold(inner));
        cursor = close + 2;
        plain_start = cursor;
    }

    push_italic_tier(&text[plain_start..], nodes);
}

fn push_italic_tier(text: &str, nodes: &mut Vec<InlineNode>) {
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('*') {
        let open = cursor + offset;
        let body_start = open + 1;
        let Some(close) = closing_delimiter(text, body_start, "*") else {
            break;
        };
        push_plain(&text[plain_start..open], nodes);
        let body = text[body_start..close].to_string();
        nodes.push(InlineNode::Italic(vec![InlineNode::PlainRun(body)]));
        cursor = close + 1;
        plain_start = cursor;
    }

    push_plain(&text[plain_start..], nodes);
}

/// Find the nearest `delimiter` closing a span whose body starts at
/// `body_start`. The body holds at least one character.
///
/// When no partner exists for this opener none exists for any later one
/// either, since their searches would start further right.
fn closing_delimiter(text: &str, body_start: usize, delimiter: &str) -> Option<usize> {
    let first = text[body_start..].chars().next()?;
    let search_from = body_start + first.len_utf8();
    text[search_from..]
        .find(delimiter)
        .map(|offset| search_from + offset)
}

fn push_plain(text: &str, nodes: &mut Vec<InlineNode>) {
    if text.is_empty() {
        return;
    }
    if let Some(InlineNode::PlainRun(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(InlineNode::PlainRun(text.to_string()));
    }
}
