use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use crate::block::{Block, InlineNode, List, RenderedDocument};
use crate::config::Config;

/// Convert a document to HTML.
///
/// All text taken from the input is escaped here and nowhere else.
pub fn serialize(doc: &RenderedDocument, config: &Config) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        emit_block(block, config, &mut out);
    }
    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Paragraph { content } => {
            out.push_str("<p>");
            nodes_to_html(content, config, out);
            out.push_str("</p>");
        }
        Block::CodeBlock { language, content } => {
            out.push_str("<pre><code");
            if let Some(lang) = language.as_deref().filter(|_| config.code.language_class) {
                out.push_str(" class=\"");
                encode_double_quoted_attribute_to_string(&config.code.class_prefix, out);
                encode_double_quoted_attribute_to_string(lang, out);
                out.push('"');
            }
            out.push('>');
            encode_text_to_string(content, out);
            out.push_str("</code></pre>");
        }
        Block::List(list) => list_to_html(list, config, out),
    }
}

fn list_to_html(list: &List, config: &Config, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push('<');
    out.push_str(tag);
    if let Some(start) = list.start.filter(|&n| n != 1 && config.lists.ordered_start) {
        out.push_str(&format!(" start=\"{start}\""));
    }
    out.push('>');

    for item in &list.items {
        out.push_str("<li>");
        nodes_to_html(&item.content, config, out);
        out.push_str("</li>");
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn nodes_to_html(nodes: &[InlineNode], config: &Config, out: &mut String) {
    for node in nodes {
        node_to_html(node, config, out);
    }
}

fn node_to_html(node: &InlineNode, config: &Config, out: &mut String) {
    match node {
        InlineNode::PlainRun(text) => {
            encode_text_to_string(text, out);
        }
        InlineNode::Bold(inner) => {
            out.push_str("<strong>");
            nodes_to_html(inner, config, out);
            out.push_str("</strong>");
        }
        InlineNode::Italic(inner) => {
            out.push_str("<em>");
            nodes_to_html(inner, config, out);
            out.push_str("</em>");
        }
        InlineNode::InlineCode(text) => {
            out.push_str("<code>");
            encode_text_to_string(text, out);
            out.push_str("</code>");
        }
        InlineNode::LineBreak => out.push_str(config.html.line_break()),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::{render, render_with_config};
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraph() {
        assert_eq!(render("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(""), "");
        assert_eq!(render("  \n\n  "), "");
    }

    #[test]
    fn fence_between_paragraphs() {
        assert_eq!(
            render("before\n```js\nlet x=1;\n```\nafter"),
            "<p>before</p><pre><code class=\"language-js\">let x=1;</code></pre><p>after</p>"
        );
    }

    #[test]
    fn bold_with_nested_italic() {
        assert_eq!(
            render("**bold *and* nested**"),
            "<p><strong>bold <em>and</em> nested</strong></p>"
        );
    }

    #[test]
    fn inline_code_keeps_markers() {
        assert_eq!(
            render("`**not bold**`"),
            "<p><code>**not bold**</code></p>"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            render("- a\n- b\n- c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(render("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(
            render("3. c\n4. d"),
            "<ol start=\"3\"><li>c</li><li>d</li></ol>"
        );
    }

    #[test]
    fn unmatched_asterisk_is_literal() {
        assert_eq!(render("a * b"), "<p>a * b</p>");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(render("one\ntwo"), "<p>one<br>two</p>");

        let mut config = Config::default();
        config.html.self_closing_breaks = true;
        assert_eq!(render_with_config("one\ntwo", &config), "<p>one<br />two</p>");
    }

    #[test]
    fn escapes_text() {
        assert_eq!(
            render("<script>alert('x')</script> & more"),
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn escapes_inline_code_and_emphasis() {
        assert_eq!(
            render("`<b>` **<i>** *&*"),
            "<p><code>&lt;b&gt;</code> <strong>&lt;i&gt;</strong> <em>&amp;</em></p>"
        );
    }

    #[test]
    fn escapes_code_block_body_and_language() {
        assert_eq!(
            render("```x\"onclick=\"y\n</pre><img src=x>\n```"),
            "<pre><code class=\"language-x&quot;onclick=&quot;y\">&lt;/pre&gt;&lt;img src=x&gt;</code></pre>"
        );
    }

    #[test]
    fn escapes_list_items() {
        assert_eq!(render("- <li>x</li>"), "<ul><li>&lt;li&gt;x&lt;/li&gt;</li></ul>");
    }

    #[test]
    fn language_class_can_be_disabled() {
        let mut config = Config::default();
        config.code.language_class = false;
        assert_eq!(
            render_with_config("```rust\nfn f() {}\n```", &config),
            "<pre><code>fn f() {}</code></pre>"
        );
    }

    #[test]
    fn ordered_start_can_be_disabled() {
        let mut config = Config::default();
        config.lists.ordered_start = false;
        assert_eq!(render_with_config("7. x", &config), "<ol><li>x</li></ol>");
    }

    #[test]
    fn unterminated_fence_is_text() {
        assert_eq!(
            render("```js\nlet x = 1;"),
            "<p>```js<br>let x = 1;</p>"
        );
    }

    #[test]
    fn whitespace_only_line_keeps_one_paragraph() {
        assert_eq!(render("one\n   \ntwo"), "<p>one<br><br>two</p>");
    }

    #[test]
    fn four_backtick_fences() {
        assert_eq!(
            render("````\nx\n````"),
            "<pre><code>x</code></pre>"
        );
        assert_eq!(
            render("````md\n```js\nlet a;\n```\n````"),
            "<pre><code class=\"language-md\">```js\nlet a;\n```</code></pre>"
        );
    }

    #[test]
    fn demoted_bullet_marker_is_literal() {
        assert_eq!(
            render("1. a\n* b *c*"),
            "<ol><li>a<br>* b <em>c</em></li></ol>"
        );
    }
}
