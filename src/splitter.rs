use crate::block::Segment;

const FENCE: &str = "```";

/// Outcome of trying to read a fence starting at a given marker.
enum Scan<'a> {
    Fence {
        language: Option<&'a str>,
        body: &'a str,
        end: usize,
    },
    /// Not an opener; resume searching at this offset.
    Skip(usize),
    /// An opener of `run` backticks with no closing run; resume at `next`.
    Unclosed { run: usize, next: usize },
    /// No later marker can form a complete fence.
    Exhausted,
}

/// Split raw text into fenced code blocks and the text around them.
///
/// A fence opens with a run of three or more backticks and closes on the next
/// run at least as long, so a longer outer fence can hold a shorter inner one.
/// Only complete open/close pairs become `CodeFence` segments. Everything else,
/// including an unterminated opener, stays in a `Text` segment verbatim.
pub fn split(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    // No run at least this long follows the cursor
    let mut unclosable = usize::MAX;

    while let Some(offset) = raw[cursor..].find(FENCE) {
        let open = cursor + offset;
        match scan_fence(raw, open, unclosable) {
            Scan::Fence {
                language,
                body,
                end,
            } => {
                push_text(&raw[text_start..open], &mut segments);
                segments.push(Segment::CodeFence { language, body });
                cursor = end;
                text_start = end;
            }
            Scan::Skip(next) => cursor = next,
            Scan::Unclosed { run, next } => {
                tracing::debug!(offset = open, "unterminated code fence left as text");
                unclosable = run;
                cursor = next;
            }
            Scan::Exhausted => break,
        }
    }

    push_text(&raw[text_start..], &mut segments);
    tracing::trace!(segments = segments.len(), "split input");
    segments
}

fn push_text<'a>(content: &'a str, segments: &mut Vec<Segment<'a>>) {
    if !content.is_empty() {
        segments.push(Segment::Text { content });
    }
}

fn backtick_run(raw: &str, at: usize) -> usize {
    raw[at..].bytes().take_while(|&b| b == b'`').count()
}

fn scan_fence(raw: &str, open: usize, unclosable: usize) -> Scan<'_> {
    let run = backtick_run(raw, open);
    let info_start = open + run;
    if run >= unclosable {
        return Scan::Skip(info_start);
    }
    let Some(line_len) = raw[info_start..].find('\n') else {
        // No newline left, so no later marker can open a fence either
        return Scan::Exhausted;
    };
    let info = &raw[info_start..info_start + line_len];
    if let Some(tick) = info.find('`') {
        return Scan::Skip(info_start + tick);
    }

    let body_start = info_start + line_len + 1;
    let Some((close, end)) = closing_run(raw, body_start, run) else {
        if run == FENCE.len() {
            tracing::debug!(offset = open, "unterminated code fence left as text");
            return Scan::Exhausted;
        }
        return Scan::Unclosed {
            run,
            next: info_start,
        };
    };
    let body = &raw[body_start..close];
    let body = body
        .strip_suffix('\n')
        .map(|b| b.strip_suffix('\r').unwrap_or(b))
        .unwrap_or(body);

    Scan::Fence {
        language: info.split_whitespace().next(),
        body,
        end,
    }
}

/// Start and end of the first backtick run of at least `min` after `from`.
fn closing_run(raw: &str, from: usize, min: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    loop {
        let start = pos + raw[pos..].find(FENCE)?;
        let end = start + backtick_run(raw, start);
        if end - start >= min {
            return Some((start, end));
        }
        pos = end;
    }
}
