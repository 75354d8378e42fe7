// SPDX-License-Identifier: MPL-2.0
//! Inline markup used in notification bodies.
//!
//! Bodies carry a small tag set: `<strong>`, `<small>`, `<code>` and `<br>`.
//! Newlines also break lines. Unknown tags are dropped and their content is
//! kept as plain text.

/// Styling flags active for a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub small: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

/// One visual line of spans.
pub type Line = Vec<Span>;

/// Splits markup into lines of styled spans.
#[must_use]
pub fn parse(markup: &str) -> Vec<Line> {
    let mut lines: Vec<Line> = vec![Vec::new()];
    let mut style = SpanStyle::default();
    let mut depth = Depth::default();
    let mut buffer = String::new();
    let mut rest = markup;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('<') {
            if let Some(end) = after.find('>') {
                flush(&mut lines, &mut buffer, style);
                let tag = after[..end].trim().to_ascii_lowercase();
                rest = &after[end + 1..];
                match tag.trim_end_matches('/').trim() {
                    "br" => lines.push(Vec::new()),
                    "strong" | "b" => depth.strong += 1,
                    "/strong" | "/b" => depth.strong = depth.strong.saturating_sub(1),
                    "small" => depth.small += 1,
                    "/small" => depth.small = depth.small.saturating_sub(1),
                    "code" => depth.code += 1,
                    "/code" => depth.code = depth.code.saturating_sub(1),
                    _ => {}
                }
                style = depth.style();
                continue;
            }
        }

        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        rest = chars.as_str();
        match c {
            '\n' => {
                flush(&mut lines, &mut buffer, style);
                lines.push(Vec::new());
            }
            '&' => {
                let (decoded, remaining) = decode_entity(rest);
                buffer.push(decoded);
                rest = remaining;
            }
            _ => buffer.push(c),
        }
    }
    flush(&mut lines, &mut buffer, style);
    lines
}

/// Plain text rendition: tags removed, line breaks as `\n`.
#[must_use]
pub fn plain_text(markup: &str) -> String {
    parse(markup)
        .iter()
        .map(|line| line.iter().map(|span| span.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct Depth {
    strong: u32,
    small: u32,
    code: u32,
}

impl Depth {
    fn style(&self) -> SpanStyle {
        SpanStyle {
            strong: self.strong > 0,
            small: self.small > 0,
            code: self.code > 0,
        }
    }
}

fn flush(lines: &mut [Line], buffer: &mut String, style: SpanStyle) {
    if buffer.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(Span {
            text: std::mem::take(buffer),
            style,
        });
    }
}

fn decode_entity(rest: &str) -> (char, &str) {
    const ENTITIES: [(&str, char); 5] = [
        ("amp;", '&'),
        ("lt;", '<'),
        ("gt;", '>'),
        ("quot;", '"'),
        ("#39;", '\''),
    ];
    for (name, decoded) in ENTITIES {
        if let Some(remaining) = rest.strip_prefix(name) {
            return (decoded, remaining);
        }
    }
    ('&', rest)
}
