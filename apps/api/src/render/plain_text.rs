//! Plain-text document backend: centered title block, underlined headings and
//! word-wrapped paragraphs at a fixed column width.

use crate::render::{Block, DocumentRenderer};

pub const DEFAULT_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct PlainTextRenderer {
    pub line_width: usize,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn name(&self) -> &'static str {
        "plain_text"
    }

    fn render_blocks(&self, blocks: &[Block]) -> String {
        let mut out: Vec<String> = Vec::new();

        for block in blocks {
            match block {
                Block::Title(text) | Block::Centered(text) => {
                    out.extend(
                        wrap_words(text, self.line_width)
                            .into_iter()
                            .map(|line| self.center(&line)),
                    );
                }
                Block::Heading(text) => {
                    if out.last().is_some_and(|l| !l.is_empty()) {
                        out.push(String::new());
                    }
                    out.push(text.clone());
                    out.push("=".repeat(text.chars().count()));
                }
                Block::Subheading(text) => out.push(text.clone()),
                Block::Paragraph(text) => out.extend(wrap_words(text, self.line_width)),
                Block::Bullet(text) => {
                    let wrapped = wrap_words(text, self.line_width.saturating_sub(2).max(1));
                    for (i, line) in wrapped.into_iter().enumerate() {
                        let marker = if i == 0 { "• " } else { "  " };
                        out.push(format!("{marker}{line}"));
                    }
                }
                Block::Spacer => out.push(String::new()),
            }
        }

        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

impl PlainTextRenderer {
    fn center(&self, line: &str) -> String {
        let len = line.chars().count();
        let pad = self.line_width.saturating_sub(len) / 2;
        format!("{}{}", " ".repeat(pad), line)
    }
}

/// Greedy word wrap by character count. Words longer than `width` get a line of their own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
