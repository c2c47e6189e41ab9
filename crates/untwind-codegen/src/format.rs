//! Output pretty-printers.
//!
//! `format_css` re-tokenizes the compact stylesheet the emitter produced
//! and lays it out one construct per line: selectors keep their `{` on
//! the same line, blocks indent one level, a deliberate source newline
//! between declarations becomes a blank line, and rule blocks separate
//! with a blank line. Colons in declarations get a single trailing space,
//! which also splits `@apply` variant tokens; `postprocess` repairs those
//! afterwards.
//!
//! `format_markup` re-indents the markup emitter's line-oriented output
//! from a stack of open tags, keeping blank lines up to a cap and forcing
//! one above `<head>`, `<body>` and `</html>`.

use crate::options::FormatterOptions;

// =========================================================================
// Stylesheet formatter
// =========================================================================

#[derive(Debug, PartialEq)]
enum CssToken {
    /// `/* ... */`, stored verbatim.
    Comment(String),
    /// `// ...` to end of line, stored verbatim.
    LineComment(String),
    /// Text flushed by an `{`.
    Selector(String),
    /// Text flushed by a `;` (kept) or a bare run before `}`.
    Declaration(String),
    OpenBrace,
    CloseBrace,
}

struct RawToken {
    token: CssToken,
    /// Source newlines seen since the previous token.
    newlines_before: usize,
}

struct CssTokenizer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<RawToken>,
    pending_newlines: usize,
    buffer: String,
}

impl CssTokenizer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
            pending_newlines: 0,
            buffer: String::new(),
        }
    }

    fn run(mut self) -> Vec<RawToken> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];

            if c == '/' && self.peek(1) == Some('*') {
                self.flush_declaration();
                let text = self.scan_block_comment();
                self.emit(CssToken::Comment(text));
                continue;
            }
            // Only a line start can open a line comment; `//` inside a
            // declaration (think url(http://...)) is content
            if c == '/' && self.peek(1) == Some('/') && self.buffer.is_empty() {
                let text = self.scan_line_comment();
                self.emit(CssToken::LineComment(text));
                continue;
            }

            match c {
                '{' => {
                    self.pos += 1;
                    let text = self.take_buffer();
                    if !text.is_empty() {
                        self.emit(CssToken::Selector(text));
                    }
                    self.emit(CssToken::OpenBrace);
                }
                '}' => {
                    self.pos += 1;
                    self.flush_declaration();
                    self.emit(CssToken::CloseBrace);
                }
                ';' => {
                    self.pos += 1;
                    let mut text = self.take_buffer();
                    text.push(';');
                    self.emit(CssToken::Declaration(text));
                }
                '\n' => {
                    self.pos += 1;
                    if self.buffer.is_empty() {
                        self.pending_newlines += 1;
                    } else if !self.buffer.ends_with(' ') {
                        self.buffer.push(' ');
                    }
                }
                c if c.is_whitespace() => {
                    self.pos += 1;
                    if !self.buffer.is_empty() && !self.buffer.ends_with(' ') {
                        self.buffer.push(' ');
                    }
                }
                _ => {
                    self.pos += 1;
                    self.buffer.push(c);
                }
            }
        }
        self.flush_declaration();
        self.tokens
    }

    fn emit(&mut self, token: CssToken) {
        let newlines_before = std::mem::take(&mut self.pending_newlines);
        self.tokens.push(RawToken {
            token,
            newlines_before,
        });
    }

    fn take_buffer(&mut self) -> String {
        let text = self.buffer.trim_end().to_string();
        self.buffer.clear();
        text
    }

    fn flush_declaration(&mut self) {
        let text = self.take_buffer();
        if !text.is_empty() {
            self.emit(CssToken::Declaration(text));
        }
    }

    fn scan_block_comment(&mut self) -> String {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.chars.len() {
            if self.chars[self.pos] == '*' && self.peek(1) == Some('/') {
                self.pos += 2;
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn scan_line_comment(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.chars.len() && self.chars[self.pos] != '\n' {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }
}

/// Pretty-print the stylesheet emitter's compact output.
pub fn format_css(source: &str, options: &FormatterOptions) -> String {
    let tokens = CssTokenizer::new(source).run();
    let indent = options.indent();
    let cap = options.max_preserve_newlines.max(1);

    let mut out = String::new();
    let mut depth: usize = 0;
    let mut previous: Option<&CssToken> = None;

    for raw in &tokens {
        match &raw.token {
            CssToken::OpenBrace => {
                out.push_str(" {");
                depth += 1;
                previous = Some(&raw.token);
            }
            CssToken::CloseBrace => {
                depth = depth.saturating_sub(1);
                if previous.is_some() {
                    out.push('\n');
                    push_indent(&mut out, &indent, depth);
                }
                out.push('}');
                previous = Some(&raw.token);
            }
            token => {
                if let Some(prev) = previous {
                    let structural =
                        structural_newlines(prev, token, raw.newlines_before, options);
                    let preserved = if options.preserve_newlines {
                        raw.newlines_before.min(cap)
                    } else {
                        0
                    };
                    for _ in 0..structural.max(preserved) {
                        out.push('\n');
                    }
                    push_indent(&mut out, &indent, depth);
                }
                match token {
                    CssToken::Declaration(text) => out.push_str(&normalize_declaration(text)),
                    CssToken::Comment(text)
                    | CssToken::LineComment(text)
                    | CssToken::Selector(text) => out.push_str(text),
                    CssToken::OpenBrace | CssToken::CloseBrace => {}
                }
                previous = Some(token);
            }
        }
    }

    if options.end_with_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Line breaks demanded by the construct pair itself, independent of any
/// blank lines the source carried.
fn structural_newlines(
    previous: &CssToken,
    current: &CssToken,
    raw_newlines: usize,
    options: &FormatterOptions,
) -> usize {
    match current {
        CssToken::Selector(_) => {
            if options.newline_between_rules && matches!(previous, CssToken::CloseBrace) {
                2
            } else {
                1
            }
        }
        // A deliberate line break between declaration runs reads as a
        // paragraph break
        CssToken::Declaration(_) => {
            if options.preserve_newlines
                && raw_newlines > 0
                && matches!(previous, CssToken::Declaration(_))
            {
                2
            } else {
                1
            }
        }
        CssToken::Comment(_) | CssToken::LineComment(_) => {
            if matches!(previous, CssToken::Declaration(_) | CssToken::CloseBrace) {
                2
            } else {
                1
            }
        }
        CssToken::OpenBrace | CssToken::CloseBrace => 1,
    }
}

/// One space after every top-level colon, none before. Colons inside
/// parentheses (URLs, functional values) are untouched.
fn normalize_declaration(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => {
                depth += 1;
                out.push(c);
                i += 1;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                out.push(c);
                i += 1;
            }
            ':' if depth == 0 => {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push(':');
                i += 1;
                while i < chars.len() && chars[i] == ' ' {
                    i += 1;
                }
                if i < chars.len() && chars[i] != ';' {
                    out.push(' ');
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn push_indent(out: &mut String, indent: &str, depth: usize) {
    for _ in 0..depth {
        out.push_str(indent);
    }
}

// =========================================================================
// Markup formatter
// =========================================================================

enum LineKind {
    /// Opening tag that stays open past this line.
    Open(String),
    Close(String),
    /// Comment, text, void, or single-line element.
    Flat,
}

/// Re-indent the markup emitter's line-oriented output.
pub fn format_markup(source: &str, options: &FormatterOptions) -> String {
    let indent = options.indent();
    let max_blank_lines = options.max_preserve_newlines.max(1) - 1;

    let mut out = String::new();
    let mut stack: Vec<String> = Vec::new();
    let mut pending_blanks = 0usize;
    let mut first = true;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            pending_blanks += 1;
            continue;
        }

        let kind = classify_line(line);

        if let LineKind::Close(tag) = &kind {
            if let Some(position) = stack.iter().rposition(|open| open == tag) {
                stack.truncate(position);
            }
        }

        let mut blanks = if options.preserve_newlines {
            pending_blanks.min(max_blank_lines)
        } else {
            0
        };
        if !first && is_extra_liner(line) {
            blanks = blanks.max(1);
        }
        pending_blanks = 0;

        if !first {
            out.push('\n');
            for _ in 0..blanks {
                out.push('\n');
            }
        }

        let depth = if options.indent_inner_html {
            stack.len()
        } else {
            // The <html> wrapper does not contribute an indent level
            stack.iter().filter(|tag| tag.as_str() != "html").count()
        };
        for _ in 0..depth {
            out.push_str(&indent);
        }
        out.push_str(line);

        if let LineKind::Open(tag) = kind {
            stack.push(tag);
        }
        first = false;
    }

    if options.end_with_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

fn classify_line(line: &str) -> LineKind {
    if let Some(rest) = line.strip_prefix("</") {
        return LineKind::Close(tag_name_of(rest));
    }
    if !line.starts_with('<') || line.starts_with("<!--") {
        return LineKind::Flat;
    }
    if line.ends_with("/>") || line.contains("</") {
        return LineKind::Flat;
    }
    match line.strip_prefix('<') {
        Some(rest) => LineKind::Open(tag_name_of(rest)),
        None => LineKind::Flat,
    }
}

fn tag_name_of(rest: &str) -> String {
    rest.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Tags that always get a blank line above them.
fn is_extra_liner(line: &str) -> bool {
    if let Some(rest) = line.strip_prefix("</") {
        return tag_name_of(rest) == "html";
    }
    match line.strip_prefix('<') {
        Some(rest) => {
            let tag = tag_name_of(rest);
            tag == "head" || tag == "body"
        }
        None => false,
    }
}
