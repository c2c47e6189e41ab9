use crate::token::{is_raw_text_element, Attribute, Span, Token, TokenKind};
use crate::LexerError;

/// Lenient HTML scanner.
///
/// Tokenizes an HTML document or fragment into a flat token stream.
/// Recovery rules follow what browsers and lenient parsers accept:
/// - a `<` not followed by an ASCII letter, `/` or `!` is literal text
/// - tag names and attribute keys are lowercased, values kept verbatim
/// - `<style>`/`<script>` content is consumed as one raw text token up to
///   the matching close tag (or end of input)
///
/// Only constructs with no usable continuation point are errors:
/// unterminated comments, doctypes, quoted attribute values, and tags
/// still open at end of input.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.emit(TokenKind::Eof);
        Ok(())
    }

    /// Scan the next token, dispatching on the markup construct at the cursor.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        if self.peek() == '<' {
            let next = self.peek_next();
            if next == '!' {
                if self.lookahead_is("<!--") {
                    return self.scan_comment();
                }
                return self.scan_doctype();
            }
            if next == '/' {
                return self.scan_close_tag();
            }
            if next.is_ascii_alphabetic() {
                return self.scan_open_tag();
            }
        }

        self.scan_text()
    }

    // --- Scanners ---

    /// Scan a text run up to the next markup construct. A stray `<` that
    /// does not start a tag, comment or doctype is consumed as text.
    fn scan_text(&mut self) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let mut content = String::new();
        while !self.is_at_end() {
            if self.peek() == '<' {
                let next = self.peek_next();
                if next == '!' || next == '/' || next.is_ascii_alphabetic() {
                    break;
                }
            }
            content.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Text(content), span));
        Ok(())
    }

    /// Scan a `<!-- ... -->` comment. Content keeps its original spacing.
    fn scan_comment(&mut self) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        // consume `<!--`
        for _ in 0..4 {
            self.advance();
        }

        let mut content = String::new();
        while !self.is_at_end() && !self.lookahead_is("-->") {
            content.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated comment".into(),
                line: start_line,
                column: start_col,
            });
        }

        // consume `-->`
        for _ in 0..3 {
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Comment(content), span));
        Ok(())
    }

    /// Scan a `<!DOCTYPE ...>` declaration (anything `<!` that is not a comment).
    fn scan_doctype(&mut self) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        // consume `<!`
        self.advance();
        self.advance();

        let mut content = String::new();
        while !self.is_at_end() && self.peek() != '>' {
            content.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated doctype declaration".into(),
                line: start_line,
                column: start_col,
            });
        }

        self.advance(); // consume `>`

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Doctype(content), span));
        Ok(())
    }

    /// Scan a closing tag `</name ...>`. Anything between the name and `>`
    /// is discarded.
    fn scan_close_tag(&mut self) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        // consume `</`
        self.advance();
        self.advance();

        let name = self.scan_tag_name();

        while !self.is_at_end() && self.peek() != '>' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated closing tag".into(),
                line: start_line,
                column: start_col,
            });
        }

        self.advance(); // consume `>`

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::CloseTag(name), span));
        Ok(())
    }

    /// Scan an opening tag with its attribute list. Emits the tag token,
    /// then switches to raw-text scanning for `<style>`/`<script>`.
    fn scan_open_tag(&mut self) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        self.advance(); // consume `<`
        let name = self.scan_tag_name();
        let attributes = self.scan_attributes(start_line, start_col)?;

        let mut self_closing = false;
        if self.peek() == '/' {
            self_closing = true;
            self.advance();
        }

        if self.is_at_end() || self.peek() != '>' {
            return Err(LexerError {
                message: format!("Unterminated tag <{name}>"),
                line: start_line,
                column: start_col,
            });
        }
        self.advance(); // consume `>`

        let raw_content = !self_closing && is_raw_text_element(&name);
        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(
            TokenKind::OpenTag {
                name: name.clone(),
                attributes,
                self_closing,
            },
            span,
        ));

        if raw_content {
            self.scan_raw_text(&name)?;
        }

        Ok(())
    }

    /// Scan raw element content up to the matching close tag. Missing close
    /// tags consume the rest of the input as text.
    fn scan_raw_text(&mut self, tag: &str) -> Result<(), LexerError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let mut content = String::new();
        while !self.is_at_end() && !self.at_close_tag(tag) {
            content.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Text(content), span));
        Ok(())
    }

    /// Scan a tag name: leading ASCII letter, then letters, digits and `-`.
    /// Lowercased.
    fn scan_tag_name(&mut self) -> String {
        let mut name = String::new();
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_ascii_alphanumeric() || c == '-' {
                name.push(c.to_ascii_lowercase());
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    /// Scan the attribute list of an open tag, stopping before `>` or `/>`.
    fn scan_attributes(
        &mut self,
        tag_line: usize,
        tag_col: usize,
    ) -> Result<Vec<Attribute>, LexerError> {
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unterminated tag".into(),
                    line: tag_line,
                    column: tag_col,
                });
            }
            match self.peek() {
                '>' => break,
                '/' if self.peek_next() == '>' => break,
                // stray slash inside a tag
                '/' => self.advance(),
                _ => {
                    if let Some(attr) = self.scan_attribute()? {
                        attributes.push(attr);
                    }
                }
            }
        }

        Ok(attributes)
    }

    /// Scan one `key`, `key=value`, `key="value"` or `key='value'` attribute.
    /// Returns `None` for degenerate input (a value with no key).
    fn scan_attribute(&mut self) -> Result<Option<Attribute>, LexerError> {
        let mut key = String::new();
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_whitespace() || c == '=' || c == '>' || c == '/' {
                break;
            }
            key.push(c.to_ascii_lowercase());
            self.advance();
        }

        if key.is_empty() {
            // a lone `=` with no key; skip it and resynchronize
            self.advance();
            return Ok(None);
        }

        self.skip_whitespace();
        if self.is_at_end() || self.peek() != '=' {
            return Ok(Some(Attribute::new(key, None)));
        }

        self.advance(); // consume `=`
        self.skip_whitespace();
        if self.is_at_end() {
            return Err(self.error("Unterminated tag".into()));
        }

        let value = match self.peek() {
            '"' | '\'' => self.scan_quoted_value()?,
            _ => self.scan_bare_value(),
        };
        Ok(Some(Attribute::new(key, Some(value))))
    }

    /// Scan a quoted attribute value, either quote style. The content is
    /// kept verbatim; entities are not decoded.
    fn scan_quoted_value(&mut self) -> Result<String, LexerError> {
        let quote = self.peek();
        let start_line = self.line;
        let start_col = self.column;
        self.advance(); // consume opening quote

        let mut value = String::new();
        while !self.is_at_end() && self.peek() != quote {
            value.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated attribute value".into(),
                line: start_line,
                column: start_col,
            });
        }

        self.advance(); // consume closing quote
        Ok(value)
    }

    /// Scan an unquoted attribute value, ending at whitespace or `>`.
    fn scan_bare_value(&mut self) -> String {
        let mut value = String::new();
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_whitespace() || c == '>' {
                break;
            }
            value.push(c);
            self.advance();
        }
        value
    }

    // --- Helpers ---

    fn emit(&mut self, kind: TokenKind) {
        let span = Span::new(self.pos, self.pos, self.line, self.column);
        self.tokens.push(Token::new(kind, span));
    }

    /// True when the cursor sits on `</tag` (case-insensitive) followed by
    /// `>`, whitespace or end of input.
    fn at_close_tag(&self, tag: &str) -> bool {
        if self.peek() != '<' || self.peek_next() != '/' {
            return false;
        }
        let mut i = self.pos + 2;
        for expected in tag.chars() {
            match self.chars.get(i) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => i += 1,
                _ => return false,
            }
        }
        match self.chars.get(i) {
            Some(c) => *c == '>' || c.is_whitespace(),
            None => true,
        }
    }

    fn lookahead_is(&self, expected: &str) -> bool {
        expected
            .chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.chars[self.pos] == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper: tokenize and panic on error.
    fn tokens(source: &str) -> Vec<Token> {
        Scanner::tokenize(source).unwrap()
    }

    /// Helper: build an open tag kind without self-closing.
    fn open(name: &str, attributes: Vec<Attribute>) -> TokenKind {
        TokenKind::OpenTag {
            name: name.into(),
            attributes,
            self_closing: false,
        }
    }

    fn attr(key: &str, value: &str) -> Attribute {
        Attribute::new(key, Some(value.into()))
    }

    // =========================================================================
    // Structure: empty input, text runs
    // =========================================================================

    #[test]
    fn test_empty_source() {
        let toks = tokens("");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            kinds("hello"),
            vec![TokenKind::Text("hello".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_text_keeps_whitespace() {
        assert_eq!(
            kinds("  a \n b  "),
            vec![TokenKind::Text("  a \n b  ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        assert_eq!(
            kinds("1 < 2"),
            vec![TokenKind::Text("1 < 2".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_stray_bracket_before_tag() {
        assert_eq!(
            kinds("< <br>"),
            vec![
                TokenKind::Text("< ".into()),
                open("br", vec![]),
                TokenKind::Eof,
            ]
        );
    }

    // =========================================================================
    // Comments
    // =========================================================================

    #[test]
    fn test_comment() {
        assert_eq!(
            kinds("<!-- Container -->"),
            vec![TokenKind::Comment(" Container ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_empty_comment() {
        assert_eq!(
            kinds("<!---->"),
            vec![TokenKind::Comment("".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comment_with_inner_dashes() {
        assert_eq!(
            kinds("<!-- a - b -->"),
            vec![TokenKind::Comment(" a - b ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comment_between_tags() {
        assert_eq!(
            kinds("<div></div><!-- x --><div></div>"),
            vec![
                open("div", vec![]),
                TokenKind::CloseTag("div".into()),
                TokenKind::Comment(" x ".into()),
                open("div", vec![]),
                TokenKind::CloseTag("div".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let result = Scanner::tokenize("<!-- oops");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .message
            .contains("Unterminated comment"));
    }

    // =========================================================================
    // Doctype
    // =========================================================================

    #[test]
    fn test_doctype() {
        assert_eq!(
            kinds("<!DOCTYPE html>"),
            vec![TokenKind::Doctype("DOCTYPE html".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_doctype_then_element() {
        assert_eq!(
            kinds("<!DOCTYPE html><html>"),
            vec![
                TokenKind::Doctype("DOCTYPE html".into()),
                open("html", vec![]),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_doctype() {
        let result = Scanner::tokenize("<!DOCTYPE html");
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("Unterminated doctype"));
    }

    // =========================================================================
    // Open tags and attributes
    // =========================================================================

    #[test]
    fn test_open_tag_no_attributes() {
        assert_eq!(kinds("<div>"), vec![open("div", vec![]), TokenKind::Eof]);
    }

    #[test]
    fn test_tag_name_lowercased() {
        assert_eq!(kinds("<DIV>"), vec![open("div", vec![]), TokenKind::Eof]);
    }

    #[test]
    fn test_hyphenated_tag_name() {
        assert_eq!(
            kinds("<my-widget>"),
            vec![open("my-widget", vec![]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_double_quoted_attribute() {
        assert_eq!(
            kinds(r#"<div class="w-72 h-40">"#),
            vec![open("div", vec![attr("class", "w-72 h-40")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_single_quoted_attribute() {
        assert_eq!(
            kinds("<div class='bg-white'>"),
            vec![open("div", vec![attr("class", "bg-white")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_bare_attribute_value() {
        assert_eq!(
            kinds("<input type=text>"),
            vec![open("input", vec![attr("type", "text")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_boolean_attribute() {
        assert_eq!(
            kinds("<input disabled>"),
            vec![
                open("input", vec![Attribute::new("disabled", None)]),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_attribute_key_lowercased_value_kept() {
        assert_eq!(
            kinds(r#"<div CLASS="Foo Bar">"#),
            vec![open("div", vec![attr("class", "Foo Bar")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_multiple_attributes_keep_order() {
        assert_eq!(
            kinds(r#"<meta http-equiv="X-UA-Compatible" content="IE=edge">"#),
            vec![
                open(
                    "meta",
                    vec![
                        attr("http-equiv", "X-UA-Compatible"),
                        attr("content", "IE=edge"),
                    ]
                ),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(
            kinds(r#"<div class = "x">"#),
            vec![open("div", vec![attr("class", "x")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_attribute_value_with_angle_bracket() {
        assert_eq!(
            kinds(r#"<div title="a>b">"#),
            vec![open("div", vec![attr("title", "a>b")]), TokenKind::Eof]
        );
    }

    #[test]
    fn test_multiline_attribute_value() {
        assert_eq!(
            kinds("<i class=\"mdi\n  mdi-star\">"),
            vec![open("i", vec![attr("class", "mdi\n  mdi-star")]), TokenKind::Eof]
        );
    }

    // =========================================================================
    // Close tags and self-closing
    // =========================================================================

    #[test]
    fn test_close_tag() {
        assert_eq!(
            kinds("</div>"),
            vec![TokenKind::CloseTag("div".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_close_tag_lowercased() {
        assert_eq!(
            kinds("</DIV>"),
            vec![TokenKind::CloseTag("div".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_self_closing_tag() {
        let k = kinds("<br/>");
        assert_eq!(
            k,
            vec![
                TokenKind::OpenTag {
                    name: "br".into(),
                    attributes: vec![],
                    self_closing: true,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_self_closing_with_space() {
        let k = kinds(r#"<input value="x" />"#);
        assert_eq!(
            k,
            vec![
                TokenKind::OpenTag {
                    name: "input".into(),
                    attributes: vec![attr("value", "x")],
                    self_closing: true,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_nested_sequence() {
        assert_eq!(
            kinds("<div><span>hi</span></div>"),
            vec![
                open("div", vec![]),
                open("span", vec![]),
                TokenKind::Text("hi".into()),
                TokenKind::CloseTag("span".into()),
                TokenKind::CloseTag("div".into()),
                TokenKind::Eof,
            ]
        );
    }

    // =========================================================================
    // Raw text elements
    // =========================================================================

    #[test]
    fn test_style_content_is_raw_text() {
        assert_eq!(
            kinds("<style>a < b { color: red }</style>"),
            vec![
                open("style", vec![]),
                TokenKind::Text("a < b { color: red }".into()),
                TokenKind::CloseTag("style".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_script_content_is_raw_text() {
        assert_eq!(
            kinds("<script>if (a<b) { go() }</script>"),
            vec![
                open("script", vec![]),
                TokenKind::Text("if (a<b) { go() }".into()),
                TokenKind::CloseTag("script".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_raw_text_close_tag_case_insensitive() {
        assert_eq!(
            kinds("<style>x</STYLE>"),
            vec![
                open("style", vec![]),
                TokenKind::Text("x".into()),
                TokenKind::CloseTag("style".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_raw_text_ignores_inner_tags() {
        assert_eq!(
            kinds("<style><div></div></style>"),
            vec![
                open("style", vec![]),
                TokenKind::Text("<div></div>".into()),
                TokenKind::CloseTag("style".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_raw_text_missing_close_runs_to_end() {
        assert_eq!(
            kinds("<style>body {}"),
            vec![
                open("style", vec![]),
                TokenKind::Text("body {}".into()),
                TokenKind::Eof,
            ]
        );
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_unterminated_tag() {
        let result = Scanner::tokenize("<div class=\"x\"");
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("Unterminated"));
    }

    #[test]
    fn test_unterminated_attribute_value() {
        let result = Scanner::tokenize("<div class=\"x");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .message
            .contains("Unterminated attribute value"));
    }

    #[test]
    fn test_unterminated_close_tag() {
        let result = Scanner::tokenize("</div");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .message
            .contains("Unterminated closing tag"));
    }

    // =========================================================================
    // Span tracking
    // =========================================================================

    #[test]
    fn test_span_line_column() {
        let toks = tokens("hi\n<div>");
        assert_eq!(toks[0].span.line, 1);
        assert_eq!(toks[0].span.column, 1);
        let div = toks
            .iter()
            .find(|t| matches!(t.kind, TokenKind::OpenTag { .. }))
            .unwrap();
        assert_eq!(div.span.line, 2);
        assert_eq!(div.span.column, 1);
    }

    #[test]
    fn test_error_position_points_at_construct() {
        let err = Scanner::tokenize("text\n<!-- open").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 1);
    }
}
