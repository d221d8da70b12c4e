//! Recursive-descent parser working directly on characters.

use super::{Node, ParseTree, SyntaxError, is_delimiter, is_rule_name};

/// Parses CV source text.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the text is not well formed or contains no
/// `cv` block.
pub fn parse(source: &str) -> Result<ParseTree, SyntaxError> {
    let mut parser = Parser::new(source);
    let mut cvs = Vec::new();

    loop {
        parser.skip_trivia();
        if parser.is_eof() {
            break;
        }
        let line = parser.line;
        if parser.peek() == Some('}') {
            return Err(SyntaxError::new(line, "unexpected `}`"));
        }
        let rule = parser.rule_name()?;
        if rule != "cv" {
            return Err(SyntaxError::new(
                line,
                format!("expected a `cv` block, found `{rule}`"),
            ));
        }
        cvs.push(parser.block(rule, line)?);
    }

    ParseTree::new(cvs).ok_or_else(|| SyntaxError::new(parser.line, "no `cv` block found"))
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    const fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Whether only whitespace precedes the cursor on the current line.
    fn at_line_start(&self) -> bool {
        self.source[..self.pos]
            .rsplit('\n')
            .next()
            .is_none_or(|tail| tail.trim().is_empty())
    }

    /// Skips whitespace and comment lines.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            }
            if !(self.rest().starts_with("//") && self.at_line_start()) {
                return;
            }
            while self.peek().is_some_and(|c| c != '\n') {
                self.bump();
            }
        }
    }

    fn rule_name(&mut self) -> Result<&'a str, SyntaxError> {
        let start = self.pos;
        let line = self.line;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !is_delimiter(c))
        {
            self.bump();
        }
        let word = &self.source[start..self.pos];

        if is_rule_name(word) {
            return Ok(word);
        }
        let found = if word.is_empty() {
            match self.peek() {
                Some('"') => {
                    self.skip_string()?;
                    "`\"`".to_owned()
                }
                Some(c) => format!("`{c}`"),
                None => "end of input".to_owned(),
            }
        } else {
            format!("`{word}`")
        };
        Err(SyntaxError::new(
            line,
            format!("expected a rule name, found {found}"),
        ))
    }

    /// Parses a block body. The rule name has already been consumed.
    fn block(&mut self, rule: &str, line: usize) -> Result<Node, SyntaxError> {
        self.skip_trivia();
        let mut node = Node::new(rule, line);
        if self.peek() != Some('{') {
            node = node.with_value(self.scan_value(rule, '{')?);
        }
        self.bump();

        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(node);
                }
                None => {
                    return Err(SyntaxError::new(
                        self.line,
                        format!("unclosed block `{rule}` opened on line {line}"),
                    ));
                }
                Some(_) => {
                    let child_line = self.line;
                    let name = self.rule_name()?;
                    self.skip_trivia();
                    if self.peek() == Some(':') {
                        self.bump();
                        let value = self.scan_value(name, ';')?;
                        self.bump();
                        node.push(Node::new(name, child_line).with_value(value));
                    } else {
                        node.push(self.block(name, child_line)?);
                    }
                }
            }
        }
    }

    /// Scans a raw value up to, not including, `terminator`.
    ///
    /// Comment lines may only follow the value, never split it.
    fn scan_value(&mut self, rule: &str, terminator: char) -> Result<&'a str, SyntaxError> {
        let start = self.pos;
        let start_line = self.line;
        let mut end = None;

        loop {
            if self.rest().starts_with("//") && self.at_line_start() {
                let comment_line = self.line;
                end = Some(self.pos);
                self.skip_trivia();
                match self.peek() {
                    Some(c) if c == terminator => break,
                    Some(_) => {
                        return Err(SyntaxError::new(
                            comment_line,
                            format!("comment inside value of `{rule}`"),
                        ));
                    }
                    None => {}
                }
            }
            match self.peek() {
                Some(c) if c == terminator => break,
                Some('"') => self.skip_string()?,
                Some(c @ ('{' | '}' | ';')) => {
                    return Err(SyntaxError::new(
                        self.line,
                        format!("unexpected `{c}` in value of `{rule}`"),
                    ));
                }
                Some('\n') if terminator == ';' => {
                    return Err(SyntaxError::new(
                        self.line,
                        format!("expected `;` after value of `{rule}`"),
                    ));
                }
                Some(_) => {
                    self.bump();
                }
                None => {
                    return Err(SyntaxError::new(
                        self.line,
                        format!("expected `{terminator}` after `{rule}`"),
                    ));
                }
            }
        }

        let value = self.source[start..end.unwrap_or(self.pos)].trim();
        if value.is_empty() {
            return Err(SyntaxError::new(
                start_line,
                format!("missing value for `{rule}`"),
            ));
        }
        Ok(value)
    }

    fn skip_string(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '"' => return Ok(()),
                '\\' => {
                    self.bump();
                }
                _ => {}
            }
        }
        Err(SyntaxError::new(line, "unterminated string"))
    }
}
