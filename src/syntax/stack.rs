//! Token-driven parser with an explicit stack of open blocks.
//!
//! The source is split into tokens first. Rule names are then shifted onto a
//! stack and a block is reduced into its parent when its closing brace
//! arrives.

use super::{Node, ParseTree, SyntaxError, is_delimiter, is_rule_name};

/// Parses CV source text.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the text is not well formed or contains no
/// `cv` block.
pub fn parse(source: &str) -> Result<ParseTree, SyntaxError> {
    let (tokens, eof_line) = tokenize(source);
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        eof_line,
    };

    let mut open: Vec<Node> = Vec::new();
    let mut cvs = Vec::new();

    while let Some(token) = parser.advance() {
        match token.kind {
            Kind::Close => {
                let node = open
                    .pop()
                    .ok_or_else(|| SyntaxError::new(token.line, "unexpected `}`"))?;
                match open.last_mut() {
                    Some(parent) => parent.push(node),
                    None => cvs.push(node),
                }
            }
            Kind::Word if is_rule_name(parser.text(token)) => {
                let name = parser.text(token);
                if open.is_empty() && name != "cv" {
                    return Err(SyntaxError::new(
                        token.line,
                        format!("expected a `cv` block, found `{name}`"),
                    ));
                }

                // top-level `cv` is always a block, so `cv: x;` fails as a label
                let is_field = !open.is_empty()
                    && parser.peek().is_some_and(|next| next.kind == Kind::Colon);

                if is_field {
                    let colon = parser.advance().unwrap_or(token);
                    let value = parser.value(name, colon, Kind::Semi)?;
                    if let Some(parent) = open.last_mut() {
                        parent.push(Node::new(name, token.line).with_value(value));
                    }
                } else {
                    let mut node = Node::new(name, token.line);
                    if parser.peek().is_some_and(|next| next.kind == Kind::Open) {
                        parser.advance();
                    } else {
                        node = node.with_value(parser.value(name, token, Kind::Open)?);
                    }
                    open.push(node);
                }
            }
            Kind::Unterminated => {
                return Err(SyntaxError::new(token.line, "unterminated string"));
            }
            kind => {
                let found = match kind {
                    Kind::Word => parser.text(token),
                    _ => kind.symbol(),
                };
                return Err(SyntaxError::new(
                    token.line,
                    format!("expected a rule name, found `{found}`"),
                ));
            }
        }
    }

    if let Some(node) = open.last() {
        return Err(SyntaxError::new(
            parser.eof_line,
            format!(
                "unclosed block `{}` opened on line {}",
                node.rule(),
                node.line()
            ),
        ));
    }

    ParseTree::new(cvs).ok_or_else(|| SyntaxError::new(parser.eof_line, "no `cv` block found"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Word,
    Str,
    /// A string still open at end of input.
    Unterminated,
    Colon,
    Semi,
    Open,
    Close,
}

impl Kind {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Str | Self::Unterminated => "\"",
            Self::Colon => ":",
            Self::Semi => ";",
            Self::Open => "{",
            Self::Close => "}",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: Kind,
    start: usize,
    end: usize,
    line: usize,
    end_line: usize,
    /// Line of the first comment skipped right before this token.
    comment_line: Option<usize>,
}

/// Splits `source` into tokens. Also returns the line the input ends on.
fn tokenize(source: &str) -> (Vec<Token>, usize) {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1;
    let mut line_start = true;
    let mut comment_line = None;

    while let Some(&(start, c)) = chars.peek() {
        if c == '\n' {
            line += 1;
            line_start = true;
            chars.next();
            continue;
        }
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if line_start && source[start..].starts_with("//") {
            comment_line.get_or_insert(line);
            while chars.next_if(|&(_, c)| c != '\n').is_some() {}
            continue;
        }
        line_start = false;

        let token_line = line;
        let (kind, end) = match c {
            '"' => {
                chars.next();
                let mut end = None;
                while let Some((i, c)) = chars.next() {
                    match c {
                        '"' => {
                            end = Some(i + 1);
                            break;
                        }
                        '\\' => {
                            if let Some((_, '\n')) = chars.next() {
                                line += 1;
                            }
                        }
                        '\n' => line += 1,
                        _ => {}
                    }
                }
                end.map_or((Kind::Unterminated, source.len()), |end| (Kind::Str, end))
            }
            ':' | ';' | '{' | '}' => {
                chars.next();
                let kind = match c {
                    ':' => Kind::Colon,
                    ';' => Kind::Semi,
                    '{' => Kind::Open,
                    _ => Kind::Close,
                };
                (kind, start + 1)
            }
            _ => {
                let mut end = start;
                while let Some((i, c)) =
                    chars.next_if(|&(_, c)| !c.is_whitespace() && !is_delimiter(c))
                {
                    end = i + c.len_utf8();
                }
                (Kind::Word, end)
            }
        };

        tokens.push(Token {
            kind,
            start,
            end,
            line: token_line,
            end_line: line,
            comment_line: comment_line.take(),
        });
    }

    (tokens, line)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    eof_line: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn text(&self, token: Token) -> &'a str {
        &self.source[token.start..token.end]
    }

    /// Reduces the tokens up to `until` into one raw value and consumes the
    /// terminator. `after` is the token the value follows.
    fn value(&mut self, rule: &str, after: Token, until: Kind) -> Result<&'a str, SyntaxError> {
        let mut first = None;
        let mut last = after;

        loop {
            let Some(token) = self.advance() else {
                return Err(SyntaxError::new(
                    self.eof_line,
                    format!("expected `{}` after `{rule}`", until.symbol()),
                ));
            };
            // a field value ends on its own line, terminator included
            if until == Kind::Semi && token.line > last.end_line {
                return Err(SyntaxError::new(
                    last.end_line,
                    format!("expected `;` after value of `{rule}`"),
                ));
            }
            if token.kind == until {
                break;
            }
            if let (Some(line), Some(_)) = (token.comment_line, first) {
                return Err(SyntaxError::new(
                    line,
                    format!("comment inside value of `{rule}`"),
                ));
            }
            match token.kind {
                Kind::Unterminated => {
                    return Err(SyntaxError::new(token.line, "unterminated string"));
                }
                Kind::Open | Kind::Close | Kind::Semi => {
                    return Err(SyntaxError::new(
                        token.line,
                        format!("unexpected `{}` in value of `{rule}`", token.kind.symbol()),
                    ));
                }
                Kind::Word | Kind::Str | Kind::Colon => {}
            }
            first.get_or_insert(token);
            last = token;
        }

        first.map_or_else(
            || {
                Err(SyntaxError::new(
                    after.end_line,
                    format!("missing value for `{rule}`"),
                ))
            },
            |first| Ok(&self.source[first.start..last.end]),
        )
    }
}
