//! Lexer implementation. Never fails: unterminated quotes and regexes
//! simply consume to end of input, and every unrecognized run of
//! characters becomes a `Word`.

use super::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokenize `source` into a sequence of tokens terminated by `Eof`.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

fn is_special(c: char) -> bool {
    matches!(c, ':' | '(' | ')' | '-' | '!' | '<' | '>' | '=' | '"' | '/')
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            pos: 0,
        }
    }

    fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let start = self.pos;

            let kind = match self.peek_char() {
                None => TokenKind::Eof,
                Some(':') => {
                    self.advance();
                    TokenKind::Colon
                }
                Some('(') => {
                    self.advance();
                    TokenKind::LParen
                }
                Some(')') => {
                    self.advance();
                    TokenKind::RParen
                }
                Some('-') => {
                    self.advance();
                    TokenKind::Dash
                }
                Some('=') => {
                    self.advance();
                    TokenKind::Eq
                }
                Some('!') => {
                    self.advance();
                    if self.peek_char() == Some('=') {
                        self.advance();
                        TokenKind::Neq
                    } else {
                        TokenKind::Bang
                    }
                }
                Some('<') => {
                    self.advance();
                    if self.peek_char() == Some('=') {
                        self.advance();
                        TokenKind::Lte
                    } else {
                        TokenKind::Lt
                    }
                }
                Some('>') => {
                    self.advance();
                    if self.peek_char() == Some('=') {
                        self.advance();
                        TokenKind::Gte
                    } else {
                        TokenKind::Gt
                    }
                }
                Some('"') => self.scan_quoted('"'),
                Some('\'') => self.scan_quoted('\''),
                Some('/') => self.scan_regex(),
                Some(_) => self.scan_word(),
            };

            let end = self.pos;
            let is_eof = matches!(kind, TokenKind::Eof);

            if let TokenKind::Word(ref w) = kind {
                if w.eq_ignore_ascii_case("or") {
                    tokens.push(Token::new(TokenKind::Or, start, end));
                    continue;
                }
            }

            tokens.push(Token::new(kind, start, end));
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Scan a word: a contiguous run of non-whitespace, non-special characters.
    /// Apostrophes are word characters here (`can't`), never quote delimiters —
    /// only a *leading* quote character dispatches to `scan_quoted`.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || is_special(c) {
                break;
            }
            self.advance();
        }
        TokenKind::Word(self.source[start..self.pos].to_string())
    }

    /// Scan a quoted string. The other quote character may appear unescaped
    /// inside. Unterminated input consumes to end of source.
    fn scan_quoted(&mut self, quote: char) -> TokenKind {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => break,
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        TokenKind::Quoted(value)
    }

    /// Scan a `/pattern/` regex literal. `\/` is the only recognized escape
    /// (a literal slash that does not close the regex); any other backslash
    /// sequence is preserved verbatim for the downstream regex engine.
    fn scan_regex(&mut self) -> TokenKind {
        self.advance(); // opening slash
        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => break,
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some('/') => {
                            value.push('/');
                            self.advance();
                        }
                        Some(c) => {
                            value.push('\\');
                            value.push(c);
                            self.advance();
                        }
                        None => value.push('\\'),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        TokenKind::Regex(value)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((i, c)) = self.chars.next() {
            self.pos = i + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn always_ends_in_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
    }

    #[test]
    fn operators_are_greedy() {
        assert_eq!(
            kinds("pow>=3"),
            vec![
                TokenKind::Word("pow".into()),
                TokenKind::Gte,
                TokenKind::Word("3".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("t!=instant"),
            vec![
                TokenKind::Word("t".into()),
                TokenKind::Neq,
                TokenKind::Word("instant".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn apostrophe_stays_inside_word() {
        assert_eq!(
            kinds("can't"),
            vec![TokenKind::Word("can't".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn leading_quote_opens_string() {
        assert_eq!(
            kinds("'lightning bolt'"),
            vec![TokenKind::Quoted("lightning bolt".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(
            kinds("\"lightning"),
            vec![TokenKind::Quoted("lightning".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_regex_runs_to_end() {
        assert_eq!(
            kinds("/deals \\d+"),
            vec![TokenKind::Regex("deals \\d+".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn escaped_slash_in_regex() {
        assert_eq!(
            kinds("/a\\/b/"),
            vec![TokenKind::Regex("a/b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn or_is_case_insensitive() {
        assert_eq!(kinds("OR"), vec![TokenKind::Or, TokenKind::Eof]);
        assert_eq!(kinds("or"), vec![TokenKind::Or, TokenKind::Eof]);
    }

    #[test]
    fn spans_slice_back_to_source() {
        let src = "t:creature";
        let tokens = lex(src);
        assert_eq!(&src[tokens[0].start..tokens[0].end], "t");
        assert_eq!(&src[tokens[1].start..tokens[1].end], ":");
        assert_eq!(&src[tokens[2].start..tokens[2].end], "creature");
    }
}
