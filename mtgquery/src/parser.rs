//! §4.2 recursive-descent parser. Never fails: malformed fragments become
//! `Ast::Nop` or best-effort nodes rather than a parse error. Field-name
//! canonicalization and value interpretation are deferred to evaluation
//! time — the parser only records what the user literally typed.

use crate::ast::{Ast, Operator, Span};
use crate::lexer::{lex, Token, TokenKind};

pub fn parse(source: &str) -> Ast {
    let tokens = lex(source);
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_expr()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

fn operator_for(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Colon => Some(Operator::Colon),
        TokenKind::Eq => Some(Operator::Eq),
        TokenKind::Neq => Some(Operator::Neq),
        TokenKind::Lt => Some(Operator::Lt),
        TokenKind::Gt => Some(Operator::Gt),
        TokenKind::Lte => Some(Operator::Lte),
        TokenKind::Gte => Some(Operator::Gte),
        _ => None,
    }
}

fn is_and_group_terminator(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Eof | TokenKind::RParen | TokenKind::Or)
}

fn can_start_atom(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen | TokenKind::Word(_) | TokenKind::Quoted(_) | TokenKind::Regex(_)
    )
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    // expr := or_group
    fn parse_expr(&mut self) -> Ast {
        self.parse_or_group()
    }

    // or_group := and_group ( OR and_group )*
    fn parse_or_group(&mut self) -> Ast {
        let mut children = vec![self.parse_and_group()];
        let mut saw_or = false;
        while matches!(self.peek().kind, TokenKind::Or) {
            saw_or = true;
            self.advance();
            children.push(self.parse_and_group());
        }
        if !saw_or {
            return children.into_iter().next().unwrap();
        }
        let span = cover_children(&children);
        Ast::Or { children, span }
    }

    // and_group := term*
    fn parse_and_group(&mut self) -> Ast {
        let mut children = Vec::new();
        loop {
            if is_and_group_terminator(&self.peek().kind) {
                break;
            }
            let before = self.pos;
            children.push(self.parse_term());
            if self.pos == before {
                // Guard against a stray token nothing above consumed.
                self.advance();
            }
        }
        match children.len() {
            0 => Ast::Nop,
            1 => children.into_iter().next().unwrap(),
            _ => {
                let span = cover_children(&children);
                Ast::And { children, span }
            }
        }
    }

    // term := DASH atom? | BANG (WORD|QUOTED)? | atom
    fn parse_term(&mut self) -> Ast {
        match self.peek().kind {
            TokenKind::Dash => self.parse_not(),
            TokenKind::Bang => self.parse_exact(),
            _ => self.parse_atom(),
        }
    }

    fn parse_not(&mut self) -> Ast {
        let dash = self.advance();
        if !can_start_atom(&self.peek().kind) {
            return Ast::Nop;
        }
        let child = self.parse_atom();
        let child_span = child.span().unwrap_or(Span::new(dash.start, dash.end));
        let span = Span::cover(Span::new(dash.start, dash.end), child_span);
        Ast::Not {
            child: Box::new(child),
            span,
        }
    }

    fn parse_exact(&mut self) -> Ast {
        let bang = self.advance();
        match &self.peek().kind {
            TokenKind::Word(_) | TokenKind::Quoted(_) => {
                let tok = self.advance();
                let value = tok.text().unwrap_or_default().to_string();
                let span = Span::new(bang.start, tok.end);
                Ast::Exact { value, span }
            }
            _ => Ast::Exact {
                value: String::new(),
                span: Span::new(bang.start, bang.end),
            },
        }
    }

    // atom := LPAREN expr RPAREN?
    //       | WORD op (WORD|QUOTED|REGEX)?
    //       | WORD
    //       | QUOTED
    //       | REGEX
    fn parse_atom(&mut self) -> Ast {
        match &self.peek().kind {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                if matches!(self.peek().kind, TokenKind::RParen) {
                    self.advance();
                }
                // Unclosed `(` just stops; either way the inner expression is
                // returned unwrapped — parens only affect grouping.
                inner
            }
            TokenKind::Word(_) => self.parse_word_atom(),
            TokenKind::Quoted(_) => {
                let tok = self.advance();
                let value = tok.text().unwrap_or_default().to_string();
                Ast::Bare {
                    value,
                    quoted: true,
                    span: Span::new(tok.start, tok.end),
                }
            }
            TokenKind::Regex(_) => self.parse_bare_regex(),
            _ => {
                // A stray operator/RParen/etc where a term was expected.
                self.advance();
                Ast::Nop
            }
        }
    }

    fn parse_word_atom(&mut self) -> Ast {
        let word_tok = self.advance();
        let field = match &word_tok.kind {
            TokenKind::Word(s) => s.clone(),
            _ => unreachable!(),
        };

        let operator = operator_for(&self.peek().kind);
        let Some(operator) = operator else {
            return Ast::Bare {
                value: field,
                quoted: false,
                span: Span::new(word_tok.start, word_tok.end),
            };
        };
        let op_tok = self.advance();

        match &self.peek().kind {
            TokenKind::Word(_) | TokenKind::Quoted(_) => {
                let val_tok = self.advance();
                let value = val_tok.text().unwrap_or_default().to_string();
                Ast::Field {
                    field,
                    operator,
                    value,
                    span: Span::new(word_tok.start, val_tok.end),
                    value_span: Span::new(val_tok.start, val_tok.end),
                }
            }
            TokenKind::Regex(_) => {
                let val_tok = self.advance();
                let pattern = val_tok.text().unwrap_or_default().to_string();
                Ast::RegexField {
                    field,
                    operator,
                    pattern,
                    span: Some(Span::new(word_tok.start, val_tok.end)),
                }
            }
            _ => Ast::Field {
                field,
                operator,
                value: String::new(),
                span: Span::new(word_tok.start, op_tok.end),
                value_span: Span::empty_at(op_tok.end),
            },
        }
    }

    fn parse_bare_regex(&mut self) -> Ast {
        let tok = self.advance();
        let pattern = tok.text().unwrap_or_default().to_string();
        let span = Span::new(tok.start, tok.end);
        let children = vec![
            Ast::RegexField {
                field: "name".to_string(),
                operator: Operator::Colon,
                pattern: pattern.clone(),
                span: None,
            },
            Ast::RegexField {
                field: "oracle".to_string(),
                operator: Operator::Colon,
                pattern: pattern.clone(),
                span: None,
            },
            Ast::RegexField {
                field: "type".to_string(),
                operator: Operator::Colon,
                pattern,
                span: None,
            },
        ];
        Ast::Or { children, span }
    }
}

fn cover_children(children: &[Ast]) -> Span {
    let mut spans = children.iter().filter_map(|c| c.span());
    let Some(first) = spans.next() else {
        return Span::empty_at(0);
    };
    spans.fold(first, Span::cover)
}
