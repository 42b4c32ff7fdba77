use std::iter::Peekable;

use crate::{
    logic::Expr,
    parse::{ParseErr, ParseResult, Token, TokenKind},
};

use super::Tokenizer;

pub fn parse_prop_formula(formula: &str) -> ParseResult<Expr> {
    PropParser::parse(formula)
}

/// Recursive descent parser for propositional sentences.
///
/// Precedence from loosest to tightest: `<=>`, `=>`, `||`, `&`, `~`.
/// Implication and biconditional associate to the right and are replaced by
/// their definitions in terms of `~`, `&` and `||` while parsing. Chains of
/// `&` or `||` build a single n-ary node.
pub struct PropParser<'t> {
    tokens: Peekable<Tokenizer<'t>>,
    len: usize,
}

impl<'f> PropParser<'f> {
    pub fn parse(formula: &'f str) -> ParseResult<Expr> {
        let mut parser = PropParser {
            tokens: Tokenizer::new(formula).peekable(),
            len: formula.chars().count(),
        };
        if parser.tokens.peek().is_none() {
            return Err(ParseErr::EmptySentence);
        }
        let node = parser.parse_equiv()?;
        match parser.tokens.next() {
            Some(Err(e)) => Err(e),
            Some(Ok(t)) => Err(ParseErr::Expected(
                "end of input".to_string(),
                Self::token_msg(&t),
            )),
            None => Ok(node),
        }
    }

    fn parse_equiv(&mut self) -> ParseResult<Expr> {
        let left = self.parse_impl()?;

        if self.next_is(TokenKind::Equiv)? {
            self.bump()?;
            let right = self.parse_equiv()?;
            Ok(Expr::equiv(left, right))
        } else {
            Ok(left)
        }
    }

    fn parse_impl(&mut self) -> ParseResult<Expr> {
        let left = self.parse_or()?;

        if self.next_is(TokenKind::Impl)? {
            self.bump()?;
            let right = self.parse_impl()?;
            Ok(Expr::implies(left, right))
        } else {
            Ok(left)
        }
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let first = self.parse_and()?;
        if !self.next_is(TokenKind::Or)? {
            return Ok(first);
        }

        let mut disjuncts = vec![first];
        while self.next_is(TokenKind::Or)? {
            self.bump()?;
            disjuncts.push(self.parse_and()?);
        }

        Ok(Expr::Or(disjuncts))
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let first = self.parse_not()?;
        if !self.next_is(TokenKind::And)? {
            return Ok(first);
        }

        let mut conjuncts = vec![first];
        while self.next_is(TokenKind::And)? {
            self.bump()?;
            conjuncts.push(self.parse_not()?);
        }

        Ok(Expr::And(conjuncts))
    }

    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.next_is(TokenKind::Not)? {
            self.bump()?;
            Ok(Expr::not(self.parse_not()?))
        } else {
            self.parse_paren()
        }
    }

    fn parse_paren(&mut self) -> ParseResult<Expr> {
        if self.next_is(TokenKind::LParen)? {
            self.bump()?;
            let exp = self.parse_equiv()?;
            self.eat(TokenKind::RParen)?;
            Ok(exp)
        } else {
            self.parse_symbol()
        }
    }

    fn parse_symbol(&mut self) -> ParseResult<Expr> {
        match self.tokens.next() {
            Some(Ok(Token {
                kind: TokenKind::Symbol,
                spelling,
                ..
            })) => Ok(Expr::atom(spelling)),
            Some(Ok(t)) => Err(ParseErr::Expected(
                TokenKind::Symbol.to_string(),
                Self::token_msg(&t),
            )),
            Some(Err(e)) => Err(e),
            None => Err(ParseErr::Expected(
                TokenKind::Symbol.to_string(),
                self.end_msg(),
            )),
        }
    }

    fn next_is(&mut self, expected: TokenKind) -> ParseResult<bool> {
        match self.tokens.peek() {
            Some(Ok(Token { kind, .. })) => Ok(*kind == expected),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(false),
        }
    }

    fn bump(&mut self) -> ParseResult<()> {
        match self.tokens.next() {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(e),
            None => Err(ParseErr::Expected("token".to_string(), self.end_msg())),
        }
    }

    fn eat(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.next_is(expected)? {
            self.bump()
        } else {
            Err(ParseErr::Expected(expected.to_string(), self.got_msg()))
        }
    }

    fn got_msg(&mut self) -> String {
        match self.tokens.peek() {
            Some(Ok(t)) => Self::token_msg(t),
            _ => self.end_msg(),
        }
    }

    fn token_msg(t: &Token) -> String {
        format!("'{}' at position {}", t, t.src_pos)
    }

    fn end_msg(&self) -> String {
        format!("end of input at position {}", self.len)
    }
}
