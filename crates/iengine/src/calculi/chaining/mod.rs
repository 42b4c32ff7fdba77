//! Forward and backward chaining over `p1 & ... & pn => c` rules.
//!
//! The chainers work on the surface syntax rather than on the parsed
//! expression: a sentence is a rule only if its tokens have exactly the shape
//! `Sym (& Sym)* => Sym`. Every other sentence counts as an opaque fact named
//! by its text, so disjunctions, negations and biconditionals contribute
//! nothing beyond that name.

use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::{
    inference::Sentence,
    parse::{tokenize, Token, TokenKind},
    symbol::Symbol,
};

pub mod backward;
pub mod forward;

pub use backward::BackwardChaining;
pub use forward::ForwardChaining;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub premises: Vec<Symbol>,
    pub conclusion: Symbol,
}

impl Rule {
    pub fn from_sentence(sentence: &str) -> Option<Rule> {
        let tokens = tokenize(sentence).ok()?;
        let (conclusion, body) = match tokens.as_slice() {
            [body @ .., Token {
                kind: TokenKind::Impl,
                ..
            }, Token {
                kind: TokenKind::Symbol,
                spelling,
                ..
            }] => (Symbol::new(spelling), body),
            _ => return None,
        };

        // Symbols at even positions, `&` in between
        if body.len() % 2 == 0 {
            return None;
        }
        let mut premises = Vec::with_capacity(body.len() / 2 + 1);
        for (i, t) in body.iter().enumerate() {
            match (i % 2, t.kind) {
                (0, TokenKind::Symbol) => premises.push(Symbol::new(t.spelling)),
                (1, TokenKind::And) => {}
                _ => return None,
            }
        }

        Some(Rule {
            premises,
            conclusion,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, " => {}", self.conclusion)
    }
}

/// The name a non-rule sentence is known by to the chainers.
///
/// A sentence that is a single symbol, possibly in parentheses, is named by
/// that symbol.
pub fn fact_name(sentence: &Sentence) -> Symbol {
    let tokens = match tokenize(sentence.text()) {
        Ok(tokens) => tokens,
        Err(_) => return Symbol::new(sentence.text()),
    };

    let mut inner = tokens.as_slice();
    while let [Token {
        kind: TokenKind::LParen,
        ..
    }, rest @ .., Token {
        kind: TokenKind::RParen,
        ..
    }] = inner
    {
        inner = rest;
    }

    match inner {
        [Token {
            kind: TokenKind::Symbol,
            spelling,
            ..
        }] => Symbol::new(spelling),
        _ => Symbol::new(sentence.text()),
    }
}

/// Splits the knowledge base into rules and facts, keeping their order.
pub fn split_knowledge_base<'a, I>(sentences: I) -> (Vec<Rule>, Vec<Symbol>)
where
    I: IntoIterator<Item = &'a Sentence>,
{
    let mut rules = vec![];
    let mut facts = vec![];
    for s in sentences {
        match Rule::from_sentence(s.text()) {
            Some(r) => rules.push(r),
            None => facts.push(fact_name(s)),
        }
    }
    (rules, facts)
}

/// Symbols established so far, in the order they were established.
#[derive(Debug, Clone, Default)]
pub struct Inferred {
    order: Vec<Symbol>,
    seen: HashSet<Symbol>,
}

impl Inferred {
    pub fn contains(&self, s: &Symbol) -> bool {
        self.seen.contains(s)
    }

    /// Returns false if the symbol was already inferred.
    pub fn insert(&mut self, s: Symbol) -> bool {
        if self.seen.insert(s.clone()) {
            self.order.push(s);
            true
        } else {
            false
        }
    }

    pub fn into_vec(self) -> Vec<Symbol> {
        self.order
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainingOutcome {
    pub entailed: bool,
    /// Symbols established during the search, in order.
    pub inferred: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainingErr {
    /// Proving the last goal requires proving itself again.
    Cycle(Vec<Symbol>),
}

impl fmt::Display for ChainingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainingErr::Cycle(path) => {
                write!(f, "Rules form a cycle without a base case: ")?;
                for (i, s) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, " <= ")?;
                    }
                    write!(f, "{}", s)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ChainingErr {}
