pub mod transform;

use std::fmt;

use crate::symbol::Symbol;

/// A propositional sentence.
///
/// Implication and biconditional never appear in the tree, they are desugared
/// by the parser. Conjunctions and disjunctions are n-ary and keep the order of
/// their operands. Equality and hashing are structural.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Expr {
    Atom(Symbol),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub fn atom(name: &str) -> Self {
        Expr::Atom(Symbol::new(name))
    }

    pub fn not(child: Expr) -> Self {
        Expr::Not(Box::new(child))
    }

    /// `left => right` as `~left || right`
    pub fn implies(left: Expr, right: Expr) -> Self {
        Expr::Or(vec![Expr::not(left), right])
    }

    /// `left <=> right` as `(~left || right) & (~right || left)`
    pub fn equiv(left: Expr, right: Expr) -> Self {
        Expr::And(vec![
            Expr::Or(vec![Expr::not(left.clone()), right.clone()]),
            Expr::Or(vec![Expr::not(right), left]),
        ])
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Expr::Atom(_) => true,
            Expr::Not(c) => matches!(c.as_ref(), Expr::Atom(_)),
            _ => false,
        }
    }

    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::Atom(_) => &[],
            Expr::Not(c) => std::slice::from_ref(c.as_ref()),
            Expr::And(cs) | Expr::Or(cs) => cs,
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Expr::size).sum::<usize>()
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Expr], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, c) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(s) => write!(f, "{}", s),
            Expr::Not(c) => write!(f, "~{}", c),
            Expr::And(cs) => write_joined(f, cs, "&"),
            Expr::Or(cs) => write_joined(f, cs, "||"),
        }
    }
}
