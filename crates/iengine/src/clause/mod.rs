use std::collections::{btree_set, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{logic::Expr, symbol::Symbol};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Literal {
    name: Symbol,
    negated: bool,
}

impl Literal {
    pub fn new(name: Symbol, negated: bool) -> Self {
        Literal { name, negated }
    }

    pub fn pos(name: &str) -> Self {
        Literal::new(Symbol::new(name), false)
    }

    pub fn neg(name: &str) -> Self {
        Literal::new(Symbol::new(name), true)
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn complement(&self) -> Literal {
        Literal {
            name: self.name.clone(),
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negated { "~" } else { "" }, self.name)
    }
}

/// A disjunction of literals.
///
/// Literals are kept as a set, so two clauses are equal iff they contain the
/// same literals regardless of order and repetition.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Clause::default()
    }

    pub fn add(&mut self, lit: Literal) {
        self.literals.insert(lit);
    }

    pub fn contains(&self, lit: &Literal) -> bool {
        self.literals.contains(lit)
    }

    pub fn remove(&mut self, lit: &Literal) -> bool {
        self.literals.remove(lit)
    }

    /// The empty clause, which can never be satisfied.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn literals(&self) -> &BTreeSet<Literal> {
        &self.literals
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// True iff the clause contains some literal together with its complement.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .filter(|l| !l.negated())
            .any(|l| self.literals.contains(&l.complement()))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;

    type IntoIter = btree_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut atoms = String::new();

        for (i, a) in self.literals.iter().enumerate() {
            if i > 0 {
                atoms.push_str(", ");
            }
            atoms.push_str(&a.to_string());
        }

        write!(f, "{{{}}}", atoms)
    }
}

/// A set of distinct clauses with deterministic iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClauseSet {
    clauses: BTreeSet<Clause>,
}

impl ClauseSet {
    pub fn new() -> Self {
        ClauseSet::default()
    }

    /// Returns false if the clause was already present.
    pub fn add(&mut self, c: Clause) -> bool {
        self.clauses.insert(c)
    }

    pub fn unite(&mut self, cs: ClauseSet) {
        self.clauses.extend(cs.clauses);
    }

    pub fn contains(&self, c: &Clause) -> bool {
        self.clauses.contains(c)
    }

    pub fn is_subset(&self, other: &ClauseSet) -> bool {
        self.clauses.is_subset(&other.clauses)
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Clause> {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        ClauseSet {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<Clause> for ClauseSet {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        self.clauses.extend(iter)
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Raised when clause extraction is handed a sentence that is not in CNF.
///
/// This can only happen if the CNF conversion is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseErr {
    NotInCnf(Expr),
}

impl fmt::Display for ClauseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseErr::NotInCnf(e) => {
                write!(f, "Unexpected expression in literal extraction: {}", e)
            }
        }
    }
}

impl std::error::Error for ClauseErr {}

/// Reads the clauses off a sentence in conjunctive normal form.
pub fn extract_clauses(cnf: &Expr) -> Result<Vec<Clause>, ClauseErr> {
    let mut clauses = vec![];
    collect_clauses(cnf, &mut clauses)?;
    Ok(clauses)
}

fn collect_clauses(n: &Expr, clauses: &mut Vec<Clause>) -> Result<(), ClauseErr> {
    match n {
        Expr::And(cs) => {
            for c in cs {
                collect_clauses(c, clauses)?;
            }
        }
        other => {
            let mut clause = Clause::empty();
            collect_literals(other, &mut clause)?;
            clauses.push(clause);
        }
    }
    Ok(())
}

fn collect_literals(n: &Expr, clause: &mut Clause) -> Result<(), ClauseErr> {
    match n {
        Expr::Or(ds) => {
            for d in ds {
                collect_literals(d, clause)?;
            }
        }
        Expr::Atom(s) => clause.add(Literal::new(s.clone(), false)),
        Expr::Not(c) => match c.as_ref() {
            Expr::Atom(s) => clause.add(Literal::new(s.clone(), true)),
            _ => return Err(ClauseErr::NotInCnf(n.clone())),
        },
        Expr::And(_) => return Err(ClauseErr::NotInCnf(n.clone())),
    }
    Ok(())
}
