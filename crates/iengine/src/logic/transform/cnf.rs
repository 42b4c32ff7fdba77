use log::trace;

use crate::logic::Expr;
use crate::symbol::Symbol;

use super::negation_normal::negation_normal_form;
use super::visitor::ExprVisitor;

/// Converts a sentence into conjunctive normal form.
///
/// The result is logically equivalent to `formula`: a flat conjunction of flat
/// disjunctions of literals, where a single clause or literal is not wrapped in
/// a unary node. Distribution can blow up the number of clauses exponentially
/// in the nesting depth of the input.
pub fn to_cnf(formula: &Expr) -> Expr {
    let nnf = negation_normal_form(formula);
    let cnf = Distribute.visit(&nnf);
    trace!("CNF of {} is {}", formula, cnf);
    cnf
}

/// Distributes disjunctions over conjunctions. Expects negation normal form.
struct Distribute;

impl ExprVisitor for Distribute {
    type Ret = Expr;

    fn visit_atom(&self, name: &Symbol) -> Self::Ret {
        Expr::Atom(name.clone())
    }

    fn visit_not(&self, child: &Expr) -> Self::Ret {
        Expr::not(child.clone())
    }

    fn visit_and(&self, children: &[Expr]) -> Self::Ret {
        conjoin(children.iter().map(|c| self.visit(c)).collect())
    }

    fn visit_or(&self, children: &[Expr]) -> Self::Ret {
        distribute_or(children.iter().map(|c| self.visit(c)).collect())
    }
}

/// Builds a conjunction, merging nested conjunctions into it.
fn conjoin(conjuncts: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(conjuncts.len());
    for c in conjuncts {
        match c {
            Expr::And(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    if flat.len() == 1 {
        flat.remove(0)
    } else {
        Expr::And(flat)
    }
}

/// Builds the CNF of a disjunction whose operands are already in CNF.
fn distribute_or(disjuncts: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(disjuncts.len());
    for d in disjuncts {
        match d {
            Expr::Or(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }

    let idx = match flat.iter().position(|d| matches!(d, Expr::And(_))) {
        Some(idx) => idx,
        None if flat.len() == 1 => return flat.remove(0),
        None => return Expr::Or(flat),
    };

    // The conjunction is removed by position so that a structurally equal
    // sibling stays among the other disjuncts.
    let mut others = flat;
    let conjuncts = match others.remove(idx) {
        Expr::And(cs) => cs,
        other => vec![other],
    };

    let distributed = conjuncts
        .into_iter()
        .map(|c| {
            let mut d = Vec::with_capacity(others.len() + 1);
            d.push(c);
            d.extend(others.iter().cloned());
            distribute_or(d)
        })
        .collect();

    conjoin(distributed)
}
