use crate::logic::Expr;
use crate::symbol::Symbol;

use super::visitor::ExprVisitor;

/// Pushes every negation down onto the atoms.
///
/// The result is logically equivalent to `formula` and only contains `~` in
/// front of atoms.
pub fn negation_normal_form(formula: &Expr) -> Expr {
    NegationNormalForm.visit(formula)
}

struct NegationNormalForm;

impl ExprVisitor for NegationNormalForm {
    type Ret = Expr;

    fn visit_atom(&self, name: &Symbol) -> Self::Ret {
        Expr::Atom(name.clone())
    }

    fn visit_not(&self, child: &Expr) -> Self::Ret {
        match child {
            Expr::Atom(s) => Expr::not(Expr::Atom(s.clone())),
            Expr::Not(c) => self.visit(c),
            // ~(a & b) = ~a || ~b
            Expr::And(cs) => Expr::Or(cs.iter().map(|c| self.visit_not(c)).collect()),
            // ~(a || b) = ~a & ~b
            Expr::Or(cs) => Expr::And(cs.iter().map(|c| self.visit_not(c)).collect()),
        }
    }

    fn visit_and(&self, children: &[Expr]) -> Self::Ret {
        Expr::And(children.iter().map(|c| self.visit(c)).collect())
    }

    fn visit_or(&self, children: &[Expr]) -> Self::Ret {
        Expr::Or(children.iter().map(|c| self.visit(c)).collect())
    }
}
