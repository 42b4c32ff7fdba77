use crate::logic::Expr;
use crate::symbol::Symbol;

pub trait ExprVisitor {
    type Ret;

    fn visit(&self, node: &Expr) -> Self::Ret {
        match node {
            Expr::Atom(s) => self.visit_atom(s),
            Expr::Not(c) => self.visit_not(c),
            Expr::And(children) => self.visit_and(children),
            Expr::Or(children) => self.visit_or(children),
        }
    }

    fn visit_atom(&self, name: &Symbol) -> Self::Ret;

    fn visit_not(&self, child: &Expr) -> Self::Ret;

    fn visit_and(&self, children: &[Expr]) -> Self::Ret;

    fn visit_or(&self, children: &[Expr]) -> Self::Ret;
}

pub trait MutExprVisitor {
    type Ret;

    fn visit(&mut self, node: &Expr) -> Self::Ret {
        match node {
            Expr::Atom(s) => self.visit_atom(s),
            Expr::Not(c) => self.visit_not(c),
            Expr::And(children) => self.visit_and(children),
            Expr::Or(children) => self.visit_or(children),
        }
    }

    fn visit_atom(&mut self, name: &Symbol) -> Self::Ret;

    fn visit_not(&mut self, child: &Expr) -> Self::Ret;

    fn visit_and(&mut self, children: &[Expr]) -> Self::Ret;

    fn visit_or(&mut self, children: &[Expr]) -> Self::Ret;
}
