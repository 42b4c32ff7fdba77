use std::collections::BTreeSet;

use crate::{logic::Expr, symbol::Symbol};

use super::visitor::MutExprVisitor;

pub fn collect_symbols(n: &Expr) -> BTreeSet<Symbol> {
    let mut c = SymbolCollector::new();
    c.visit(n);
    c.0
}

/// Collects every symbol name appearing in the visited sentences.
pub struct SymbolCollector(BTreeSet<Symbol>);

impl SymbolCollector {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn into_symbols(self) -> BTreeSet<Symbol> {
        self.0
    }
}

impl Default for SymbolCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MutExprVisitor for SymbolCollector {
    type Ret = ();

    fn visit_atom(&mut self, name: &Symbol) -> Self::Ret {
        if !self.0.contains(name) {
            self.0.insert(name.clone());
        }
    }

    fn visit_not(&mut self, child: &Expr) -> Self::Ret {
        self.visit(child)
    }

    fn visit_and(&mut self, children: &[Expr]) -> Self::Ret {
        for c in children {
            self.visit(c);
        }
    }

    fn visit_or(&mut self, children: &[Expr]) -> Self::Ret {
        for c in children {
            self.visit(c);
        }
    }
}
