use std::{collections::BTreeMap, fmt};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    consts::{DEFAULT_MAX_SYMBOLS, MAX_SYMBOLS},
    inference::{Inference, InferenceResult, KnowledgeBase, Sentence},
    logic::{
        transform::{collectors::SymbolCollector, visitor::ExprVisitor, visitor::MutExprVisitor},
        Expr,
    },
    symbol::Symbol,
};

/// An assignment of truth values to symbols.
pub type Model = BTreeMap<Symbol, bool>;

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct TruthTableParams {
    pub max_symbols: usize,
}

impl Default for TruthTableParams {
    fn default() -> Self {
        Self {
            max_symbols: DEFAULT_MAX_SYMBOLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthTableOutcome {
    pub entailed: bool,
    /// Number of enumerated models satisfying the knowledge base.
    pub models: usize,
    /// A model of the knowledge base falsifying the query.
    pub counterexample: Option<Model>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruthTableErr {
    TooManySymbols { symbols: usize, limit: usize },
}

impl fmt::Display for TruthTableErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthTableErr::TooManySymbols { symbols, limit } => write!(
                f,
                "Truth table over {symbols} symbols exceeds the limit of {limit} symbols"
            ),
        }
    }
}

impl std::error::Error for TruthTableErr {}

/// Model checking by enumerating every assignment to the symbols of the
/// knowledge base and the query.
pub struct TruthTable;

impl Inference for TruthTable {
    type Params = TruthTableParams;

    type Outcome = TruthTableOutcome;

    fn entails(
        kb: &KnowledgeBase,
        query: &Sentence,
        params: Self::Params,
    ) -> InferenceResult<Self::Outcome> {
        let mut collector = SymbolCollector::new();
        for s in kb.iter() {
            collector.visit(s.expr());
        }
        collector.visit(query.expr());
        let symbols: Vec<Symbol> = collector.into_symbols().into_iter().collect();

        let limit = params.max_symbols.min(MAX_SYMBOLS);
        if symbols.len() > limit {
            return Err(TruthTableErr::TooManySymbols {
                symbols: symbols.len(),
                limit,
            }
            .into());
        }
        debug!(
            "Enumerating {} models over {} symbols",
            1u64 << symbols.len(),
            symbols.len()
        );

        let mut models = 0;
        for mask in 0..(1u64 << symbols.len()) {
            let model = model_of(&symbols, mask);

            if kb.iter().all(|s| evaluate(s.expr(), &model)) {
                models += 1;

                if !evaluate(query.expr(), &model) {
                    trace!("Counterexample {:?}", model);
                    return Ok(TruthTableOutcome {
                        entailed: false,
                        models,
                        counterexample: Some(model),
                    });
                }
            }
        }

        Ok(TruthTableOutcome {
            entailed: true,
            models,
            counterexample: None,
        })
    }
}

/// Bit `i` of `mask` is the value of `symbols[i]`.
fn model_of(symbols: &[Symbol], mask: u64) -> Model {
    symbols
        .iter()
        .enumerate()
        .map(|(i, s)| (s.clone(), (mask >> i) & 1 == 1))
        .collect()
}

/// Truth value of a sentence under a model.
///
/// Symbols the model does not mention are false.
pub fn evaluate(expr: &Expr, model: &Model) -> bool {
    Evaluator(model).visit(expr)
}

struct Evaluator<'m>(&'m Model);

impl<'m> ExprVisitor for Evaluator<'m> {
    type Ret = bool;

    fn visit_atom(&self, name: &Symbol) -> Self::Ret {
        self.0.get(name).copied().unwrap_or(false)
    }

    fn visit_not(&self, child: &Expr) -> Self::Ret {
        !self.visit(child)
    }

    fn visit_and(&self, children: &[Expr]) -> Self::Ret {
        children.iter().all(|c| self.visit(c))
    }

    fn visit_or(&self, children: &[Expr]) -> Self::Ret {
        children.iter().any(|c| self.visit(c))
    }
}
