pub mod calculi;
pub mod clause;
mod consts;
pub mod inference;
pub mod logic;
pub mod parse;
pub mod symbol;

pub use consts::{DEFAULT_MAX_CLAUSES, DEFAULT_MAX_SYMBOLS, MAX_SYMBOLS};
pub use logic::Expr;
pub use symbol::Symbol;

pub use calculi::{ask, Answer, MethodKind, Settings};
pub use inference::{Inference, InferenceErr, InferenceResult, KnowledgeBase, Sentence};
pub use parse::problem::{parse_problem, Problem, ProblemErr};
