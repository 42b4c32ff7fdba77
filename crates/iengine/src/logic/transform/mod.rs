pub mod cnf;
pub mod collectors;
pub mod negation_normal;
pub mod visitor;

pub use cnf::to_cnf;
pub use collectors::collect_symbols;
pub use negation_normal::negation_normal_form;
