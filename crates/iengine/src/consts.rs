/// Default cap on the number of clauses a resolution saturation may hold.
pub const DEFAULT_MAX_CLAUSES: usize = 50_000;

/// Default cap on the number of symbols a truth table is built over.
pub const DEFAULT_MAX_SYMBOLS: usize = 24;

/// Models are enumerated as bit masks over a `u64`.
pub const MAX_SYMBOLS: usize = 63;
