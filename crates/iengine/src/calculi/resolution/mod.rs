use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    clause::{extract_clauses, Clause, ClauseSet},
    consts::DEFAULT_MAX_CLAUSES,
    inference::{Inference, InferenceResult, KnowledgeBase, Sentence},
    logic::{transform::to_cnf, Expr},
};

pub mod util;

use util::resolve;

/// Limits on a saturation run. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Budget {
    pub max_rounds: Option<usize>,
    pub max_clauses: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_rounds: None,
            max_clauses: Some(DEFAULT_MAX_CLAUSES),
            timeout_ms: None,
        }
    }
}

impl Budget {
    pub fn unlimited() -> Self {
        Self {
            max_rounds: None,
            max_clauses: None,
            timeout_ms: None,
        }
    }
}

/// Cooperative cancellation of a running saturation.
///
/// Clones share the flag, so a clone kept by another thread can stop a call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ResolutionParams {
    pub budget: Budget,
    #[serde(skip)]
    pub cancel: CancelToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutcome {
    pub entailed: bool,
    /// Saturation rounds started.
    pub rounds: usize,
    /// Size of the clause set when the run stopped.
    pub clauses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Rounds(usize),
    Clauses(usize),
    Time(Duration),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Rounds(n) => write!(f, "{n} rounds"),
            Limit::Clauses(n) => write!(f, "{n} clauses"),
            Limit::Time(d) => write!(f, "{} ms", d.as_millis()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionErr {
    Exhausted(Limit),
    Cancelled,
}

impl fmt::Display for ResolutionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionErr::Exhausted(l) => {
                write!(f, "Resolution gave up after exceeding its budget of {l}")
            }
            ResolutionErr::Cancelled => write!(f, "Resolution was cancelled"),
        }
    }
}

impl std::error::Error for ResolutionErr {}

/// Refutation: the knowledge base entails the query iff the knowledge base
/// together with the negated query resolves to the empty clause.
pub struct Resolution;

impl Inference for Resolution {
    type Params = ResolutionParams;

    type Outcome = ResolutionOutcome;

    fn entails(
        kb: &KnowledgeBase,
        query: &Sentence,
        params: Self::Params,
    ) -> InferenceResult<Self::Outcome> {
        let mut kb_clauses = vec![];
        for s in kb.iter() {
            kb_clauses.extend(extract_clauses(&to_cnf(s.expr()))?);
        }

        let negated = Expr::not(query.expr().clone());
        let query_clauses = extract_clauses(&to_cnf(&negated))?;
        debug!(
            "Resolution over {} knowledge base clauses and {} query clauses",
            kb_clauses.len(),
            query_clauses.len()
        );

        Ok(decide_entailment(kb_clauses, query_clauses, &params)?)
    }
}

/// Saturates `kb ∪ negated_query` under resolution.
///
/// Every round resolves all pairs of the current clause set. Deriving the
/// empty clause proves entailment; a round without new clauses disproves it.
/// The clause budget covers the seeded set and every clause derived so far,
/// including those of the round in progress.
pub fn decide_entailment(
    kb: Vec<Clause>,
    negated_query: Vec<Clause>,
    params: &ResolutionParams,
) -> Result<ResolutionOutcome, ResolutionErr> {
    let guard = Guard::new(params);
    let mut set: ClauseSet = kb.into_iter().chain(negated_query).collect();
    if set.has_empty_clause() {
        return Ok(ResolutionOutcome {
            entailed: true,
            rounds: 0,
            clauses: set.size(),
        });
    }

    guard.check_clauses(set.size())?;

    let mut rounds = 0;
    loop {
        guard.check_round(rounds)?;
        guard.check_time()?;
        rounds += 1;

        let mut new = ClauseSet::new();
        let clauses: Vec<&Clause> = set.iter().collect();
        for (i, c1) in clauses.iter().enumerate() {
            guard.check_time()?;
            for c2 in &clauses[i + 1..] {
                for r in resolve(c1, c2) {
                    if r.is_empty() {
                        trace!("Derived the empty clause from {} and {}", c1, c2);
                        return Ok(ResolutionOutcome {
                            entailed: true,
                            rounds,
                            clauses: set.size(),
                        });
                    }
                    if !set.contains(&r) && new.add(r) {
                        guard.check_clauses(set.size() + new.size())?;
                    }
                }
            }
        }

        if new.is_empty() {
            trace!("Saturated after {} rounds", rounds);
            return Ok(ResolutionOutcome {
                entailed: false,
                rounds,
                clauses: set.size(),
            });
        }

        set.unite(new);
        trace!("Round {} ends with {} clauses", rounds, set.size());
    }
}

struct Guard<'p> {
    budget: &'p Budget,
    cancel: &'p CancelToken,
    start: Instant,
}

impl<'p> Guard<'p> {
    fn new(params: &'p ResolutionParams) -> Self {
        Self {
            budget: &params.budget,
            cancel: &params.cancel,
            start: Instant::now(),
        }
    }

    fn check_round(&self, rounds: usize) -> Result<(), ResolutionErr> {
        match self.budget.max_rounds {
            Some(max) if rounds >= max => Err(ResolutionErr::Exhausted(Limit::Rounds(max))),
            _ => Ok(()),
        }
    }

    fn check_clauses(&self, clauses: usize) -> Result<(), ResolutionErr> {
        match self.budget.max_clauses {
            Some(max) if clauses > max => Err(ResolutionErr::Exhausted(Limit::Clauses(max))),
            _ => Ok(()),
        }
    }

    fn check_time(&self) -> Result<(), ResolutionErr> {
        if self.cancel.is_cancelled() {
            return Err(ResolutionErr::Cancelled);
        }
        if let Some(ms) = self.budget.timeout_ms {
            let limit = Duration::from_millis(ms);
            if self.start.elapsed() >= limit {
                return Err(ResolutionErr::Exhausted(Limit::Time(limit)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Literal;
    use crate::inference::InferenceErr;

    fn res(kb: &[&str], query: &str) -> ResolutionOutcome {
        Resolution::entails_str(kb, query, ResolutionParams::default()).unwrap()
    }

    fn with_budget(budget: Budget) -> ResolutionParams {
        ResolutionParams {
            budget,
            ..Default::default()
        }
    }

    #[test]
    fn modus_ponens() {
        let o = res(&["P => Q", "P"], "Q");
        assert!(o.entailed);
        assert_eq!(2, o.rounds);
    }

    #[test]
    fn disjunctive_syllogism() {
        // {P, Q} and {~P} give {Q}, which refutes {~Q}
        let o = res(&["P || Q", "~P"], "Q");
        assert!(o.entailed);
        assert_eq!(2, o.rounds);
    }

    #[test]
    fn contradiction() {
        let o = res(&["P & ~P"], "Q");
        assert!(o.entailed);
        assert_eq!(1, o.rounds);
    }

    #[test]
    fn not_entailed() {
        let o = res(&["P => Q", "Q"], "P");
        assert!(!o.entailed);
        assert_eq!(1, o.rounds);
        assert_eq!(3, o.clauses);
    }

    #[test]
    fn compound_query() {
        assert!(res(&["a <=> b", "a"], "a & b").entailed);
        assert!(res(&["a || b", "~b || c"], "a || c").entailed);
        assert!(!res(&["a || b"], "a & b").entailed);
        assert!(res(&[], "a || ~a").entailed);
        assert!(!res(&[], "a").entailed);
    }

    #[test]
    fn horn_problem() {
        let kb = [
            "p2=> p3", "p3 => p1", "c => e", "b&e => f", "f&g => h", "p1=>d", "p1&p3 => c",
            "a", "b", "p2",
        ];
        assert!(res(&kb, "d").entailed);
        assert!(!res(&kb, "h").entailed);
    }

    #[test]
    fn empty_clause_in_input() {
        let o = decide_entailment(
            vec![Clause::empty()],
            vec![Clause::new(vec![Literal::neg("q")])],
            &ResolutionParams::default(),
        )
        .unwrap();
        assert!(o.entailed);
        assert_eq!(0, o.rounds);
    }

    #[test]
    fn round_limit() {
        let params = with_budget(Budget {
            max_rounds: Some(1),
            ..Budget::unlimited()
        });
        let r = Resolution::entails_str(&["P || Q", "~P"], "Q", params);
        assert!(matches!(
            r,
            Err(InferenceErr::Resolution(ResolutionErr::Exhausted(Limit::Rounds(1))))
        ));
    }

    #[test]
    fn clause_limit() {
        let params = with_budget(Budget {
            max_clauses: Some(3),
            ..Budget::unlimited()
        });
        let r = Resolution::entails_str(&["P || Q", "~P"], "Q", params);
        assert!(matches!(
            r,
            Err(InferenceErr::Resolution(ResolutionErr::Exhausted(Limit::Clauses(3))))
        ));
    }

    #[test]
    fn seed_exceeds_clause_limit() {
        let kb = (0..200)
            .map(|i| Clause::new(vec![Literal::pos(&format!("p{i}"))]))
            .collect();
        let params = with_budget(Budget {
            max_clauses: Some(10),
            ..Budget::unlimited()
        });
        assert_eq!(
            Err(ResolutionErr::Exhausted(Limit::Clauses(10))),
            decide_entailment(kb, vec![], &params)
        );
    }

    #[test]
    fn clause_limit_within_round() {
        // Every pair of {~a, bi} and {a, ci} yields {bi, cj}, all in round 1
        let mut kb = vec![];
        for i in 0..10 {
            kb.push(Clause::new(vec![Literal::neg("a"), Literal::pos(&format!("b{i}"))]));
            kb.push(Clause::new(vec![Literal::pos("a"), Literal::pos(&format!("c{i}"))]));
        }
        let params = with_budget(Budget {
            max_clauses: Some(25),
            max_rounds: Some(1),
            ..Budget::unlimited()
        });
        assert_eq!(
            Err(ResolutionErr::Exhausted(Limit::Clauses(25))),
            decide_entailment(kb, vec![], &params)
        );
    }

    #[test]
    fn blank_query() {
        // Nothing is added for the query, so only a contradictory base entails it
        assert!(res(&["P & ~P"], "").entailed);
        assert!(!res(&["P", "P => Q"], " ").entailed);
    }

    #[test]
    fn timeout() {
        let params = with_budget(Budget {
            timeout_ms: Some(0),
            ..Budget::unlimited()
        });
        let r = Resolution::entails_str(&["P || Q", "~P"], "Q", params);
        assert!(matches!(
            r,
            Err(InferenceErr::Resolution(ResolutionErr::Exhausted(Limit::Time(_))))
        ));
    }

    #[test]
    fn cancelled() {
        let params = ResolutionParams::default();
        params.cancel.clone().cancel();
        let r = Resolution::entails_str(&["P || Q", "~P"], "Q", params);
        assert!(matches!(
            r,
            Err(InferenceErr::Resolution(ResolutionErr::Cancelled))
        ));
    }

    #[test]
    fn params_from_json() {
        let p: ResolutionParams =
            serde_json::from_str(r#"{"budget": {"maxRounds": 4, "timeoutMs": 100}}"#).unwrap();
        assert_eq!(Some(4), p.budget.max_rounds);
        assert_eq!(Some(100), p.budget.timeout_ms);
        assert_eq!(Some(DEFAULT_MAX_CLAUSES), p.budget.max_clauses);
        assert!(!p.cancel.is_cancelled());
    }
}
