use log::{debug, trace};

use crate::{
    inference::{Inference, InferenceResult, KnowledgeBase, Sentence},
    symbol::Symbol,
};

use super::{fact_name, split_knowledge_base, ChainingErr, ChainingOutcome, Inferred, Rule};

/// Goal-driven chaining from the query back to the rules.
///
/// A goal that no rule concludes is accepted as an assumption, whether or not
/// the knowledge base asserts it. Facts therefore play no part in the search.
/// A rule fails only if one of its premises is already being proved further
/// up, so a query that cannot be proved is reported as a
/// [`ChainingErr::Cycle`] rather than as a plain NO.
pub struct BackwardChaining;

impl Inference for BackwardChaining {
    type Params = ();

    type Outcome = ChainingOutcome;

    fn entails(
        kb: &KnowledgeBase,
        query: &Sentence,
        _params: Self::Params,
    ) -> InferenceResult<Self::Outcome> {
        // A blank query names no goal
        if query.is_empty() {
            return Ok(ChainingOutcome {
                entailed: false,
                inferred: vec![],
            });
        }

        let query = fact_name(query);
        let (rules, _) = split_knowledge_base(kb.iter());
        debug!("Backward chaining {} over {} rules", query, rules.len());

        let mut prover = Prover::new(&rules);
        let entailed = prover.prove(&query);
        if !entailed {
            if let Some(path) = prover.cycle.take() {
                return Err(ChainingErr::Cycle(path).into());
            }
        }

        Ok(ChainingOutcome {
            entailed,
            inferred: prover.inferred.into_vec(),
        })
    }
}

struct Prover<'r> {
    rules: &'r [Rule],
    inferred: Inferred,
    /// Goals currently being proved, outermost first.
    goals: Vec<Symbol>,
    /// The first goal path that led back into itself.
    cycle: Option<Vec<Symbol>>,
}

impl<'r> Prover<'r> {
    fn new(rules: &'r [Rule]) -> Self {
        Self {
            rules,
            inferred: Inferred::default(),
            goals: vec![],
            cycle: None,
        }
    }

    fn prove(&mut self, goal: &Symbol) -> bool {
        if self.inferred.contains(goal) {
            return true;
        }

        let rules = self.rules;
        let mut concluding = rules.iter().filter(|r| r.conclusion == *goal).peekable();
        if concluding.peek().is_none() {
            trace!("Assuming {}", goal);
            self.inferred.insert(goal.clone());
            return true;
        }

        if self.goals.contains(goal) {
            trace!("{} is already being proved", goal);
            if self.cycle.is_none() {
                let mut path = self.goals.clone();
                path.push(goal.clone());
                self.cycle = Some(path);
            }
            return false;
        }

        self.goals.push(goal.clone());
        let proved = concluding.any(|rule| {
            let proved = self.prove_all(&rule.premises);
            if proved {
                trace!("Proved {} by {}", goal, rule);
            }
            proved
        });
        self.goals.pop();

        if proved {
            self.inferred.insert(goal.clone());
        }
        proved
    }

    fn prove_all(&mut self, premises: &[Symbol]) -> bool {
        premises.iter().all(|p| self.prove(p))
    }
}
