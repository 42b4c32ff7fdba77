use std::collections::VecDeque;

use log::{debug, trace};

use crate::inference::{Inference, InferenceResult, KnowledgeBase, Sentence};

use super::{fact_name, split_knowledge_base, ChainingOutcome, Inferred};

/// Data-driven chaining from the facts of the knowledge base.
///
/// Only the facts seed the agenda; a knowledge base consisting of rules alone
/// never derives anything.
pub struct ForwardChaining;

impl Inference for ForwardChaining {
    type Params = ();

    type Outcome = ChainingOutcome;

    fn entails(
        kb: &KnowledgeBase,
        query: &Sentence,
        _params: Self::Params,
    ) -> InferenceResult<Self::Outcome> {
        let query = fact_name(query);
        let (rules, facts) = split_knowledge_base(kb.iter());
        debug!("Forward chaining with {} rules and {} facts", rules.len(), facts.len());

        let mut inferred = Inferred::default();
        let mut agenda: VecDeque<_> = facts.into();

        while let Some(fact) = agenda.pop_front() {
            if !inferred.insert(fact.clone()) {
                continue;
            }
            trace!("Inferred {}", fact);

            if fact == query {
                return Ok(ChainingOutcome {
                    entailed: true,
                    inferred: inferred.into_vec(),
                });
            }

            for rule in &rules {
                if inferred.contains(&rule.conclusion)
                    || !rule.premises.iter().all(|p| inferred.contains(p))
                {
                    continue;
                }

                trace!("Fired {}", rule);
                agenda.push_back(rule.conclusion.clone());
                if rule.conclusion == query {
                    inferred.insert(query);
                    return Ok(ChainingOutcome {
                        entailed: true,
                        inferred: inferred.into_vec(),
                    });
                }
            }
        }

        Ok(ChainingOutcome {
            entailed: false,
            inferred: inferred.into_vec(),
        })
    }
}
