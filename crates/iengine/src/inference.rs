use std::fmt;

use crate::{
    calculi::{chaining::ChainingErr, resolution::ResolutionErr, truth_table::TruthTableErr},
    clause::ClauseErr,
    logic::Expr,
    parse::{prop::parse_prop_formula, ParseErr},
};

/// A sentence together with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    expr: Expr,
}

impl Sentence {
    pub fn parse(text: &str) -> Result<Self, ParseErr> {
        let expr = parse_prop_formula(text)?;
        Ok(Sentence {
            text: text.trim().to_string(),
            expr,
        })
    }

    /// The blank sentence, read as the empty disjunction that no model
    /// satisfies.
    pub fn empty() -> Self {
        Sentence {
            text: String::new(),
            expr: Expr::Or(vec![]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The ordered sentences of a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    /// Parses every sentence, skipping blank ones.
    pub fn parse<S: AsRef<str>>(sentences: &[S]) -> Result<Self, SentenceErr> {
        let mut parsed = Vec::with_capacity(sentences.len());
        for (i, s) in sentences.iter().enumerate() {
            let s = s.as_ref();
            if s.trim().is_empty() {
                continue;
            }
            let sentence = Sentence::parse(s).map_err(|err| SentenceErr {
                location: Location::KnowledgeBase(i),
                sentence: s.to_string(),
                err,
            })?;
            parsed.push(sentence);
        }
        Ok(KnowledgeBase { sentences: parsed })
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }
}

/// Parses the query of an inference call.
///
/// A blank query is [`Sentence::empty`], so it is entailed exactly by a
/// knowledge base without models.
pub fn parse_query(query: &str) -> Result<Sentence, SentenceErr> {
    if query.trim().is_empty() {
        return Ok(Sentence::empty());
    }
    Sentence::parse(query).map_err(|err| SentenceErr {
        location: Location::Query,
        sentence: query.to_string(),
        err,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    KnowledgeBase(usize),
    Query,
}

/// A sentence that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceErr {
    pub location: Location,
    pub sentence: String,
    pub err: ParseErr,
}

impl fmt::Display for SentenceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Location::KnowledgeBase(i) => write!(
                f,
                "Knowledge base sentence {} '{}': {}",
                i + 1,
                self.sentence,
                self.err
            ),
            Location::Query => write!(f, "Query '{}': {}", self.sentence, self.err),
        }
    }
}

impl std::error::Error for SentenceErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

#[derive(Debug)]
pub enum InferenceErr {
    Sentence(SentenceErr),
    Clause(ClauseErr),
    Resolution(ResolutionErr),
    TruthTable(TruthTableErr),
    Chaining(ChainingErr),
}

impl From<SentenceErr> for InferenceErr {
    fn from(e: SentenceErr) -> Self {
        Self::Sentence(e)
    }
}

impl From<ClauseErr> for InferenceErr {
    fn from(e: ClauseErr) -> Self {
        Self::Clause(e)
    }
}

impl From<ResolutionErr> for InferenceErr {
    fn from(e: ResolutionErr) -> Self {
        Self::Resolution(e)
    }
}

impl From<TruthTableErr> for InferenceErr {
    fn from(e: TruthTableErr) -> Self {
        Self::TruthTable(e)
    }
}

impl From<ChainingErr> for InferenceErr {
    fn from(e: ChainingErr) -> Self {
        Self::Chaining(e)
    }
}

impl fmt::Display for InferenceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceErr::Sentence(e) => fmt::Display::fmt(e, f),
            InferenceErr::Clause(e) => write!(f, "Internal error: {}", e),
            InferenceErr::Resolution(e) => fmt::Display::fmt(e, f),
            InferenceErr::TruthTable(e) => fmt::Display::fmt(e, f),
            InferenceErr::Chaining(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for InferenceErr {}

pub type InferenceResult<T> = Result<T, InferenceErr>;

/// A decision procedure for propositional entailment.
///
/// Implementations hold no state between calls: everything a call needs is
/// passed in, so calls on different knowledge bases may run concurrently.
pub trait Inference {
    type Params: Default;
    type Outcome;

    fn entails(
        kb: &KnowledgeBase,
        query: &Sentence,
        params: Self::Params,
    ) -> InferenceResult<Self::Outcome>;

    /// Parses the raw sentences and runs the procedure on them.
    fn entails_str<S: AsRef<str>>(
        kb: &[S],
        query: &str,
        params: Self::Params,
    ) -> InferenceResult<Self::Outcome> {
        let kb = KnowledgeBase::parse(kb)?;
        let query = parse_query(query)?;
        Self::entails(&kb, &query, params)
    }
}
