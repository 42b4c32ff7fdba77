use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

pub mod chaining;
pub mod resolution;
pub mod truth_table;

use crate::inference::{parse_query, Inference, InferenceResult, KnowledgeBase};
use chaining::{BackwardChaining, ChainingOutcome, ForwardChaining};
use resolution::{Resolution, ResolutionOutcome, ResolutionParams};
use truth_table::{TruthTable, TruthTableOutcome, TruthTableParams};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum MethodKind {
    TruthTable,
    ForwardChaining,
    BackwardChaining,
    Resolution,
}

impl MethodKind {
    pub const ALL: [MethodKind; 4] = [
        MethodKind::TruthTable,
        MethodKind::ForwardChaining,
        MethodKind::BackwardChaining,
        MethodKind::Resolution,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            MethodKind::TruthTable => "tt",
            MethodKind::ForwardChaining => "fc",
            MethodKind::BackwardChaining => "bc",
            MethodKind::Resolution => "res",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MethodKind::TruthTable => "Truth table model checking",
            MethodKind::ForwardChaining => "Forward chaining over Horn rules",
            MethodKind::BackwardChaining => "Backward chaining over Horn rules",
            MethodKind::Resolution => "Resolution refutation over CNF clauses",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl<'a> TryFrom<&'a str> for MethodKind {
    type Error = &'static str;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "tt" => Ok(MethodKind::TruthTable),
            "fc" => Ok(MethodKind::ForwardChaining),
            "bc" => Ok(MethodKind::BackwardChaining),
            "res" => Ok(MethodKind::Resolution),
            _ => Err("Unknown inference method"),
        }
    }
}

impl TryFrom<String> for MethodKind {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        MethodKind::try_from(s.as_str())
    }
}

impl FromStr for MethodKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodKind::try_from(s)
    }
}

impl Serialize for MethodKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_str())
    }
}

/// Per-method settings for a call to [`ask`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Settings {
    pub resolution: ResolutionParams,
    pub truth_table: TruthTableParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method")]
pub enum Answer {
    #[serde(rename = "tt")]
    TruthTable(TruthTableOutcome),
    #[serde(rename = "fc")]
    ForwardChaining(ChainingOutcome),
    #[serde(rename = "bc")]
    BackwardChaining(ChainingOutcome),
    #[serde(rename = "res")]
    Resolution(ResolutionOutcome),
}

impl Answer {
    pub fn method(&self) -> MethodKind {
        match self {
            Answer::TruthTable(_) => MethodKind::TruthTable,
            Answer::ForwardChaining(_) => MethodKind::ForwardChaining,
            Answer::BackwardChaining(_) => MethodKind::BackwardChaining,
            Answer::Resolution(_) => MethodKind::Resolution,
        }
    }

    pub fn entailed(&self) -> bool {
        match self {
            Answer::TruthTable(o) => o.entailed,
            Answer::ForwardChaining(o) | Answer::BackwardChaining(o) => o.entailed,
            Answer::Resolution(o) => o.entailed,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.entailed() {
            return write!(f, "NO");
        }
        match self {
            Answer::TruthTable(o) => write!(f, "YES: {}", o.models),
            Answer::ForwardChaining(o) | Answer::BackwardChaining(o) => {
                write!(f, "YES: ")?;
                for (i, s) in o.inferred.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                Ok(())
            }
            Answer::Resolution(_) => write!(f, "YES"),
        }
    }
}

/// Decides whether the sentences in `kb` entail `query` using `method`.
pub fn ask<S: AsRef<str>>(
    method: MethodKind,
    kb: &[S],
    query: &str,
    settings: &Settings,
) -> InferenceResult<Answer> {
    let kb = KnowledgeBase::parse(kb)?;
    let query = parse_query(query)?;
    debug!(
        "Asking {} whether {} sentences entail '{}'",
        method,
        kb.len(),
        query
    );

    let answer = match method {
        MethodKind::TruthTable => {
            Answer::TruthTable(TruthTable::entails(&kb, &query, settings.truth_table)?)
        }
        MethodKind::ForwardChaining => {
            Answer::ForwardChaining(ForwardChaining::entails(&kb, &query, ())?)
        }
        MethodKind::BackwardChaining => {
            Answer::BackwardChaining(BackwardChaining::entails(&kb, &query, ())?)
        }
        MethodKind::Resolution => Answer::Resolution(Resolution::entails(
            &kb,
            &query,
            settings.resolution.clone(),
        )?),
    };
    debug!("{} answered {}", method, answer);
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::InferenceErr;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn answer(method: MethodKind, kb: &[&str], query: &str) -> String {
        ask(method, kb, query, &Settings::default())
            .unwrap()
            .to_string()
    }

    #[test]
    fn method_names() {
        for m in MethodKind::ALL {
            assert_eq!(Ok(m), m.to_str().parse());
            assert_eq!(Ok(m), MethodKind::try_from(m.to_str().to_uppercase()));
        }
        assert!("dpll".parse::<MethodKind>().is_err());
    }

    #[test]
    fn method_serde() {
        let m: MethodKind = serde_json::from_str("\"RES\"").unwrap();
        assert_eq!(MethodKind::Resolution, m);
        assert_eq!("\"bc\"", serde_json::to_string(&MethodKind::BackwardChaining).unwrap());
        assert!(serde_json::from_str::<MethodKind>("\"x\"").is_err());
    }

    #[test]
    fn modus_ponens() {
        let kb = ["P => Q", "P"];
        assert_eq!("YES: 1", answer(MethodKind::TruthTable, &kb, "Q"));
        assert_eq!("YES: P, Q", answer(MethodKind::ForwardChaining, &kb, "Q"));
        assert_eq!("YES: P, Q", answer(MethodKind::BackwardChaining, &kb, "Q"));
        assert_eq!("YES", answer(MethodKind::Resolution, &kb, "Q"));
    }

    #[test]
    fn disjunctive_syllogism() {
        let kb = ["P || Q", "~P"];
        assert_eq!("YES: 1", answer(MethodKind::TruthTable, &kb, "Q"));
        assert_eq!("YES", answer(MethodKind::Resolution, &kb, "Q"));
    }

    #[test]
    fn contradiction() {
        let kb = ["P & ~P"];
        assert_eq!("YES: 0", answer(MethodKind::TruthTable, &kb, "Q"));
        assert_eq!("YES", answer(MethodKind::Resolution, &kb, "Q"));
    }

    #[test]
    fn chainers_diverge_without_facts() {
        let kb = ["P => Q", "Q => R"];
        assert_eq!("NO", answer(MethodKind::ForwardChaining, &kb, "R"));
        assert_eq!("YES: P, Q, R", answer(MethodKind::BackwardChaining, &kb, "R"));
        assert_eq!("NO", answer(MethodKind::TruthTable, &kb, "R"));
        assert_eq!("NO", answer(MethodKind::Resolution, &kb, "R"));
    }

    #[test]
    fn answer_json() {
        let a = ask(
            MethodKind::ForwardChaining,
            &["P => Q", "P"],
            "Q",
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(
            r#"{"method":"fc","entailed":true,"inferred":["P","Q"]}"#,
            serde_json::to_string(&a).unwrap()
        );
    }

    #[test]
    fn settings_from_json() {
        let s: Settings = serde_json::from_str(
            r#"{"truthTable": {"maxSymbols": 2}, "resolution": {"budget": {"maxRounds": 1}}}"#,
        )
        .unwrap();
        assert_eq!(2, s.truth_table.max_symbols);
        assert_eq!(Some(1), s.resolution.budget.max_rounds);

        let r = ask(MethodKind::TruthTable, &["a => b", "c"], "b", &s);
        assert!(matches!(r, Err(InferenceErr::TruthTable(_))));
    }

    #[test]
    fn reports_bad_sentences() {
        let r = ask(
            MethodKind::Resolution,
            &["a", "a => => b"],
            "b",
            &Settings::default(),
        );
        assert!(matches!(r, Err(InferenceErr::Sentence(_))));

        let r = ask(MethodKind::TruthTable, &["a"], "a ||", &Settings::default());
        assert!(matches!(r, Err(InferenceErr::Sentence(_))));
    }

    #[test]
    fn blank_query() {
        let kb = ["P & ~P"];
        assert_eq!("YES: 0", answer(MethodKind::TruthTable, &kb, ""));
        assert_eq!("YES", answer(MethodKind::Resolution, &kb, " "));

        let kb = ["P => Q", "P"];
        for m in MethodKind::ALL {
            assert_eq!("NO", answer(m, &kb, ""), "{}", m);
        }
        // An empty knowledge base has a model, which the blank query fails
        assert_eq!("NO", answer(MethodKind::TruthTable, &[], "\t"));
    }

    #[test]
    fn concurrent_calls() {
        let horn = [
            "p2=> p3", "p3 => p1", "c => e", "b&e => f", "f&g => h", "p1=>d", "p1&p3 => c",
            "a", "b", "p2",
        ];
        let disjunctive = ["P || Q", "~P", "Q => R"];
        let settings = Settings::default();

        let (left, right) = std::thread::scope(|s| {
            let left = s.spawn(|| {
                MethodKind::ALL.map(|m| ask(m, &horn, "d", &settings).map(|a| a.to_string()))
            });
            let right = s.spawn(|| {
                [MethodKind::TruthTable, MethodKind::Resolution]
                    .map(|m| ask(m, &disjunctive, "R", &settings).map(|a| a.to_string()))
            });
            (left.join().unwrap(), right.join().unwrap())
        });

        assert_eq!(
            [
                "YES: 3",
                "YES: a, b, p2, p3, p1, d",
                "YES: p2, p3, p1, d",
                "YES"
            ],
            left.map(Result::unwrap)
        );
        assert_eq!(["YES: 1", "YES"], right.map(Result::unwrap));
    }

    fn random_formula(rng: &mut StdRng, depth: u32) -> String {
        const SYMBOLS: [&str; 4] = ["a", "b", "c", "d"];
        if depth == 0 || rng.gen_bool(0.25) {
            return SYMBOLS[rng.gen_range(0..SYMBOLS.len())].to_string();
        }
        let l = random_formula(rng, depth - 1);
        let r = random_formula(rng, depth - 1);
        match rng.gen_range(0..5) {
            0 => format!("~{l}"),
            1 => format!("({l} & {r})"),
            2 => format!("({l} || {r})"),
            3 => format!("({l} => {r})"),
            _ => format!("({l} <=> {r})"),
        }
    }

    #[test]
    fn truth_table_agrees_with_resolution() {
        let mut rng = StdRng::seed_from_u64(0x1e_0e);
        let settings = Settings::default();

        for _ in 0..200 {
            let n = rng.gen_range(0..4);
            let kb: Vec<String> = (0..n).map(|_| random_formula(&mut rng, 3)).collect();
            let query = random_formula(&mut rng, 2);

            let tt = ask(MethodKind::TruthTable, &kb, &query, &settings).unwrap();
            let res = ask(MethodKind::Resolution, &kb, &query, &settings).unwrap();
            assert_eq!(
                tt.entailed(),
                res.entailed(),
                "{:?} |= {} disagrees",
                kb,
                query
            );
        }
    }
}
