use std::fmt;

use serde::{Deserialize, Serialize};

/// Knowledge base and query as read from a problem file.
///
/// ```text
/// TELL
/// p2 => p3; p3 => p1; c => e; b & e => f; a; b; p2;
/// ASK
/// d
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Problem {
    pub kb: Vec<String>,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemErr {
    MissingKnowledgeBase,
    MissingQuery,
}

impl fmt::Display for ProblemErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemErr::MissingKnowledgeBase => {
                write!(f, "Knowledge base is missing (expected sentences after TELL)")
            }
            ProblemErr::MissingQuery => write!(f, "Query is missing (expected a sentence after ASK)"),
        }
    }
}

impl std::error::Error for ProblemErr {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Tell,
    Ask,
}

pub fn parse_problem(text: &str) -> Result<Problem, ProblemErr> {
    let mut section = Section::Preamble;
    let mut tell = String::new();
    let mut query = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with("TELL") {
            section = Section::Tell;
        } else if line.starts_with("ASK") {
            section = Section::Ask;
        } else if !line.is_empty() {
            match section {
                Section::Tell => {
                    tell.push_str(line);
                    tell.push(';');
                }
                Section::Ask => query = Some(line.to_string()),
                Section::Preamble => {}
            }
        }
    }

    let kb: Vec<String> = split_sentences(&tell);
    if kb.is_empty() {
        return Err(ProblemErr::MissingKnowledgeBase);
    }
    let query = query.ok_or(ProblemErr::MissingQuery)?;

    Ok(Problem { kb, query })
}

/// Splits `;`-separated sentences, dropping empty entries.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
