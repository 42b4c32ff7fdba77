use std::fmt;

pub mod problem;
pub mod prop;

pub type ParseResult<T> = Result<T, ParseErr>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErr {
    Expected(String, String),
    MalformedToken(String, usize),
    EmptySentence,
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErr::Expected(expected, got) => write!(f, "Expected {} but got {}", expected, got),
            ParseErr::MalformedToken(spelling, pos) => {
                write!(f, "Malformed token '{}' at position {}", spelling, pos)
            }
            ParseErr::EmptySentence => write!(f, "Encountered an empty sentence"),
        }
    }
}

impl std::error::Error for ParseErr {}

#[derive(Debug, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub spelling: &'t str,
    /// Character offset of the token in the sentence.
    pub src_pos: usize,
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling)
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TokenKind {
    Not,
    And,
    Or,
    Impl,
    Equiv,
    LParen,
    RParen,
    Symbol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Not => "~",
            TokenKind::And => "&",
            TokenKind::Or => "||",
            TokenKind::Impl => "=>",
            TokenKind::Equiv => "<=>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Symbol => "symbol",
        };

        write!(f, "{}", s)
    }
}

/// Characters that end a symbol.
pub fn is_symbol_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '~' | '&' | '|' | '<' | '=' | '>')
}

pub struct Tokenizer<'f> {
    formula: &'f str,
    pos: usize,
}

impl<'f> Tokenizer<'f> {
    pub fn new(formula: &'f str) -> Self {
        Self { formula, pos: 0 }
    }

    fn advance(&mut self, bytes: usize, chars: usize) {
        self.formula = &self.formula[bytes..];
        self.pos += chars;
    }

    fn next_token(&mut self) -> Option<ParseResult<Token<'f>>> {
        let c = loop {
            let c = self.formula.chars().next()?;
            if c.is_whitespace() {
                self.advance(c.len_utf8(), 1);
            } else {
                break c;
            }
        };

        let (kind, size, chars) = match c {
            '~' => (TokenKind::Not, 1, 1),
            '&' => (TokenKind::And, 1, 1),
            '(' => (TokenKind::LParen, 1, 1),
            ')' => (TokenKind::RParen, 1, 1),
            '|' if self.formula.starts_with("||") => (TokenKind::Or, 2, 2),
            '=' if self.formula.starts_with("=>") => (TokenKind::Impl, 2, 2),
            '<' if self.formula.starts_with("<=>") => (TokenKind::Equiv, 3, 3),
            '|' | '=' | '<' | '>' => {
                let err = ParseErr::MalformedToken(c.to_string(), self.pos);
                // Nothing sensible follows a malformed operator
                self.formula = "";
                return Some(Err(err));
            }
            _ => {
                let mut size = 0;
                let mut chars = 0;
                for c in self.formula.chars() {
                    if is_symbol_break(c) {
                        break;
                    }
                    size += c.len_utf8();
                    chars += 1;
                }
                (TokenKind::Symbol, size, chars)
            }
        };

        let t = Token {
            kind,
            spelling: &self.formula[..size],
            src_pos: self.pos,
        };
        self.advance(size, chars);
        Some(Ok(t))
    }
}

impl<'f> Iterator for Tokenizer<'f> {
    type Item = ParseResult<Token<'f>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<'f> From<&'f str> for Tokenizer<'f> {
    fn from(f: &'f str) -> Self {
        Tokenizer::new(f)
    }
}

pub fn tokenize(formula: &str) -> ParseResult<Vec<Token<'_>>> {
    Tokenizer::new(formula).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(f: &str) -> Vec<TokenKind> {
        tokenize(f).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn operators() {
        use TokenKind::*;
        assert_eq!(
            vec![Not, Symbol, And, Symbol, Or, LParen, Symbol, Impl, Symbol, RParen, Equiv, Symbol],
            kinds("~a & b || (c => d) <=> e")
        );
        assert_eq!(vec![Symbol, Impl, Symbol], kinds("a=>b"));
        assert_eq!(vec![Symbol, Equiv, Symbol], kinds("a<=>b"));
    }

    #[test]
    fn symbols() {
        let ts = tokenize("  rain2  &wet_grass|| ~über ").unwrap();
        let spellings: Vec<&str> = ts.iter().map(|t| t.spelling).collect();
        assert_eq!(vec!["rain2", "&", "wet_grass", "||", "~", "über"], spellings);
        let positions: Vec<usize> = ts.iter().map(|t| t.src_pos).collect();
        assert_eq!(vec![2, 9, 10, 19, 22, 23], positions);
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Err(ParseErr::MalformedToken("|".to_string(), 2)),
            tokenize("a | b")
        );
        assert_eq!(
            Err(ParseErr::MalformedToken("<".to_string(), 2)),
            tokenize("a <= b")
        );
        assert!(tokenize("a > b").is_err());
        assert!(tokenize("a = b").is_err());
    }

    #[test]
    fn empty() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t ").unwrap().is_empty());
    }
}
