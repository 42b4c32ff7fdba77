use crate::clause::{Clause, Literal};

/// All non-tautological resolvents of two clauses.
///
/// Every literal of `c1` whose complement occurs in `c2` yields its own
/// resolvent.
pub fn resolve(c1: &Clause, c2: &Clause) -> Vec<Clause> {
    c1.iter()
        .filter(|lit| c2.contains(&lit.complement()))
        .map(|lit| build_clause(c1, lit, c2))
        .filter(|c| !c.is_tautology())
        .collect()
}

/// `(c1 ∪ c2) \ {lit, ~lit}`
pub fn build_clause(c1: &Clause, lit: &Literal, c2: &Clause) -> Clause {
    let complement = lit.complement();
    let mut c: Clause = c1.iter().chain(c2.iter()).cloned().collect();
    c.remove(lit);
    c.remove(&complement);
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[&str]) -> Clause {
        lits.iter()
            .map(|l| match l.strip_prefix('~') {
                Some(name) => Literal::neg(name),
                None => Literal::pos(l),
            })
            .collect()
    }

    fn strs(cs: Vec<Clause>) -> Vec<String> {
        cs.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn single_pair() {
        assert_eq!(vec!["{Q}"], strs(resolve(&clause(&["P", "Q"]), &clause(&["~P"]))));
        assert_eq!(vec!["{}"], strs(resolve(&clause(&["Q"]), &clause(&["~Q"]))));
    }

    #[test]
    fn symmetric() {
        let c1 = clause(&["a", "~b", "c"]);
        let c2 = clause(&["b", "d"]);
        assert_eq!(resolve(&c1, &c2), resolve(&c2, &c1));
        assert_eq!(vec!["{a, c, d}"], strs(resolve(&c1, &c2)));
    }

    #[test]
    fn no_complements() {
        assert!(resolve(&clause(&["a", "b"]), &clause(&["a", "~c"])).is_empty());
        assert!(resolve(&clause(&[]), &clause(&["a"])).is_empty());
    }

    #[test]
    fn tautologies_are_dropped() {
        // Resolving on a leaves {b, ~b}, resolving on b leaves {a, ~a}
        let c1 = clause(&["a", "b"]);
        let c2 = clause(&["~a", "~b"]);
        assert!(resolve(&c1, &c2).is_empty());
    }

    #[test]
    fn every_complementary_pair() {
        let c1 = clause(&["a", "b", "c"]);
        let c2 = clause(&["~a", "~b", "c"]);
        // one resolvent per pair, both tautologies
        assert!(resolve(&c1, &c2).is_empty());

        let c1 = clause(&["a", "~b"]);
        let c2 = clause(&["~a", "c"]);
        let c3 = clause(&["b", "~c"]);
        assert_eq!(vec!["{~b, c}"], strs(resolve(&c1, &c2)));
        assert_eq!(vec!["{a, ~c}"], strs(resolve(&c1, &c3)));
    }

    #[test]
    fn never_tautological() {
        let cs = [
            clause(&["a", "b", "~c"]),
            clause(&["~a", "c"]),
            clause(&["~b", "c", "a"]),
            clause(&["c", "~c", "d"]),
        ];
        for c1 in &cs {
            for c2 in &cs {
                for r in resolve(c1, c2) {
                    assert!(!r.is_tautology(), "{} from {} and {}", r, c1, c2);
                }
            }
        }
    }
}
