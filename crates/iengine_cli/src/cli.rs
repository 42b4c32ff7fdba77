use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use iengine::{MethodKind, Settings, DEFAULT_MAX_CLAUSES, DEFAULT_MAX_SYMBOLS};

pub fn cli() -> Command {
    Command::new("iengine")
        .about("Decides whether a propositional knowledge base entails a query")

        .arg(Arg::new("method")
            .required(true)
            .value_parser(value_parser!(MethodKind))
            .help("The inference method: tt, fc, bc or res."))

        .arg(Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("A problem file with a TELL section and an ASK section."))

        .arg(Arg::new("max_clauses")
            .long("max-clauses")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("Give up resolution once the clause set grows beyond this size.
Default: {DEFAULT_MAX_CLAUSES}")))

        .arg(Arg::new("max_rounds")
            .long("max-rounds")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help("Give up resolution after this many saturation rounds."))

        .arg(Arg::new("timeout_ms")
            .long("timeout-ms")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .help("Give up resolution after this many milliseconds."))

        .arg(Arg::new("max_symbols")
            .long("max-symbols")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("Refuse truth tables over more symbols than this.
Default: {DEFAULT_MAX_SYMBOLS}")))

        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the full outcome as JSON instead of the answer line."))
}

pub fn settings_from_args(args: &ArgMatches) -> Settings {
    let mut settings = Settings::default();

    if let Ok(Some(max)) = args.try_get_one::<usize>("max_clauses") {
        settings.resolution.budget.max_clauses = Some(*max)
    };

    if let Ok(Some(max)) = args.try_get_one::<usize>("max_rounds") {
        settings.resolution.budget.max_rounds = Some(*max)
    };

    if let Ok(Some(ms)) = args.try_get_one::<u64>("timeout_ms") {
        settings.resolution.budget.timeout_ms = Some(*ms)
    };

    if let Ok(Some(max)) = args.try_get_one::<usize>("max_symbols") {
        settings.truth_table.max_symbols = *max
    };

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let m = cli().try_get_matches_from(["iengine", "FC", "t.txt"]).unwrap();
        assert_eq!(
            Some(&MethodKind::ForwardChaining),
            m.get_one::<MethodKind>("method")
        );
        assert!(!m.get_flag("json"));

        let s = settings_from_args(&m);
        assert_eq!(Some(DEFAULT_MAX_CLAUSES), s.resolution.budget.max_clauses);
        assert_eq!(None, s.resolution.budget.max_rounds);
        assert_eq!(DEFAULT_MAX_SYMBOLS, s.truth_table.max_symbols);
    }

    #[test]
    fn budgets() {
        let m = cli()
            .try_get_matches_from([
                "iengine",
                "res",
                "t.txt",
                "--max-clauses",
                "10",
                "--max-rounds",
                "3",
                "--timeout-ms",
                "250",
                "--max-symbols",
                "8",
                "--json",
            ])
            .unwrap();
        let s = settings_from_args(&m);
        assert_eq!(Some(10), s.resolution.budget.max_clauses);
        assert_eq!(Some(3), s.resolution.budget.max_rounds);
        assert_eq!(Some(250), s.resolution.budget.timeout_ms);
        assert_eq!(8, s.truth_table.max_symbols);
        assert!(m.get_flag("json"));
    }

    #[test]
    fn unknown_method() {
        assert!(cli().try_get_matches_from(["iengine", "dpll", "t.txt"]).is_err());
        assert!(cli().try_get_matches_from(["iengine", "tt"]).is_err());
    }
}
