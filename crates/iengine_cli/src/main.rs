use std::{fs, path::PathBuf, process};

use log::{debug, error};

use iengine::{ask, parse_problem, MethodKind};

mod cli;

fn main() {
    env_logger::init();

    let matches = cli::cli().get_matches();
    let settings = cli::settings_from_args(&matches);
    let json = matches.get_flag("json");

    let (Some(method), Some(path)) = (
        matches.get_one::<MethodKind>("method"),
        matches.get_one::<PathBuf>("file"),
    ) else {
        unreachable!("clap enforces required arguments")
    };

    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Could not read {}: {e}", path.display());
            process::exit(1);
        }
    };

    let problem = match parse_problem(&text) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            process::exit(1);
        }
    };
    debug!(
        "Loaded {} sentences and query '{}' from {}",
        problem.kb.len(),
        problem.query,
        path.display()
    );

    let answer = match ask(*method, &problem.kb, &problem.query, &settings) {
        Ok(a) => a,
        Err(e) => {
            error!("{} failed on {}", method, path.display());
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string(&answer) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Could not serialise the answer: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{answer}");
    }
}
