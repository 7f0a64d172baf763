use std::{fs, io::BufReader, path::Path};

use anyhow::{Context, Result};
use nfa::prelude::*;

use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("nfarun")
        .about("Loads NFA definitions and runs words on them")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .global(true)
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .subcommand(
            Command::new("run")
                .about("decides whether the word in the input file is accepted")
                .arg(Arg::new("definition").required(true))
                .arg(Arg::new("input").required(true))
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("print the configuration after every symbol"),
                )
                .arg(
                    Arg::new("separator")
                        .short('s')
                        .long("separator")
                        .help("SPACE, NOSEPARATOR or the literal string between two symbols"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("prints the transition table of an automaton")
                .arg(Arg::new("definition").required(true)),
        )
        .subcommand(
            Command::new("dump")
                .about("writes the normalized definition of an automaton")
                .arg(Arg::new("definition").required(true))
                .arg(Arg::new("output").short('o').long("output")),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

/// Maps the separator argument to a [`Separator`], the names are matched case-insensitively.
fn separator(argument: Option<&String>) -> Separator {
    match argument.map(String::as_str) {
        None => Separator::Characters,
        Some(name) if name.eq_ignore_ascii_case("space") => Separator::new(" "),
        Some(name) if name.eq_ignore_ascii_case("noseparator") => Separator::Characters,
        Some(literal) => Separator::new(literal),
    }
}

fn load_automaton(path: &str) -> Result<Automaton> {
    let file = fs::File::open(path).with_context(|| format!("could not open definition `{path}`"))?;
    let nfa = Automaton::from_reader(BufReader::new(file))
        .with_context(|| format!("could not load definition `{path}`"))?;
    info!("loaded automaton with {} states from {path}", nfa.size());
    Ok(nfa)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let nfa = load_automaton(required(matches, "definition")?)?;
    let path = required(matches, "input")?;
    let input =
        fs::read_to_string(path).with_context(|| format!("could not read input `{path}`"))?;
    let separator = separator(matches.get_one::<String>("separator"));
    debug!("splitting input with {separator:?}");

    let accepted = if matches.get_flag("trace") {
        let (accepted, trace) = nfa.trace_accepts(&input, &separator)?;
        println!("{trace}");
        accepted
    } else {
        nfa.accepts(&input, &separator)?
    };
    println!("{}", if accepted { "Accepted" } else { "Rejected" });
    Ok(())
}

fn dump(matches: &ArgMatches) -> Result<()> {
    let nfa = load_automaton(required(matches, "definition")?)?;
    match matches.get_one::<String>("output") {
        Some(output) => {
            fs::write(Path::new(output), nfa.to_string())
                .with_context(|| format!("could not write `{output}`"))?;
            info!("wrote definition to {output}");
        }
        None => print!("{nfa}"),
    }
    Ok(())
}

fn required<'m>(matches: &'m ArgMatches, id: &str) -> Result<&'m str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing argument `{id}`"))
}

pub fn main() -> Result<()> {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match matches.subcommand() {
        Some(("run", sub_matches)) => run(sub_matches),
        Some(("show", sub_matches)) => {
            let nfa = load_automaton(required(sub_matches, "definition")?)?;
            println!("{}", nfa.transition_table());
            Ok(())
        }
        Some(("dump", sub_matches)) => dump(sub_matches),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_names() {
        let space = String::from("Space");
        assert_eq!(separator(Some(&space)), Separator::new(" "));
        let none = String::from("NOSEPARATOR");
        assert_eq!(separator(Some(&none)), Separator::Characters);
        let literal = String::from(";");
        assert_eq!(separator(Some(&literal)), Separator::new(";"));
        assert_eq!(separator(None), Separator::Characters);
    }

    #[test]
    fn cli_is_consistent() {
        cli().debug_assert();
        let matches = cli()
            .try_get_matches_from(["nfarun", "run", "a.nfa", "w.txt", "--trace", "--verbosity=debug"])
            .unwrap();
        let (name, run) = matches.subcommand().unwrap();
        assert_eq!(name, "run");
        assert!(run.get_flag("trace"));
        assert_eq!(required(run, "input").unwrap(), "w.txt");
    }
}
