use std::process::ExitCode;

use anyhow::Result;
use argot::{Action, ArgumentParser, Nargs};

fn build_parser() -> Result<ArgumentParser> {
    let mut parser = ArgumentParser::new("greet")
        .with_description("Print a greeting for each name given.")
        .with_epilog("Example: greet --count 2 --loud Alice Bob");
    parser
        .add_argument(["names"])?
        .nargs(Nargs::OneOrMore)
        .help("who to greet");
    parser
        .add_argument(["--count", "-c"])?
        .value_type("int")
        .default(1)
        .help("how many times to greet each name");
    parser
        .add_argument(["--greeting", "-g"])?
        .default("Hello")
        .help("greeting word to use");
    parser
        .add_argument(["--loud"])?
        .action(Action::StoreTrue)
        .help("shout the greeting");
    parser
        .add_argument(["--verbose", "-v"])?
        .action(Action::Count)
        .help("increase chatter (repeatable)");
    Ok(parser)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("greet: {err}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut parser = build_parser()?;
    let namespace = match parser.parse_os() {
        Ok(namespace) => namespace,
        Err(err) if err.is_help() => {
            if let Some(text) = err.help_text() {
                println!("{text}");
            }
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            eprintln!("{}", parser.format_error(&err));
            return Ok(ExitCode::from(2));
        }
    };

    let names: Vec<String> = namespace.get("names")?;
    let count: i64 = namespace.get("count")?;
    let greeting: String = namespace.get("greeting")?;
    let loud: bool = namespace.get_or("loud", false)?;
    let verbosity: i64 = namespace.get_or("verbose", 0)?;

    if verbosity > 0 {
        eprintln!("greeting {} name(s), {} time(s) each", names.len(), count);
    }
    for name in &names {
        for _ in 0..count {
            let line = format!("{greeting}, {name}!");
            if loud {
                println!("{}", line.to_uppercase());
            } else {
                println!("{line}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
