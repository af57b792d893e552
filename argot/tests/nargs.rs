use anyhow::Result;
use argot::{Action, ArgumentParser, Error, Nargs};

#[test]
fn fixed_count_collects_exact_list() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--coords"])?.nargs(3).value_type("int");

    let namespace = parser.parse_args(["--coords", "1", "2", "3"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("coords")?,
        vec!["1", "2", "3"]
    );
    Ok(())
}

#[test]
fn fixed_count_shortfall_is_arity_error() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--coords"])?.nargs(3);

    let error = parser.parse_args(["--coords", "1", "2"]).unwrap_err();
    assert!(matches!(error, Error::Arity { .. }));
    assert_eq!(error.to_string(), "argument --coords: expected 3 arguments");
    Ok(())
}

#[test]
fn optional_nargs_consumes_value_when_present() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser
        .add_argument(["--file"])?
        .nargs(Nargs::Optional)
        .default("default.txt");

    let namespace = parser.parse_args(["--file", "input.txt"])?;
    assert_eq!(namespace.get::<String>("file")?, "input.txt");
    Ok(())
}

#[test]
fn optional_nargs_falls_back_to_default() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser
        .add_argument(["--file"])?
        .nargs(Nargs::Optional)
        .default("default.txt");

    let namespace = parser.parse_args(["--file"])?;
    assert_eq!(namespace.get::<String>("file")?, "default.txt");
    Ok(())
}

#[test]
fn optional_nargs_without_default_leaves_key_unset() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--file"])?.nargs(Nargs::Optional);

    let namespace = parser.parse_args(["--file"])?;
    assert!(!namespace.has("file"));
    Ok(())
}

#[test]
fn zero_or_more_collects_values() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--files"])?.nargs(Nargs::ZeroOrMore);

    let namespace = parser.parse_args(["--files", "file1.txt", "file2.txt", "file3.txt"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("files")?,
        vec!["file1.txt", "file2.txt", "file3.txt"]
    );
    Ok(())
}

#[test]
fn zero_or_more_accepts_nothing() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--files"])?.nargs(Nargs::ZeroOrMore);

    let namespace = parser.parse_args(["--files"])?;
    assert_eq!(namespace.get::<Vec<String>>("files")?, Vec::<String>::new());
    Ok(())
}

#[test]
fn one_or_more_collects_values() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--files"])?.nargs(Nargs::OneOrMore);

    let namespace = parser.parse_args(["--files", "file1.txt", "file2.txt"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("files")?,
        vec!["file1.txt", "file2.txt"]
    );
    Ok(())
}

#[test]
fn one_or_more_requires_at_least_one() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--files"])?.nargs(Nargs::OneOrMore);

    let error = parser.parse_args(["--files"]).unwrap_err();
    assert!(matches!(error, Error::Arity { .. }));
    assert_eq!(
        error.to_string(),
        "argument --files: expected at least one argument"
    );
    Ok(())
}

#[test]
fn greedy_consumption_stops_at_options() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["--files"])?.nargs(Nargs::ZeroOrMore);
    parser.add_argument(["--verbose"])?.action(Action::StoreTrue);

    let namespace = parser.parse_args(["--files", "a.txt", "b.txt", "--verbose"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("files")?,
        vec!["a.txt", "b.txt"]
    );
    assert!(namespace.get::<bool>("verbose")?);
    Ok(())
}

#[test]
fn remainder_takes_everything_verbatim() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["command"])?;
    parser.add_argument(["args"])?.nargs(Nargs::Remainder);

    let namespace =
        parser.parse_args(["git", "commit", "-m", "message", "--author", "me"])?;
    assert_eq!(namespace.get::<String>("command")?, "git");
    assert_eq!(
        namespace.get::<Vec<String>>("args")?,
        vec!["commit", "-m", "message", "--author", "me"]
    );
    Ok(())
}

#[test]
fn remainder_preserves_bundles_and_inline_values() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["command"])?;
    parser.add_argument(["args"])?.nargs(Nargs::Remainder);

    let namespace = parser.parse_args(["run", "sub", "-xyz", "--opt=value"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("args")?,
        vec!["sub", "-xyz", "--opt=value"]
    );
    Ok(())
}

#[test]
fn positional_one_or_more() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["files"])?.nargs(Nargs::OneOrMore);

    let namespace = parser.parse_args(["file1.txt", "file2.txt", "file3.txt"])?;
    assert_eq!(
        namespace.get::<Vec<String>>("files")?,
        vec!["file1.txt", "file2.txt", "file3.txt"]
    );
    Ok(())
}

#[test]
fn positional_fixed_count() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["coords"])?.nargs(2);

    let namespace = parser.parse_args(["10", "20"])?;
    assert_eq!(namespace.get::<Vec<String>>("coords")?, vec!["10", "20"]);
    Ok(())
}

#[test]
fn positional_zero_or_more_may_be_absent() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["files"])?.nargs(Nargs::ZeroOrMore);

    let namespace = parser.parse_args(Vec::<String>::new())?;
    assert_eq!(
        namespace.get_or("files", Vec::<String>::new())?,
        Vec::<String>::new()
    );
    Ok(())
}

#[test]
fn positional_shortfall_is_arity_error() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser.add_argument(["coords"])?.nargs(2);
    parser.add_argument(["--verbose"])?.action(Action::StoreTrue);

    // Greedy absorption stops at the option, leaving the count short.
    let error = parser.parse_args(["10", "--verbose", "20"]).unwrap_err();
    assert!(matches!(error, Error::Arity { .. }));
    Ok(())
}

#[test]
fn mixed_optionals_and_positionals() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser
        .add_argument(["--verbose", "-v"])?
        .action(Action::StoreTrue);
    parser.add_argument(["command"])?;
    parser.add_argument(["args"])?.nargs(Nargs::OneOrMore);

    let namespace = parser.parse_args(["--verbose", "process", "input1", "input2"])?;
    assert!(namespace.get::<bool>("verbose")?);
    assert_eq!(namespace.get::<String>("command")?, "process");
    assert_eq!(
        namespace.get::<Vec<String>>("args")?,
        vec!["input1", "input2"]
    );
    Ok(())
}

#[test]
fn fixed_count_validates_each_value() -> Result<()> {
    let mut parser = ArgumentParser::new("test_prog");
    parser
        .add_argument(["--numbers"])?
        .nargs(3)
        .value_type("int");

    let namespace = parser.parse_args(["--numbers", "1", "2", "3"])?;
    // Multi-value results keep the raw collected strings.
    assert_eq!(
        namespace.get::<Vec<String>>("numbers")?,
        vec!["1", "2", "3"]
    );

    let error = parser.parse_args(["--numbers", "1", "x", "3"]).unwrap_err();
    assert!(matches!(error, Error::Conversion { .. }));
    Ok(())
}
