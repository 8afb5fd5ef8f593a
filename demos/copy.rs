use argbind::{CommandLineParser, Outcome, Parameter};

fn main() {
    let mut parser = CommandLineParser::new("copy");
    let recursive = parser
        .add(Parameter::option("r recursive", false).help("Copy directories recursively."))
        .expect("Invalid argument parser configuration");
    let verbose = parser
        .add(Parameter::option("v verbose", false).env("COPY_VERBOSE"))
        .expect("Invalid argument parser configuration");
    let exclude = parser
        .add(Parameter::option("x exclude", Vec::<String>::default()).help("Patterns to skip."))
        .expect("Invalid argument parser configuration");
    let source = parser
        .add(Parameter::argument("SOURCE", String::default()))
        .expect("Invalid argument parser configuration");
    let target = parser
        .add(Parameter::argument("TARGET", String::default()))
        .expect("Invalid argument parser configuration");

    match parser.parse() {
        Ok(Outcome::Complete) => {}
        Ok(Outcome::Leftover(tokens)) => {
            eprintln!("Unexpected tokens: {}", tokens.join(" "));
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }

    if !source.is_set() || !target.is_set() {
        eprintln!("usage: copy [-rv] [-x PATTERN] SOURCE TARGET");
        std::process::exit(1);
    }

    if verbose.get() {
        for declaration in parser.declarations() {
            println!("{declaration:?}");
        }
    }

    println!(
        "Copying '{s}' to '{t}' (recursive: {r}, excluding: {x:?}).",
        s = source.get(),
        t = target.get(),
        r = recursive.get(),
        x = exclude.get(),
    );
}
