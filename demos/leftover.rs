use argbind::{CommandLineParser, Outcome, Parameter};

// Leftover tokens start a sub-command, which gets its own parser.
// Short clusters are normalized against the outer declarations, so sub-command options are long only.
fn main() {
    let mut parser = CommandLineParser::new("leftover");
    let debug = parser
        .add(Parameter::option("d debug", false).env("LEFTOVER_DEBUG"))
        .expect("Invalid argument parser configuration");

    let outcome = parser.parse().unwrap_or_else(|error| {
        eprintln!("{error}");
        std::process::exit(1);
    });

    match outcome {
        Outcome::Complete => println!("No sub-command (debug: {d}).", d = debug.get()),
        Outcome::Leftover(tokens) => {
            let (command, rest) = tokens.split_first().expect("leftover is never empty");
            let mut sub_parser = CommandLineParser::new(command.as_str());
            let count = sub_parser
                .add(Parameter::option("count", 1i64))
                .expect("Invalid argument parser configuration");
            let rest: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

            match sub_parser.parse_tokens(&rest) {
                Ok(Outcome::Complete) => println!(
                    "Running '{command}' {n} time(s) (debug: {d}).",
                    n = count.get(),
                    d = debug.get()
                ),
                Ok(Outcome::Leftover(tokens)) => {
                    eprintln!("Unexpected tokens: {}", tokens.join(" "));
                    std::process::exit(1);
                }
                Err(error) => {
                    eprintln!("{error}");
                    std::process::exit(1);
                }
            }
        }
    }
}
