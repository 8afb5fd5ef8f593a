use argbind::{CommandLineParser, Outcome, Parameter};

fn main() {
    let mut parser = CommandLineParser::new("summer");
    let items = parser
        .add(
            Parameter::argument("item", Vec::<i64>::default())
                .env("SUMMER_ITEMS")
                .help("The items to sum."),
        )
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

    let sum: i64 = items.get().iter().sum();
    println!("Sum: {sum}");
}
