use optmap::{Converter, OptionDecl, Program, Schema};

fn main() {
    let parser = Program::new("hello")
        .parser(
            Schema::new()
                .field(
                    "name",
                    OptionDecl::value(Converter::text())
                        .alias("-n")
                        .default("world")
                        .description("Who to greet."),
                )
                .field(
                    "times",
                    OptionDecl::value(Converter::integer())
                        .default(1i64)
                        .description("Number of greetings."),
                )
                .field("shout", OptionDecl::switch().alias("-s")),
        )
        .expect("the schema is valid");

    let parsed = parser.main();
    let options = parsed.options();
    let name = options.text("name").unwrap_or_default();
    let greeting = if options.flag("shout") {
        format!("HELLO {}!", name.to_uppercase())
    } else {
        format!("Hello {name}.")
    };

    for _ in 0..options.integer("times").unwrap_or(1) {
        println!("{greeting}");
    }
}
