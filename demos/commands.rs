use optmap::{Command, Converter, OptionDecl, Program, Schema};

fn main() {
    let commands = Program::new("test")
        .command_set()
        .command(
            Command::new("add")
                .description("Adds new things")
                .schema(
                    Schema::new()
                        .field("type", OptionDecl::value(Converter::text()))
                        .field("count", OptionDecl::value(Converter::number())),
                )
                .callback(|options, args| {
                    let count = options.number("count").unwrap_or(1.0);
                    let kind = options.text("type").unwrap_or("thing");
                    println!("Adding {count} {kind}(s): {args:?}");
                }),
        )
        .and_then(|commands| {
            commands.command(
                Command::new("remove")
                    .schema(
                        Schema::new()
                            .field(
                                "type",
                                OptionDecl::value(Converter::text())
                                    .description("type of thing to remove"),
                            )
                            .field("count", OptionDecl::value(Converter::number()))
                            .field("force", OptionDecl::switch()),
                    )
                    .help_if_empty(true)
                    .callback(|options, args| {
                        if options.flag("force") {
                            println!("Forcibly removing {args:?}");
                        } else {
                            println!("Removing {args:?}");
                        }
                    }),
            )
        })
        .expect("the commands are valid");

    commands.main();
}
