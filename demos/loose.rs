use optmap::{ConsumeMode, Converter, OptionDecl, Program, Schema, Value};

#[derive(Debug)]
struct Port(u16);

impl std::str::FromStr for Port {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<u16>().map(Port).map_err(|e| e.to_string())
    }
}

fn main() {
    let parser = Program::new("loose")
        .usage("\nUsage: loose [options] <file>...\n\nRuns the files against some servers.\n")
        .help_if_empty(true)
        .parser(
            Schema::new()
                .field(
                    "hosts",
                    OptionDecl::value(Converter::text())
                        .consume(ConsumeMode::Multiple)
                        .description("Hosts to run against,\nup to the next option."),
                )
                .field(
                    "port",
                    OptionDecl::value(Converter::parsed::<Port>("port")).name("-p"),
                )
                .field(
                    "format",
                    OptionDecl::value(Converter::one_of("format", ["json", "text"]))
                        .default(Value::Choice("text".to_string())),
                )
                .field(
                    "define",
                    OptionDecl::value(Converter::text()).name("-D").repeatable(),
                )
                .field(
                    "rest",
                    OptionDecl::value(Converter::text())
                        .name("--rest")
                        .consume(ConsumeMode::All),
                ),
        );

    let parser = match parser {
        Ok(parser) => parser,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    let (options, files) = parser.main().into_parts();

    for (field, value) in options.iter() {
        println!("{field}: {value:?}");
    }

    println!("files: {files:?}");
}
