use crate::constant::*;
use crate::matcher::{Kind, OptionSpec};
use crate::model::ConsumeMode;
use crate::parser::interface::UserInterface;

const INDENT: &str = "    ";
const GUTTER: usize = 4;
pub(crate) const OPTION_COLUMN_MINIMUM: usize = 21;
pub(crate) const COMMAND_COLUMN_MINIMUM: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HelpLine {
    name: String,
    description: String,
}

impl HelpLine {
    pub(crate) fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.unwrap_or_default().to_string(),
        }
    }
}

impl From<&OptionSpec> for HelpLine {
    fn from(spec: &OptionSpec) -> Self {
        let mut name = spec.names().join(", ");

        if let Kind::Valued { converter, consume } = spec.kind() {
            name.push(' ');
            name.push_str(converter.placeholder());

            if matches!(consume, ConsumeMode::Multiple | ConsumeMode::All) {
                name.push_str("...");
            }
        }

        HelpLine::new(name, spec.description())
    }
}

/// A titled block of aligned name/description lines.
#[derive(Debug)]
pub(crate) struct Section {
    header: &'static str,
    lines: Vec<HelpLine>,
    width: usize,
}

impl Section {
    /// The name column is as wide as the longest name plus the gutter, but never narrower than `minimum`.
    pub(crate) fn new(header: &'static str, lines: Vec<HelpLine>, minimum: usize) -> Self {
        let longest = lines
            .iter()
            .map(|line| line.name.chars().count())
            .max()
            .unwrap_or(0);

        Self {
            header,
            lines,
            width: std::cmp::max(longest + GUTTER, minimum),
        }
    }

    #[cfg(test)]
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    fn render(&self, out: &mut String) {
        let width = self.width;
        out.push_str(&format!("\n{}:\n", self.header));

        for HelpLine { name, description } in &self.lines {
            let mut description_lines = description.split('\n');
            let first = description_lines.next().unwrap_or_default();
            out.push_str(&format!("{INDENT}{name:width$}{first}\n"));

            for line in description_lines {
                out.push_str(&format!("{INDENT}{:width$}{line}\n", ""));
            }
        }
    }
}

/// Renders the help message for a single parser or a command set.
///
/// The rendering is a pure function of the configuration.
#[derive(Debug)]
pub(crate) struct Printer {
    usage: String,
    description: Option<String>,
    section: Option<Section>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::options("program", None, None, &[])
    }

    /// The printer of a single (sub-command) parser.
    pub(crate) fn options(
        program: &str,
        usage: Option<String>,
        description: Option<String>,
        specs: &[OptionSpec],
    ) -> Self {
        let lines: Vec<HelpLine> = specs.iter().map(HelpLine::from).collect();
        let section = if lines.is_empty() {
            None
        } else {
            Some(Section::new("Options", lines, OPTION_COLUMN_MINIMUM))
        };

        Self {
            usage: usage.unwrap_or_else(|| format!("\nUsage: {program} [options]\n")),
            description,
            section,
        }
    }

    /// The printer of a command set.
    /// The built-in help command is always listed first.
    pub(crate) fn commands(program: &str, usage: Option<String>, commands: Vec<HelpLine>) -> Self {
        let mut lines = vec![HelpLine::new(HELP_COMMAND_USAGE, Some(HELP_COMMAND_MESSAGE))];
        lines.extend(commands);

        Self {
            usage: usage.unwrap_or_else(|| format!("\nUsage: {program} command [<args>]\n")),
            description: None,
            section: Some(Section::new("Commands", lines, COMMAND_COLUMN_MINIMUM)),
        }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = self.usage.clone();

        if let Some(description) = &self.description {
            out.push_str(&format!("\n{description}\n"));
        }

        if let Some(section) = &self.section {
            section.render(&mut out);
        }

        out
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        user_interface.print(self.render());
    }
}

/// The input tokens, with a caret under the offending token.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(index: usize, tokens: &[&str]) -> Self {
        Self {
            index,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        // Each preceding token contributes its length plus a separating space.
        let offset = self
            .tokens
            .iter()
            .take(self.index)
            .map(|token| token.chars().count() + 1)
            .sum::<usize>();
        let offset = std::cmp::min(offset, projection.chars().count());

        write!(f, "{projection}\n{:offset$}^", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Converter;
    use crate::matcher::Fallback;
    use crate::parser::util::InMemoryInterface;
    use rstest::rstest;

    fn valued(names: &[&str], converter: Converter, consume: ConsumeMode, description: Option<&str>) -> OptionSpec {
        OptionSpec::new(
            "field",
            names.iter().map(|n| n.to_string()).collect(),
            Kind::Valued { converter, consume },
            false,
            Fallback::Unset,
            description.map(String::from),
        )
    }

    fn switch(names: &[&str], description: Option<&str>) -> OptionSpec {
        OptionSpec::new(
            "field",
            names.iter().map(|n| n.to_string()).collect(),
            Kind::Switch,
            false,
            Fallback::Unset,
            description.map(String::from),
        )
    }

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::empty();
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help(&interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, "\nUsage: program [options]\n");
    }

    #[test]
    fn print_help_options() {
        // Setup
        let printer = Printer::options(
            "test remove",
            None,
            None,
            &[
                valued(&["--type"], Converter::text(), ConsumeMode::Single, Some("type of thing to remove")),
                valued(&["--count"], Converter::number(), ConsumeMode::Single, None),
                switch(&["--force"], None),
            ],
        );

        // Execute
        let message = printer.render();

        // Verify
        assert_eq!(
            message,
            "\nUsage: test remove [options]\n\nOptions:\n    --type <value>       type of thing to remove\n    --count <num>        \n    --force              \n"
        );
    }

    #[test]
    fn print_help_description() {
        // Setup
        let printer = Printer::options(
            "test add",
            None,
            Some("Adds new things".to_string()),
            &[
                valued(&["--type"], Converter::text(), ConsumeMode::Single, None),
                valued(&["--count"], Converter::number(), ConsumeMode::Single, None),
            ],
        );

        // Execute
        let message = printer.render();

        // Verify
        assert_eq!(
            message,
            "\nUsage: test add [options]\n\nAdds new things\n\nOptions:\n    --type <value>       \n    --count <num>        \n"
        );
    }

    #[test]
    fn print_help_aliases_multiline() {
        // Setup
        let printer = Printer::options(
            "hello",
            None,
            None,
            &[
                valued(&["-b", "--bar"], Converter::text(), ConsumeMode::Multiple, Some("A thing")),
                valued(
                    &["--times"],
                    Converter::integer(),
                    ConsumeMode::Single,
                    Some("Number of times to do something.\nDefault: 3"),
                ),
                valued(
                    &["--format"],
                    Converter::one_of("format", ["html", "markdown"]),
                    ConsumeMode::Single,
                    None,
                ),
                valued(&["--rest"], Converter::text(), ConsumeMode::All, None),
            ],
        );

        // Execute
        let message = printer.render();

        // Verify
        assert_eq!(
            message,
            concat!(
                "\nUsage: hello [options]\n",
                "\nOptions:\n",
                "    -b, --bar <value>...    A thing\n",
                "    --times <num>           Number of times to do something.\n",
                "                            Default: 3\n",
                "    --format <format>       \n",
                "    --rest <value>...       \n",
            )
        );
    }

    #[test]
    fn print_help_commands() {
        // Setup
        let printer = Printer::commands(
            "test",
            None,
            vec![
                HelpLine::new("add", Some("Adds new things")),
                HelpLine::new("remove", None),
            ],
        );

        // Execute
        let message = printer.render();

        // Verify
        assert_eq!(
            message,
            "\nUsage: test command [<args>]\n\nCommands:\n    help <cmd>    Show help for a command\n    add           Adds new things\n    remove        \n"
        );
    }

    #[test]
    fn print_help_usage() {
        // Setup
        let usage = "
Usage: strip <file>

Strips the file.
";
        let printer = Printer::options("strip", Some(usage.to_string()), None, &[]);

        // Execute
        let message = printer.render();

        // Verify
        assert_eq!(message, usage);
    }

    #[test]
    fn render_deterministic() {
        let specs = [
            valued(&["--name"], Converter::text(), ConsumeMode::Single, Some("a name")),
            switch(&["-f"], Some("force")),
        ];

        assert_eq!(
            Printer::options("p", None, None, &specs).render(),
            Printer::options("p", None, None, &specs).render()
        );
    }

    #[rstest]
    #[case(vec![], OPTION_COLUMN_MINIMUM, OPTION_COLUMN_MINIMUM)]
    #[case(vec!["--a"], OPTION_COLUMN_MINIMUM, OPTION_COLUMN_MINIMUM)]
    #[case(vec!["--a-very-long-option-name"], OPTION_COLUMN_MINIMUM, 29)]
    #[case(vec!["help <cmd>", "add"], COMMAND_COLUMN_MINIMUM, 14)]
    #[case(vec!["help <cmd>", "a-long-command"], COMMAND_COLUMN_MINIMUM, 18)]
    fn section_width(#[case] names: Vec<&str>, #[case] minimum: usize, #[case] expected: usize) {
        let section = Section::new(
            "Header",
            names.into_iter().map(|n| HelpLine::new(n, None)).collect(),
            minimum,
        );

        assert_eq!(section.width(), expected);
    }

    #[rstest]
    #[case(0, vec!["--abc", "x"], "--abc x\n^")]
    #[case(1, vec!["--abc", "x"], "--abc x\n      ^")]
    #[case(2, vec!["--abc", "x"], "--abc x\n       ^")]
    #[case(0, vec![], "\n^")]
    #[case(1, vec!["remove", "--type"], "remove --type\n       ^")]
    fn error_context(#[case] index: usize, #[case] tokens: Vec<&str>, #[case] expected: &str) {
        let error_context = ErrorContext::new(index, tokens.as_slice());

        assert_eq!(error_context.to_string(), expected);
    }
}
