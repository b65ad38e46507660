use std::env;
use std::rc::Rc;

use crate::api::{Options, ParsedArgs};
use crate::constant::*;
use crate::matcher::{classify, OptionSpec};
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::{ErrorContext, HelpLine, Printer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) type Callback<'a> = Box<dyn Fn(Options, Vec<String>) + 'a>;

#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Parsed(ParsedArgs),
    Help,
}

/// A parser paired with its help printer.
#[derive(Debug)]
pub(crate) struct ParseUnit {
    parser: Parser,
    printer: Printer,
    help_if_empty: bool,
}

impl ParseUnit {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", None, None, Vec::default(), false).unwrap()
    }

    pub(crate) fn new(
        program: &str,
        usage: Option<String>,
        description: Option<String>,
        specs: Vec<OptionSpec>,
        help_if_empty: bool,
    ) -> Result<Self, SchemaError> {
        let printer = Printer::options(program, usage, description, &specs);

        Ok(Self {
            parser: Parser::new(specs)?,
            printer,
            help_if_empty,
        })
    }

    pub(crate) fn help(&self) -> String {
        self.printer.render()
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        self.printer.print_help(user_interface);
    }

    /// Parse without any help handling: `--help` is just another unknown option.
    pub(crate) fn parse(&self, tokens: &[&str]) -> Result<ParsedArgs, (usize, ParseError)> {
        match self.parser.consume(tokens, false)? {
            Action::Continue(parsed) => Ok(parsed),
            Action::PrintHelp => {
                unreachable!("internal error - help is never requested when it is not recognized.")
            }
        }
    }

    /// Parse, recognizing the help flags and honouring `help_if_empty`.
    pub(crate) fn invoke(&self, tokens: &[&str]) -> Result<Outcome, (usize, ParseError)> {
        match self.parser.consume(tokens, true)? {
            Action::Continue(parsed) => {
                if self.help_if_empty && parsed.args().is_empty() {
                    Ok(Outcome::Help)
                } else {
                    Ok(Outcome::Parsed(parsed))
                }
            }
            Action::PrintHelp => Ok(Outcome::Help),
        }
    }
}

/// A parse failure, along with the help message relevant to where it happened.
#[derive(Debug, PartialEq)]
pub(crate) struct Failure {
    offset: usize,
    error: ParseError,
    help: String,
}

/// Print the failure to the error stream, producing the exit code.
pub(crate) fn report(
    user_interface: &(impl UserInterface + ?Sized),
    tokens: &[&str],
    failure: Failure,
) -> i32 {
    let Failure {
        offset,
        error,
        help,
    } = failure;
    user_interface.print_error(error);
    user_interface.print_error_context(ErrorContext::new(offset, tokens));
    user_interface.print_error_help(help);
    1
}

fn collect_args() -> Vec<String> {
    env::args().skip(1).collect()
}

/// The configured option parser.
/// Built via [`Program::parser`](crate::Program::parser).
pub struct OptionParser {
    unit: ParseUnit,
    user_interface: Rc<dyn UserInterface>,
}

impl std::fmt::Debug for OptionParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionParser")
            .field("unit", &self.unit)
            .finish()
    }
}

impl OptionParser {
    pub(crate) fn new(unit: ParseUnit, user_interface: Rc<dyn UserInterface>) -> Self {
        Self {
            unit,
            user_interface,
        }
    }

    /// Parse the input tokens into option values and positional arguments.
    ///
    /// This is a pure function of the configuration and the tokens: nothing is printed, and `--help`/`-h` are not treated specially.
    ///
    /// ### Example
    /// ```
    /// # use optmap_builder as optmap;
    /// use optmap::{Converter, OptionDecl, Program, Schema, Value};
    ///
    /// let parser = Program::new("program")
    ///     .parser(Schema::new().field("times", OptionDecl::value(Converter::integer())))
    ///     .unwrap();
    /// let parsed = parser.parse(&["--times", "3", "a"]).unwrap();
    ///
    /// assert_eq!(parsed.options().get("times"), Some(&Value::Integer(3)));
    /// assert_eq!(parsed.args(), ["a"]);
    /// ```
    pub fn parse(&self, tokens: &[&str]) -> Result<ParsedArgs, ParseError> {
        self.unit.parse(tokens).map_err(|(_, error)| error)
    }

    /// The help message.
    pub fn help(&self) -> String {
        self.unit.help()
    }

    /// Run the parser against the input tokens, as the program's entry point would.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser displays the help message and returns `Err(0)`.
    /// Likewise when `help_if_empty` is configured and no positional arguments remain.
    /// If parsing fails, the parser displays the error (with its context and the help message) and returns `Err(1)`.
    pub fn main_tokens(&self, tokens: &[&str]) -> Result<ParsedArgs, i32> {
        match self.unit.invoke(tokens) {
            Ok(Outcome::Parsed(parsed)) => Ok(parsed),
            Ok(Outcome::Help) => {
                self.unit.print_help(&*self.user_interface);
                Err(0)
            }
            Err((offset, error)) => Err(report(
                &*self.user_interface,
                tokens,
                Failure {
                    offset,
                    error,
                    help: self.help(),
                },
            )),
        }
    }

    /// Run the parser against the command line [`env::args`].
    ///
    /// Behaves as [`OptionParser::main_tokens`], except that it exits the process (via `std::process::exit`) instead of returning an exit code.
    pub fn main(&self) -> ParsedArgs {
        let command_input = collect_args();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        match self.main_tokens(tokens.as_slice()) {
            Ok(parsed) => parsed,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }
}

pub(crate) struct CommandEntry<'a> {
    name: String,
    description: Option<String>,
    parser: OptionParser,
    callback: Option<Callback<'a>>,
}

impl<'a> CommandEntry<'a> {
    pub(crate) fn new(
        name: String,
        description: Option<String>,
        parser: OptionParser,
        callback: Option<Callback<'a>>,
    ) -> Self {
        Self {
            name,
            description,
            parser,
            callback,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Dispatch {
    Ran,
    Help,
}

/// A set of named sub-commands, each with its own options and callback.
/// Built via [`Program::command_set`](crate::Program::command_set).
pub struct CommandSet<'a> {
    program: String,
    usage: Option<String>,
    help_if_empty: bool,
    entries: Vec<CommandEntry<'a>>,
    user_interface: Rc<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for CommandSet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSet")
            .field("program", &self.program)
            .field(
                "commands",
                &self
                    .entries
                    .iter()
                    .map(|entry| entry.name.as_str())
                    .collect::<Vec<&str>>(),
            )
            .finish()
    }
}

impl<'a> CommandSet<'a> {
    pub(crate) fn new(
        program: String,
        usage: Option<String>,
        help_if_empty: bool,
        user_interface: Rc<dyn UserInterface>,
    ) -> Self {
        Self {
            program,
            usage,
            help_if_empty,
            entries: Vec::default(),
            user_interface,
        }
    }

    pub(crate) fn program(&self) -> &str {
        &self.program
    }

    pub(crate) fn default_help_if_empty(&self) -> bool {
        self.help_if_empty
    }

    pub(crate) fn user_interface(&self) -> Rc<dyn UserInterface> {
        self.user_interface.clone()
    }

    pub(crate) fn register(&mut self, entry: CommandEntry<'a>) -> Result<(), SchemaError> {
        if entry.name.is_empty() {
            return Err(SchemaError("Command names cannot be empty.".to_string()));
        }

        if entry.name.starts_with(SHORT_PREFIX) {
            return Err(SchemaError(format!(
                "Command '{}' cannot start with '{SHORT_PREFIX}'.",
                entry.name
            )));
        }

        if entry.name == HELP_COMMAND {
            return Err(SchemaError(format!(
                "Command '{HELP_COMMAND}' is reserved."
            )));
        }

        if self.entry(&entry.name).is_some() {
            return Err(SchemaError(format!(
                "Cannot duplicate the command '{}'.",
                entry.name
            )));
        }

        self.entries.push(entry);
        Ok(())
    }

    fn entry(&self, name: &str) -> Option<&CommandEntry<'a>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    fn printer(&self) -> Printer {
        let lines = self
            .entries
            .iter()
            .map(|entry| HelpLine::new(entry.name.as_str(), entry.description.as_deref()))
            .collect();
        Printer::commands(&self.program, self.usage.clone(), lines)
    }

    fn print_help(&self) {
        self.printer().print_help(&*self.user_interface);
    }

    /// The help message listing the commands.
    pub fn help(&self) -> String {
        self.printer().render()
    }

    /// The parser of a registered command.
    pub fn subcommand(&self, name: &str) -> Option<&OptionParser> {
        self.entry(name).map(|entry| &entry.parser)
    }

    fn dispatch(&self, tokens: &[&str]) -> Result<Dispatch, Failure> {
        let first = match tokens.first() {
            Some(first) => *first,
            None => {
                self.print_help();
                return Ok(Dispatch::Help);
            }
        };

        if classify(first).is_flag() {
            if first == HELP_NAME || first == HELP_SHORT {
                self.print_help();
                return Ok(Dispatch::Help);
            }

            return Err(Failure {
                offset: 0,
                error: ParseError::UnknownOption(first.to_string()),
                help: self.help(),
            });
        }

        if first == HELP_COMMAND {
            return match tokens.get(1) {
                None => {
                    self.print_help();
                    Ok(Dispatch::Help)
                }
                Some(name) => match self.entry(name) {
                    Some(entry) => {
                        entry.parser.unit.print_help(&*self.user_interface);
                        Ok(Dispatch::Help)
                    }
                    None => Err(Failure {
                        offset: 1,
                        error: ParseError::UnknownCommand(name.to_string()),
                        help: self.help(),
                    }),
                },
            };
        }

        let entry = self.entry(first).ok_or_else(|| Failure {
            offset: 0,
            error: ParseError::UnknownCommand(first.to_string()),
            help: self.help(),
        })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching to command '{first}'.");
        }

        match entry.parser.unit.invoke(&tokens[1..]) {
            Ok(Outcome::Parsed(parsed)) => {
                if let Some(callback) = &entry.callback {
                    let (options, args) = parsed.into_parts();
                    callback(options, args);
                }

                Ok(Dispatch::Ran)
            }
            Ok(Outcome::Help) => {
                entry.parser.unit.print_help(&*self.user_interface);
                Ok(Dispatch::Help)
            }
            Err((offset, error)) => Err(Failure {
                // Account for the command name token.
                offset: offset + 1,
                error,
                help: entry.parser.help(),
            }),
        }
    }

    /// Run the command named by the first token against the remaining tokens.
    ///
    /// Help requests (an empty token list, `--help`/`-h`, or the `help` command) print the relevant help message and return `Ok(())` without running any callback.
    ///
    /// ### Example
    /// ```
    /// # use optmap_builder as optmap;
    /// use optmap::{Command, Program};
    /// use std::cell::Cell;
    ///
    /// let runs = Cell::new(0);
    /// let commands = Program::new("program")
    ///     .command_set()
    ///     .command(Command::new("run").callback(|_, _| runs.set(runs.get() + 1)))
    ///     .unwrap();
    ///
    /// commands.execute(&["run"]).unwrap();
    /// assert_eq!(runs.get(), 1);
    /// ```
    pub fn execute(&self, tokens: &[&str]) -> Result<(), ParseError> {
        self.dispatch(tokens)
            .map(|_| ())
            .map_err(|failure| failure.error)
    }

    /// Run the command set against the input tokens, as the program's entry point would.
    ///
    /// Returns `Err(0)` when help was displayed instead of running a command.
    /// If parsing fails, the error (with its context and the relevant help message) is displayed and `Err(1)` is returned.
    pub fn main_tokens(&self, tokens: &[&str]) -> Result<(), i32> {
        match self.dispatch(tokens) {
            Ok(Dispatch::Ran) => Ok(()),
            Ok(Dispatch::Help) => Err(0),
            Err(failure) => Err(report(&*self.user_interface, tokens, failure)),
        }
    }

    /// Run the command set against the command line [`env::args`].
    ///
    /// Behaves as [`CommandSet::main_tokens`], except that it exits the process (via `std::process::exit`) instead of returning an exit code.
    pub fn main(&self) {
        let command_input = collect_args();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        if let Err(exit_code) = self.main_tokens(tokens.as_slice()) {
            std::process::exit(exit_code);
        }
    }
}
