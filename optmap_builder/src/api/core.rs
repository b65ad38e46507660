use std::rc::Rc;

use crate::api::{Options, Schema};
use crate::parser::{
    Callback, CommandEntry, CommandSet, ConsoleInterface, OptionParser, ParseUnit, SchemaError,
    UserInterface,
};

/// The program descriptor: the name and top level help behaviour shared by everything it builds.
///
/// ### Example
/// ```
/// # use optmap_builder as optmap;
/// use optmap::{Converter, OptionDecl, Program, Schema};
///
/// let parser = Program::new("program")
///     .parser(Schema::new().field("name", OptionDecl::value(Converter::text())))
///     .unwrap();
/// let parsed = parser.parse(&["--name", "abc"]).unwrap();
/// assert_eq!(parsed.options().text("name"), Some("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    usage: Option<String>,
    help_if_empty: bool,
}

impl Program {
    /// Describe a program by the name shown in its usage line.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: None,
            help_if_empty: false,
        }
    }

    /// Replace the generated usage line (and description) of the help message with custom text.
    /// If repeated, only the final usage will apply.
    ///
    /// The option (or command) listing still follows the custom text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage.replace(usage.into());
        self
    }

    /// Print the help message, rather than continuing, when no positional arguments remain after parsing.
    /// Only applies to the entry points (`main`/`main_tokens`); for a command set, it is the default for every command.
    pub fn help_if_empty(mut self, help_if_empty: bool) -> Self {
        self.help_if_empty = help_if_empty;
        self
    }

    /// Build the parser for `schema`.
    ///
    /// Fails if the schema is invalid (ex: two fields claim the same flag name).
    pub fn parser(&self, schema: Schema) -> Result<OptionParser, SchemaError> {
        self.build_parser(schema, Rc::new(ConsoleInterface::default()))
    }

    pub(crate) fn build_parser(
        &self,
        schema: Schema,
        user_interface: Rc<dyn UserInterface>,
    ) -> Result<OptionParser, SchemaError> {
        let unit = ParseUnit::new(
            &self.name,
            self.usage.clone(),
            None,
            schema.normalize()?,
            self.help_if_empty,
        )?;
        Ok(OptionParser::new(unit, user_interface))
    }

    /// Build an empty command set.
    /// Commands are added via [`CommandSet::command`].
    pub fn command_set<'a>(&self) -> CommandSet<'a> {
        self.build_command_set(Rc::new(ConsoleInterface::default()))
    }

    pub(crate) fn build_command_set<'a>(
        &self,
        user_interface: Rc<dyn UserInterface>,
    ) -> CommandSet<'a> {
        CommandSet::new(
            self.name.clone(),
            self.usage.clone(),
            self.help_if_empty,
            user_interface,
        )
    }
}

/// A named sub-command: its options, description and callback.
///
/// ### Example
/// ```
/// # use optmap_builder as optmap;
/// use optmap::{Command, Converter, OptionDecl, Schema};
///
/// let add = Command::new("add")
///     .description("Adds new things")
///     .schema(Schema::new().field("type", OptionDecl::value(Converter::text())))
///     .callback(|options, args| {
///         println!("Adding {:?} {args:?}", options.text("type"));
///     });
/// ```
pub struct Command<'a> {
    name: String,
    description: Option<String>,
    schema: Schema,
    help_if_empty: Option<bool>,
    callback: Option<Callback<'a>>,
}

impl<'a> std::fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .field("help_if_empty", &self.help_if_empty)
            .finish()
    }
}

impl<'a> Command<'a> {
    /// Create a command, invoked by `name` as the first token.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema: Schema::default(),
            help_if_empty: None,
            callback: None,
        }
    }

    /// Document the command, both in the command listing and in its own help message.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Declare the command's options.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Print the command's help message, rather than running its callback, when no positional arguments remain.
    /// Defaults to the program's setting.
    pub fn help_if_empty(mut self, help_if_empty: bool) -> Self {
        self.help_if_empty.replace(help_if_empty);
        self
    }

    /// Set the function run with the parsed options and positional arguments.
    /// If repeated, only the final callback will apply.
    pub fn callback(mut self, callback: impl Fn(Options, Vec<String>) + 'a) -> Self {
        self.callback.replace(Box::new(callback));
        self
    }
}

impl<'a> CommandSet<'a> {
    /// Register a command.
    ///
    /// Fails if the command's schema is invalid, or its name is empty, starts with `-`, is the reserved `help`, or is already registered.
    ///
    /// ### Example
    /// ```
    /// # use optmap_builder as optmap;
    /// use optmap::{Command, Program};
    ///
    /// let commands = Program::new("program")
    ///     .command_set()
    ///     .command(Command::new("add"))
    ///     .unwrap();
    ///
    /// assert!(commands.subcommand("add").is_some());
    /// assert!(Program::new("program").command_set().command(Command::new("help")).is_err());
    /// ```
    pub fn command(mut self, command: Command<'a>) -> Result<Self, SchemaError> {
        let Command {
            name,
            description,
            schema,
            help_if_empty,
            callback,
        } = command;
        let unit = ParseUnit::new(
            &format!("{} {name}", self.program()),
            None,
            description.clone(),
            schema.normalize()?,
            help_if_empty.unwrap_or(self.default_help_if_empty()),
        )?;
        let parser = OptionParser::new(unit, self.user_interface());
        self.register(CommandEntry::new(name, description, parser, callback))?;
        Ok(self)
    }
}
