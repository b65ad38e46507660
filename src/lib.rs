//! `optmap` is a schema driven command line option parser for Rust.
//!
//! Rather than binding options onto program variables, `optmap` parses the Cli tokens into a mapping from *field* to *value*.
//! The program declares a [`Schema`] (an ordered mapping of field identifiers to [`OptionDecl`]s), and receives back the parsed [`Options`] along with the leftover positional arguments.
//! `optmap` aims for the following:
//! * *Flexible value consumption*:
//! An option may take a single value, every value up to the next flag, or the rest of the input (see [`ConsumeMode`]).
//! * *Converted values*:
//! Raw tokens are converted into typed [`Value`]s by a [`Converter`], and conversion failures are reported as parse errors.
//! * *Sub-command paradigm*:
//! A [`CommandSet`] collects multiple named commands, each with its own schema and callback, into a single Cli.
//! * *Deterministic help*:
//! The help message is a pure function of the configuration; it does not depend on the terminal.
//!
//! # Usage
//! This page includes a few demos on using `optmap`.
//! More examples are outlined in the `demos/` directory of the source.
//!
//! ```no_run
#![doc = include_str!("../demos/hello.rs")]
//! ```
//!
//! ```console
//! $ hello -h
//!
//! Usage: hello [options]
//!
//! Options:
//!     --name, -n <value>    Who to greet.
//!     --times <num>         Number of greetings.
//!     --shout, -s
//!
//! $ hello -n you --times 2
//! Hello you.
//! Hello you.
//!
//! $ hello --times many
//! Parse error: Invalid value 'many' for option '--times': 'many' is not an integer.
//! --times many
//!         ^
//! <help message>
//! ```
//!
//! # Schema
//! Each field of a [`Schema`] is declared as either:
//! * [`OptionDecl::switch`]: a boolean presence flag, which consumes no value.
//! * [`OptionDecl::value`]: an option which consumes value(s), converted via its [`Converter`].
//!
//! By default a field is available on the Cli under the kebab-case form of its identifier (ex: `portNumber` and `port_number` are both `--port-number`).
//! Explicit names (via `name`) replace this derived name, while aliases (via `alias`) are added on top.
//!
//! When an option is never supplied, its field takes the declared default.
//! Without one, switches take `false`, repeatable and multi-value options take an empty sequence, and everything else has no value.
//! A `required` option that is never supplied is a parse error.
//! Notice, defaults *replace*; they are never merged with the supplied values.
//!
//! ### Converters
//! * [`Converter::text`]: any text, verbatim.
//! * [`Converter::integer`] and [`Converter::number`]: numeric values.
//! * [`Converter::one_of`]: one of a fixed set of keys.
//! * [`Converter::parsed`]: any type `T` implementing [`std::str::FromStr`].
//! * [`Converter::custom`]: an arbitrary conversion function.
//!
//! ### Sub-commands
//! Start from [`Program::command_set`] and register each [`Command`].
//! The first token selects the command; the remaining tokens are parsed by that command's own schema, and its callback receives the result.
//! The built-in `help` command shows the command listing, or (as `help <cmd>`) the help message of a single command.
//!
//! ```no_run
#![doc = include_str!("../demos/commands.rs")]
//! ```
//!
//! ```console
//! $ test
//!
//! Usage: test command [<args>]
//!
//! Commands:
//!     help <cmd>    Show help for a command
//!     add           Adds new things
//!     remove
//!
//! $ test add --count 2 apple pear
//! Adding 2 thing(s): ["apple", "pear"]
//!
//! $ test move
//! Parse error: Unknown command 'move'.
//! move
//! ^
//! <help message>
//! ```
//!
//! ### Loose demo
//! The following demonstrates the remaining configuration: custom usage text, consume modes, repeatable options and `FromStr` conversion.
//!
//! ```no_run
#![doc = include_str!("../demos/loose.rs")]
//! ```
//!
//! # Cli Semantics
//! `optmap` scans the Cli tokens left to right, according to the following set of rules.
//!
//! * A token starting with `--` is a long flag, and a token starting with `-` (but not a lone `-`) is a short flag.
//! Every other token is a positional argument, and is collected in order.
//! * A long flag may carry its value inline after the first `=` character.
//! For example, `--key=123` is equivalent to `--key 123`, and `--key=123=456` is equivalent to `--key 123=456`.
//! * A short flag may carry its value packed onto it.
//! For example, `-k123` is equivalent to `-k 123`.
//! The packed remainder is taken verbatim, so `-k=123` gives the value `=123`.
//! * An inline (or packed) value is always the sole value of that occurrence.
//! * Otherwise, a [`ConsumeMode::Single`] option takes precisely the next token (even if it looks like a flag).
//! A [`ConsumeMode::Multiple`] option takes tokens up to the next flag, and a [`ConsumeMode::All`] option takes every remaining token.
//! * A non-repeatable option keeps the value of its last occurrence.
//! A repeatable option accumulates every occurrence into a sequence.
//! * An unclaimed `--help` or `-h` prints the help message (only via the `main` entry points).
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events while normalizing the schema, matching the tokens and dispatching commands.
pub use optmap_builder::*;
