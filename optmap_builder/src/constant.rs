pub(crate) const HELP_NAME: &str = "--help";
pub(crate) const HELP_SHORT: &str = "-h";

pub(crate) const HELP_COMMAND: &str = "help";
pub(crate) const HELP_COMMAND_USAGE: &str = "help <cmd>";
pub(crate) const HELP_COMMAND_MESSAGE: &str = "Show help for a command";

pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
