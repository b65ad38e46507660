use crate::parser::{ErrorContext, ParseError};

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
    fn print_error_help(&self, help: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        // The help message carries its own trailing newline.
        print!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }

    fn print_error_help(&self, help: String) {
        eprint!("{help}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::{ErrorContext, ParseError, UserInterface};
    use std::cell::RefCell;
    use std::sync::mpsc;

    pub(crate) type Consumed = (
        Option<String>,
        Option<String>,
        Option<ErrorContext>,
        Option<String>,
    );

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        message: RefCell<Option<Vec<String>>>,
        error: RefCell<Option<String>>,
        error_context: RefCell<Option<ErrorContext>>,
        error_help: RefCell<Option<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.message
                .borrow_mut()
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: ParseError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once.
            self.error_context.borrow_mut().replace(error_context);
        }

        fn print_error_help(&self, help: String) {
            self.error_help.borrow_mut().replace(help);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> Consumed {
            let InMemoryInterface {
                message,
                error,
                error_context,
                error_help,
            } = self;

            (
                message.take().map(|messages| messages.concat()),
                error.take(),
                error_context.take(),
                error_help.take(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context, error_help) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            assert_eq!(error_help, None);
            message.unwrap()
        }
    }

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let (error_context_tx, error_context_rx) = mpsc::channel();
        let (error_help_tx, error_help_rx) = mpsc::channel();
        let sender = SenderInterface {
            message_tx,
            error_tx,
            error_context_tx,
            error_help_tx,
        };
        let receiver = ReceiverInterface {
            message_rx,
            error_rx,
            error_context_rx,
            error_help_rx,
        };
        (sender, receiver)
    }

    /// Sends everything it is asked to print down a channel.
    /// The receiver only sees the end of the output once the sender is dropped.
    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<Option<String>>,
        error_tx: mpsc::Sender<Option<String>>,
        error_context_tx: mpsc::Sender<Option<ErrorContext>>,
        error_help_tx: mpsc::Sender<Option<String>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.message_tx.send(None).unwrap();
            self.error_tx.send(None).unwrap();
            self.error_context_tx.send(None).unwrap();
            self.error_help_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            self.message_tx.send(Some(message)).unwrap();
        }

        fn print_error(&self, error: ParseError) {
            self.error_tx.send(Some(error.to_string())).unwrap();
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once, with the receiver only taking the first.
            self.error_context_tx.send(Some(error_context)).unwrap();
        }

        fn print_error_help(&self, help: String) {
            self.error_help_tx.send(Some(help)).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<Option<String>>,
        error_rx: mpsc::Receiver<Option<String>>,
        error_context_rx: mpsc::Receiver<Option<ErrorContext>>,
        error_help_rx: mpsc::Receiver<Option<String>>,
    }

    impl ReceiverInterface {
        pub(crate) fn consume(self) -> Consumed {
            let ReceiverInterface {
                message_rx,
                error_rx,
                error_context_rx,
                error_help_rx,
            } = self;

            (
                drain(message_rx),
                drain(error_rx),
                error_context_rx.recv().unwrap(),
                drain(error_help_rx),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context, error_help) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            assert_eq!(error_help, None);
            message.unwrap()
        }
    }

    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Option<String> {
        let mut values = Vec::default();

        while let Some(message) = receiver.recv().unwrap() {
            values.push(message);
        }

        if values.is_empty() {
            None
        } else {
            Some(values.concat())
        }
    }

    mod tests {
        use super::*;

        #[test]
        fn in_memory_concatenates() {
            let interface = InMemoryInterface::default();

            interface.print("a\n".to_string());
            interface.print("b\n".to_string());

            assert_eq!(interface.consume_message(), "a\nb\n");
        }

        #[test]
        fn channel_error() {
            let (sender, receiver) = channel_interface();

            sender.print_error(ParseError::UnknownOption("--x".to_string()));
            sender.print_error_context(ErrorContext::new(0, &["--x"]));
            sender.print_error_help("help\n".to_string());
            drop(sender);

            let (message, error, error_context, error_help) = receiver.consume();
            assert_eq!(message, None);
            assert_eq!(error.unwrap(), "Parse error: Unknown option '--x'.");
            assert_eq!(error_context.unwrap(), ErrorContext::new(0, &["--x"]));
            assert_eq!(error_help.unwrap(), "help\n");
        }
    }
}
