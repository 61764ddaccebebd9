/// Logging collaborator injected into the driver.
///
/// Side-effect only; never affects returned data. Tests substitute
/// [`NullLogger`] or a capturing implementation.
pub trait Logger {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
}

/// Logger printing to stdout/stderr.
pub struct ConsoleLogger {
    verbose: bool,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("debug: {message}");
        }
    }

    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn success(&self, message: &str) {
        println!("✓ {message}");
    }
}

/// Logger that discards everything.
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
}
