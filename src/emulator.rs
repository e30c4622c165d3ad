use crate::command::{Command, Reply};
use crate::error::MockResult;
use crate::store::Namespace;
use crate::value::{Options, Value};
use tracing::debug;

/// An isolated emulated store. Each test scenario can own its own instance.
///
/// Not synchronized: callers that share one across threads must serialize access.
#[derive(Debug, Default)]
pub struct Emulator {
    namespace: Namespace,
}

impl Emulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command entry point: `name`, positional `args` (key first) and keyword `options`.
    pub fn execute_command(&mut self, name: &str, args: &[Value], options: &Options) -> MockResult<Reply> {
        debug!(command = name, args = args.len(), options = options.len(), "executing");
        let result = Command::parse(name, args, options).and_then(|cmd| self.execute(cmd));
        if let Err(e) = &result {
            debug!(command = name, error = %e, "command failed");
        }
        result
    }

    /// Run an already-parsed command.
    pub fn execute(&mut self, command: Command) -> MockResult<Reply> {
        command.execute(&mut self.namespace)
    }

    /// Clear every key.
    pub fn reset(&mut self) {
        self.namespace.reset();
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Render the namespace for debugging.
    pub fn inspect(&self) -> String {
        self.namespace.to_string()
    }
}
