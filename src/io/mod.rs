//! Terminal I/O: streams, prompts and output formatting.

mod input;
mod picker;
mod printer;
mod prompt;
mod streams;

pub use picker::PickerItem;
pub use printer::{OutputFormat, PrintFlags, print};
pub use prompt::{Prompter, TerminalPrompter};
pub use streams::{ColorScheme, IoStreams};

#[cfg(test)]
pub use prompt::testing::{Answer, ScriptedPrompter};
#[cfg(test)]
pub use streams::OutputBuffer;
