//! Interactive prompts.

use std::io;

use anyhow::{Result, bail};
use console::{Key, Term};

use super::input::{InputEvent, TextInput};
use super::picker::{ListPicker, PickerEvent, PickerItem};

/// Everything a command may ask the user.
pub trait Prompter: Send {
    /// Yes/no question, defaulting to no.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Free text. Never returns an empty string.
    fn input(&mut self, message: &str, placeholder: &str) -> Result<String>;

    /// Pick one item and return its value, or `None` when the user quits.
    fn select(&mut self, title: &str, items: Vec<PickerItem>) -> Result<Option<String>>;
}

/// Prompts drawn on the controlling terminal.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Replace the previously drawn frame with `lines`.
    fn redraw(&self, lines: &[String], previous: usize) -> io::Result<usize> {
        if previous > 0 {
            self.term.clear_last_lines(previous)?;
        }
        for line in lines {
            self.term.write_line(line)?;
        }
        Ok(lines.len())
    }

    fn finish(&self, drawn: usize) -> io::Result<()> {
        self.term.clear_last_lines(drawn)?;
        self.term.show_cursor()
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    fn ensure_term(&self) -> Result<()> {
        if !self.term.is_term() {
            bail!("prompts need an interactive terminal");
        }
        Ok(())
    }

    fn read_input(
        &self,
        model: &mut TextInput,
        mut next_key: impl FnMut() -> io::Result<Key>,
    ) -> Result<String> {
        self.term.hide_cursor()?;
        let mut drawn = self.redraw(&model.render(), 0)?;

        loop {
            let key = next_key()?;
            match model.handle_key(&key) {
                InputEvent::Pending => drawn = self.redraw(&model.render(), drawn)?,
                InputEvent::Submitted(value) => {
                    self.finish(drawn)?;
                    return Ok(value);
                }
                InputEvent::Cancelled => {
                    self.finish(drawn)?;
                    bail!("input cancelled");
                }
            }
        }
    }

    fn read_choice(
        &self,
        picker: &mut ListPicker,
        mut next_key: impl FnMut() -> io::Result<Key>,
    ) -> Result<Option<String>> {
        self.term.hide_cursor()?;
        let mut drawn = self.redraw(&picker.render(), 0)?;

        loop {
            let key = next_key()?;
            match picker.handle_key(&key) {
                PickerEvent::Pending => drawn = self.redraw(&picker.render(), drawn)?,
                PickerEvent::Chosen(value) => {
                    self.finish(drawn)?;
                    return Ok(Some(value));
                }
                PickerEvent::Quit => {
                    self.finish(drawn)?;
                    return Ok(None);
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.ensure_term()?;
        self.term.write_str(&format!("{} [y/N] ", message))?;
        let answer = self.term.read_line()?;

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn input(&mut self, message: &str, placeholder: &str) -> Result<String> {
        self.ensure_term()?;
        let mut model = TextInput::new(message, placeholder);
        self.read_input(&mut model, || self.term.read_key())
    }

    fn select(&mut self, title: &str, items: Vec<PickerItem>) -> Result<Option<String>> {
        self.ensure_term()?;
        let mut picker = ListPicker::new(title, items);
        self.read_choice(&mut picker, || self.term.read_key())
    }
}
