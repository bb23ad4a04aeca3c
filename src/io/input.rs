//! Single-line text input.

use console::Key;

pub const CHAR_LIMIT: usize = 156;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Pending,
    Submitted(String),
    Cancelled,
}

pub struct TextInput {
    message: String,
    placeholder: String,
    value: Vec<char>,
    cursor: usize,
}

impl TextInput {
    pub fn new(message: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            placeholder: placeholder.into(),
            value: Vec::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Enter on an empty value is ignored; the caller always gets a name.
    pub fn handle_key(&mut self, key: &Key) -> InputEvent {
        match key {
            Key::Enter => {
                let value = self.value();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return InputEvent::Pending;
                }
                return InputEvent::Submitted(trimmed.to_string());
            }
            Key::Escape | Key::CtrlC | Key::Char('\u{3}') => return InputEvent::Cancelled,
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            Key::Del => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            Key::ArrowLeft => self.cursor = self.cursor.saturating_sub(1),
            Key::ArrowRight => self.cursor = (self.cursor + 1).min(self.value.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.value.len(),
            Key::Char(c) if !c.is_control() => {
                if self.value.len() < CHAR_LIMIT {
                    self.value.insert(self.cursor, *c);
                    self.cursor += 1;
                }
            }
            _ => {}
        }

        InputEvent::Pending
    }

    pub fn render(&self) -> Vec<String> {
        let field = if self.value.is_empty() {
            console::style(&self.placeholder).dim().to_string()
        } else {
            let (before, after) = self.value.split_at(self.cursor);
            format!(
                "{}|{}",
                before.iter().collect::<String>(),
                after.iter().collect::<String>()
            )
        };

        vec![self.message.clone(), String::new(), format!("> {field}")]
    }
}
