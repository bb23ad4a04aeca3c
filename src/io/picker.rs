//! Single-choice list picker.
//!
//! The picker is a plain state machine: [`ListPicker::handle_key`] moves the
//! cursor or finishes, [`ListPicker::render`] produces the lines to draw.
//! The terminal loop lives in [`super::prompt::TerminalPrompter`].

use console::Key;

/// Rows shown at once.
pub const PAGE_SIZE: usize = 10;

/// One selectable row: what the user sees and what the caller gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub name: String,
    pub value: String,
}

impl PickerItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Pending,
    Chosen(String),
    Quit,
}

pub struct ListPicker {
    title: String,
    items: Vec<PickerItem>,
    cursor: usize,
}

impl ListPicker {
    pub fn new(title: impl Into<String>, items: Vec<PickerItem>) -> Self {
        Self {
            title: title.into(),
            items,
            cursor: 0,
        }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: &Key) -> PickerEvent {
        let last = self.items.len().saturating_sub(1);

        match key {
            Key::ArrowUp | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::ArrowDown | Key::Char('j') => self.cursor = (self.cursor + 1).min(last),
            Key::PageUp | Key::ArrowLeft => self.cursor = self.cursor.saturating_sub(PAGE_SIZE),
            Key::PageDown | Key::ArrowRight => self.cursor = (self.cursor + PAGE_SIZE).min(last),
            Key::Home | Key::Char('g') => self.cursor = 0,
            Key::End | Key::Char('G') => self.cursor = last,
            Key::Enter => {
                return match self.items.get(self.cursor) {
                    Some(item) => PickerEvent::Chosen(item.value.clone()),
                    None => PickerEvent::Quit,
                };
            }
            Key::Escape | Key::CtrlC | Key::Char('q') | Key::Char('\u{3}') => {
                return PickerEvent::Quit;
            }
            _ => {}
        }

        PickerEvent::Pending
    }

    fn page_count(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![String::new(), format!("  Your {}", self.title), String::new()];

        if self.items.is_empty() {
            lines.push("    No items.".to_string());
        }

        let page = self.cursor / PAGE_SIZE;
        let start = page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.items.len());

        for (offset, item) in self.items[start..end].iter().enumerate() {
            let index = start + offset;
            if index == self.cursor {
                lines.push(format!("  > {}. {}", index + 1, item.name));
            } else {
                lines.push(format!("    {}. {}", index + 1, item.name));
            }
        }

        lines.push(String::new());
        if self.page_count() > 1 {
            lines.push(format!("    {}/{}", page + 1, self.page_count()));
        }
        lines.push("    ↑/k up • ↓/j down • enter choose • q quit".to_string());

        lines
    }
}
