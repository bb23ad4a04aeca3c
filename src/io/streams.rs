//! Standard streams, colours and the progress spinner.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Icons and emphasis, plain when colours are off.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn success_icon(&self) -> String {
        if self.enabled {
            style("✓").green().force_styling(true).to_string()
        } else {
            "✓".to_string()
        }
    }

    pub fn failure_icon(&self) -> String {
        if self.enabled {
            style("X").red().force_styling(true).to_string()
        } else {
            "X".to_string()
        }
    }

    pub fn bold(&self, text: impl std::fmt::Display) -> String {
        if self.enabled {
            style(text).bold().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

pub struct IoStreams {
    out: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
    stdin_tty: bool,
    stdout_tty: bool,
    progress_enabled: bool,
    colors: ColorScheme,
    progress: Option<ProgressBar>,
}

impl IoStreams {
    /// Streams bound to the process's stdin, stdout and stderr.
    pub fn system() -> Self {
        let stdout_tty = io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();

        Self {
            out: Box::new(io::stdout()),
            input: Box::new(io::BufReader::new(io::stdin())),
            stdin_tty: io::stdin().is_terminal(),
            stdout_tty,
            progress_enabled: io::stderr().is_terminal(),
            colors: ColorScheme::new(stdout_tty && !no_color),
            progress: None,
        }
    }

    /// Streams over in-memory buffers. `tty` pretends both ends are terminals.
    #[cfg(test)]
    pub fn in_memory(
        input: impl BufRead + Send + 'static,
        out: impl Write + Send + 'static,
        tty: bool,
    ) -> Self {
        Self {
            out: Box::new(out),
            input: Box::new(input),
            stdin_tty: tty,
            stdout_tty: tty,
            progress_enabled: false,
            colors: ColorScheme::new(false),
            progress: None,
        }
    }

    pub fn out(&mut self) -> &mut (dyn Write + Send) {
        self.out.as_mut()
    }

    pub fn input(&mut self) -> &mut (dyn BufRead + Send) {
        self.input.as_mut()
    }

    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_tty
    }

    /// Interactive prompts need both a keyboard and a screen.
    pub fn can_prompt(&self) -> bool {
        self.stdin_tty && self.stdout_tty
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.colors
    }

    pub fn start_progress(&mut self, label: impl Into<String>) {
        self.stop_progress();
        if !self.progress_enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(label.into());
        spinner.enable_steady_tick(SPINNER_TICK);
        self.progress = Some(spinner);
    }

    pub fn update_progress(&mut self, label: impl Into<String>) {
        match &self.progress {
            Some(spinner) => spinner.set_message(label.into()),
            None => self.start_progress(label),
        }
    }

    pub fn stop_progress(&mut self) {
        if let Some(spinner) = self.progress.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for IoStreams {
    fn drop(&mut self) {
        self.stop_progress();
    }
}

/// Cloneable in-memory writer, so tests can read what a command printed.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl OutputBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("output buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_color_scheme() {
        let cs = ColorScheme::new(false);
        assert_eq!(cs.success_icon(), "✓");
        assert_eq!(cs.failure_icon(), "X");
        assert_eq!(cs.bold(12), "12");
    }

    #[test]
    fn test_colored_icons_keep_glyph() {
        let cs = ColorScheme::new(true);
        assert!(cs.success_icon().contains('✓'));
        assert_ne!(cs.success_icon(), "✓");
    }

    #[test]
    fn test_in_memory_streams() {
        let buffer = OutputBuffer::default();
        let mut io = IoStreams::in_memory(io::Cursor::new("yes\n"), buffer.clone(), true);
        assert!(io.can_prompt());

        writeln!(io.out(), "hello").unwrap();
        let mut line = String::new();
        io.input().read_line(&mut line).unwrap();

        assert_eq!(buffer.contents(), "hello\n");
        assert_eq!(line, "yes\n");
    }

    #[test]
    fn test_progress_is_noop_without_terminal() {
        let mut io = IoStreams::in_memory(io::empty(), io::sink(), false);
        io.start_progress("Working");
        io.update_progress("Still working");
        io.stop_progress();
        assert!(!io.can_prompt());
    }
}
