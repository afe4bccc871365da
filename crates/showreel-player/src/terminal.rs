//! Terminal implementations of the shell collaborators.

use std::io::Write;

use showreel_core::shell::{Frame, Navigator, SceneRenderer};
use tracing::{info, warn};

/// Prints each frame as a numbered block of text.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write + Send> TerminalRenderer<W> {
    /// Renders into `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the renderer and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(error = %err, "terminal write failed");
        }
    }
}

fn format_frame(frame: &Frame) -> String {
    let sound = if frame.muted { "muted" } else { "sound on" };
    let mut text = format!(
        "[{}/{}] {}  ({sound})",
        frame.index + 1,
        frame.total,
        frame.title
    );
    if !frame.subtitle.is_empty() {
        text.push_str("\n      ");
        text.push_str(&frame.subtitle);
    }
    text
}

impl<W: Write + Send> SceneRenderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let text = format_frame(frame);
        self.write_line(&text);
    }

    fn finished(&mut self, skipped: bool) {
        self.write_line(if skipped { "-- skipped --" } else { "-- the end --" });
    }
}

/// Logs the hand-off to whatever follows the intro.
#[derive(Debug, Clone)]
pub struct LogNavigator {
    destination: String,
}

impl LogNavigator {
    /// Navigates to `destination`.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

impl Navigator for LogNavigator {
    fn navigate_to_next(&mut self) {
        info!(destination = %self.destination, "leaving intro");
    }
}
