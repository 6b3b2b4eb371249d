//! Raw-mode terminal session that is always restored

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Holds the terminal in raw mode on the alternate screen until dropped.
/// Dropping undoes every mode switch, including on early `?` returns.
pub struct TerminalGuard<W: Write> {
    out: W,
    mouse_capture: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W, mouse_capture: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on Drop restores whatever was switched
        let mut guard = Self { out, mouse_capture };
        execute!(guard.out, EnterAlternateScreen, EnableBracketedPaste)?;
        if guard.mouse_capture {
            execute!(guard.out, EnableMouseCapture)?;
        }
        Ok(guard)
    }

    /// Undo every mode switch in reverse order, raw mode last. Each step
    /// runs even if an earlier one failed; the first error is returned.
    fn restore(&mut self) -> io::Result<()> {
        let mut steps = Vec::new();
        if self.mouse_capture {
            steps.push(execute!(self.out, DisableMouseCapture));
        }
        steps.push(execute!(self.out, DisableBracketedPaste));
        steps.push(execute!(self.out, Show, LeaveAlternateScreen));
        steps.push(disable_raw_mode());
        steps.into_iter().collect()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!("failed to restore terminal: {err}");
        }
    }
}
