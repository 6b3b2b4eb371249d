//! Display capability record
//!
//! One set of screens serves every terminal; behaviour that differs on
//! small or slow terminals is switched by these flags.

/// Terminals at or below this width get the reduced presentation
pub const NARROW_TERMINAL_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Skip the splash animation and the sending spinner
    pub low_performance: bool,
    /// Mouse input is captured: clicking a field focuses it
    pub pointer_input: bool,
}

impl Capabilities {
    /// Pick the capability tier for the current terminal
    pub fn detect(terminal_width: u16, reduced_motion: bool, pointer_input: bool) -> Self {
        let low_performance = reduced_motion || terminal_width <= NARROW_TERMINAL_WIDTH;
        tracing::debug!(
            "capabilities: width={terminal_width} low_performance={low_performance} pointer_input={pointer_input}"
        );
        Self {
            low_performance,
            pointer_input,
        }
    }

    pub fn animations_enabled(&self) -> bool {
        !self.low_performance
    }
}
