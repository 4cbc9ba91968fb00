//! Terminal lifecycle: raw mode and the alternate screen.

use std::io::{self, Stdout};
use std::panic;

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type ExamTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode on the alternate screen. The panic hook restores the
/// terminal first so a crash never leaves the shell unusable.
pub fn init() -> io::Result<ExamTerminal> {
    install_panic_hook();
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

/// Leave the alternate screen and return the terminal to cooked mode.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
