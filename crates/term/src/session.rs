//! TerminalSession: raw mode + alternate screen for the lifetime of a game.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};
use tracing::debug;

pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Switch the terminal into game mode.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.queue(terminal::EnterAlternateScreen)?;
        out.queue(cursor::Hide)?;
        out.queue(terminal::DisableLineWrap)?;
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.flush()?;
        debug!(target: "term", "session entered");
        Ok(Self { active: true })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut out = io::stdout();
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(terminal::EnableLineWrap)?;
        out.queue(cursor::Show)?;
        out.queue(terminal::LeaveAlternateScreen)?;
        out.flush()?;
        terminal::disable_raw_mode()?;
        debug!(target: "term", "session exited");
        Ok(())
    }

    /// Terminal size in cells, falling back to 80x24.
    pub fn size() -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
