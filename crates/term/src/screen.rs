//! Screen: flushes rendered lines to a real terminal.
//!
//! Keeps the drawing API small: full-frame redraws of the line list the
//! view produced. Raw mode and the alternate screen are restored on exit.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::Print,
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};

pub struct Screen {
    stdout: io::Stdout,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for line in lines {
            self.stdout.queue(Print(line))?;
            self.stdout.queue(Print("\r\n"))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
