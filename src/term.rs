use std::io::{stdout, IsTerminal, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::{Command, Frontend};
use crate::snake::Direction::*;

pub struct TermManager {
    height: i16,
    width: i16,
    stdout: Stdout,
}

impl TermManager {
    /// Checks the terminal can host an arena for `config`. Nothing about the
    /// terminal is changed until `setup`.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        let stdout = stdout();
        if !stdout.is_terminal() {
            return Err(GameError::EnvironmentUnsupported("stdout is not a terminal".into()));
        }

        let (cols, rows) = terminal::size()
            .map_err(|e| GameError::EnvironmentUnsupported(format!("cannot read terminal size: {}", e)))?;
        let (width, height) = (cols.min(i16::MAX as u16) as i16, rows.min(i16::MAX as u16) as i16);

        let (min_height, min_width) = config.min_arena();
        if height < min_height || width < min_width {
            return Err(GameError::EnvironmentUnsupported(format!(
                "need at least {}x{}, got {}x{}", min_width, min_height, width, height
            )));
        }

        Ok(TermManager { height, width, stdout })
    }

    /// `(height, width)` of the terminal at startup.
    pub fn size(&self) -> (i16, i16) {
        (self.height, self.width)
    }

    pub fn setup(&mut self) -> GameResult<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> GameResult<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Frontend for TermManager {
    /// Drains every pending event. Ctrl+C wins outright, otherwise the last
    /// direction pressed this frame is used.
    fn poll_command(&mut self) -> GameResult<Option<Command>> {
        let mut command = None;

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                match key_command(&ev) {
                    Some(Command::Quit) => return Ok(Some(Command::Quit)),
                    Some(turn) => command = Some(turn),
                    None => {}
                }
            }
        }

        Ok(command)
    }

    fn present(&mut self, arena: &Arena) -> GameResult<()> {
        for (row, line) in arena.rows().enumerate() {
            let line: String = line.iter().collect();
            queue!(self.stdout, cursor::MoveTo(0, row as u16), style::Print(line))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn wait_for_key(&mut self) -> GameResult<()> {
        loop {
            if let Event::Key(KeyEvent { kind: KeyEventKind::Press, .. }) = read()? {
                return Ok(());
            }
        }
    }
}

fn key_command(ev: &KeyEvent) -> Option<Command> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
        _ => None,
    }
}
