use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// 編輯器關心的終端事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

pub struct Terminal {
    size: (u16, u16),
}

impl Terminal {
    /// 進入原始模式和備用螢幕，離開時由 `Drop` 恢復
    pub fn new() -> Result<Self> {
        Self::enter_raw_mode()?;
        let size = terminal::size()?;
        log::debug!("Terminal size: {}x{}", size.0, size.1);
        Ok(Self { size })
    }

    pub fn enter_raw_mode() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(())
    }

    pub fn exit_raw_mode() -> Result<()> {
        execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn clear_screen() -> Result<()> {
        execute!(
            io::stdout(),
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        io::stdout().flush()?;
        Ok(())
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn read_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => {
                    // 只處理 Press 和 Repeat，忽略 Release 避免重複輸入
                    if key_event.kind == KeyEventKind::Press
                        || key_event.kind == KeyEventKind::Repeat
                    {
                        return Ok(InputEvent::Key(key_event));
                    }
                }
                Event::Resize(cols, rows) => {
                    self.size = (cols, rows);
                    return Ok(InputEvent::Resize(cols, rows));
                }
                _ => {
                    // 忽略其他事件（鼠標、粘貼等）
                }
            }
        }
    }

    pub fn show_cursor() -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = Self::exit_raw_mode();
        let _ = Self::show_cursor();
    }
}
