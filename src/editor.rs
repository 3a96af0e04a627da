use crate::buffer::Document;
use crate::config::Config;
use crate::context::Context;
use crate::dialog::{PromptEvent, PromptInput};
use crate::input::{handle_key_event, handle_prompt_key, Command};
use crate::message::StatusMessage;
use crate::search::{Search, SearchKey};
use crate::terminal::{InputEvent, Terminal};
use crate::view::{self, Viewport};
use anyhow::Result;
use std::io;
use std::path::Path;
use std::time::Instant;

const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

pub struct Editor {
    ctx: Context,
    terminal: Terminal,
    search: Search,
    config: Config,
    message: Option<StatusMessage>,
    quit_guard: QuitGuard,
    should_quit: bool,
}

impl Editor {
    /// 先載入文件再接管終端，讀取失敗時終端保持原狀
    pub fn new(file_path: Option<&Path>, config: Config) -> Result<Self> {
        let document = match file_path {
            Some(path) => Document::open(path, config.tab_stop)?,
            None => Document::new(config.tab_stop),
        };

        let terminal = Terminal::new()?;
        let (cols, rows) = terminal.size();

        Ok(Self {
            ctx: Context::new(document, Viewport::new(cols, rows)),
            terminal,
            search: Search::new(),
            quit_guard: QuitGuard::new(config.quit_times),
            config,
            message: Some(StatusMessage::new(HELP_MESSAGE)),
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        Terminal::clear_screen()?;

        while !self.should_quit {
            self.refresh_screen()?;

            match self.terminal.read_event()? {
                InputEvent::Key(key_event) => match handle_key_event(key_event) {
                    Some(command) => self.handle_command(command)?,
                    None => log::debug!("Ignored key: {:?}", key_event),
                },
                InputEvent::Resize(cols, rows) => self.ctx.viewport.resize(cols, rows),
            }
        }

        Terminal::clear_screen()?;
        Ok(())
    }

    fn refresh_screen(&mut self) -> Result<()> {
        self.ctx.scroll();
        let message = self
            .message
            .as_ref()
            .and_then(|m| m.visible(Instant::now(), self.config.message_timeout));
        let mut stdout = io::stdout();
        view::draw(
            &mut stdout,
            &self.ctx,
            self.search.overlay(),
            message,
            &self.config,
        )
    }

    fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(text));
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        if let Command::Quit = command {
            let modified = self.ctx.document.is_modified();
            match self.quit_guard.press(modified) {
                Some(remaining) => self.set_message(format!(
                    "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                    remaining
                )),
                None => self.should_quit = true,
            }
            return Ok(());
        }
        // 任何非 Quit 的命令都重置計數
        self.quit_guard.reset();

        match command {
            Command::Insert(ch) => self.ctx.insert_char(ch),
            Command::InsertNewline => self.ctx.insert_newline(),
            Command::Backspace => self.ctx.delete_char(),
            Command::Delete => self.ctx.delete_right(),
            Command::DeleteLine => self.ctx.delete_row(),
            Command::Move(direction) => self.ctx.move_cursor(direction),
            Command::Save => self.save()?,
            Command::Find => self.find()?,
            Command::Cancel => self.message = None,
            Command::Confirm | Command::Quit => {}
        }
        Ok(())
    }

    /// 在訊息欄讀取一行輸入，每次按鍵後調用 `callback`
    ///
    /// 返回 `None` 表示取消（包括對空輸入按 Enter）。
    fn prompt<F>(&mut self, template: &str, mut callback: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &str, PromptEvent),
    {
        let mut input = PromptInput::new(template);

        loop {
            self.set_message(input.text());
            self.refresh_screen()?;

            let event = match self.terminal.read_event()? {
                InputEvent::Key(key_event) => match handle_prompt_key(key_event) {
                    Some(command) => input.apply(&command),
                    None => PromptEvent::Ignored,
                },
                InputEvent::Resize(cols, rows) => {
                    self.ctx.viewport.resize(cols, rows);
                    continue;
                }
            };

            callback(self, input.input(), event);

            match event {
                PromptEvent::Confirmed => {
                    self.set_message("");
                    return Ok(Some(input.input().to_string()));
                }
                PromptEvent::Cancelled => {
                    self.set_message("");
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn find(&mut self) -> Result<()> {
        let saved_cursor = self.ctx.cursor;
        let saved_row_offset = self.ctx.viewport.row_offset;
        let saved_col_offset = self.ctx.viewport.col_offset;

        let query = self.prompt("Search: {} (Use ESC/Arrows/Enter)", |editor, query, event| {
            let key = match event {
                PromptEvent::Confirmed => SearchKey::Confirm,
                PromptEvent::Cancelled => SearchKey::Cancel,
                PromptEvent::Next => SearchKey::Next,
                PromptEvent::Previous => SearchKey::Previous,
                PromptEvent::Edited | PromptEvent::Ignored => SearchKey::Edit,
            };
            editor.search.on_key(&mut editor.ctx, query, key);
        })?;

        if query.is_none() {
            self.ctx.cursor = saved_cursor;
            self.ctx.viewport.row_offset = saved_row_offset;
            self.ctx.viewport.col_offset = saved_col_offset;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.ctx.document.file_path().is_none() {
            match self.prompt("Save as: {} (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.ctx.document.set_file_path(Path::new(&name)),
                None => {
                    self.set_message("Save aborted");
                    return Ok(());
                }
            }
        }

        match self.ctx.document.save() {
            Ok(bytes) => self.set_message(format!("{} bytes written to disk", bytes)),
            Err(e) => {
                log::warn!("Save failed: {:#}", e);
                self.set_message(format!("Can't save! I/O error: {:#}", e));
            }
        }
        Ok(())
    }
}

/// 有未保存修改時的退出確認
#[derive(Debug)]
struct QuitGuard {
    times: u8,
    remaining: u8,
}

impl QuitGuard {
    fn new(times: u8) -> Self {
        Self {
            times,
            remaining: times,
        }
    }

    /// 按下一次退出鍵；還需要再按時返回剩餘次數，可以退出時返回 `None`
    fn press(&mut self, modified: bool) -> Option<u8> {
        if !modified {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            None
        } else {
            Some(self.remaining)
        }
    }

    fn reset(&mut self) {
        self.remaining = self.times;
    }
}
