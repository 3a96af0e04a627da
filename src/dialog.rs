// 對話框模組 - 訊息欄中的單行輸入框
//
// 只保存輸入狀態，讀取按鍵和重繪由編輯器負責。

use crate::input::{Command, Direction};

/// 一次按鍵之後輸入框的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// 輸入內容改變
    Edited,
    /// Enter 且內容非空
    Confirmed,
    /// Esc，或對空內容按 Enter
    Cancelled,
    /// 向右/向下
    Next,
    /// 向左/向上
    Previous,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PromptInput {
    template: String,
    input: String,
}

impl PromptInput {
    /// `template` 中的 `{}` 會被當前輸入替換
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            input: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// 顯示在訊息欄的文字
    pub fn text(&self) -> String {
        self.template.replacen("{}", &self.input, 1)
    }

    pub fn apply(&mut self, command: &Command) -> PromptEvent {
        match command {
            Command::Confirm => {
                if self.input.is_empty() {
                    PromptEvent::Cancelled
                } else {
                    PromptEvent::Confirmed
                }
            }
            Command::Cancel => PromptEvent::Cancelled,
            Command::Backspace => {
                if self.input.pop().is_some() {
                    PromptEvent::Edited
                } else {
                    PromptEvent::Ignored
                }
            }
            Command::Insert(ch) if !ch.is_control() => {
                self.input.push(*ch);
                PromptEvent::Edited
            }
            Command::Move(Direction::Right) | Command::Move(Direction::Down) => PromptEvent::Next,
            Command::Move(Direction::Left) | Command::Move(Direction::Up) => PromptEvent::Previous,
            _ => PromptEvent::Ignored,
        }
    }
}
