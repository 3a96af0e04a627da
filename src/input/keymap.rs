use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::handler::{Command, Direction};

/// 編輯模式下的按鍵映射
pub fn handle_key_event(event: KeyEvent) -> Option<Command> {
    match (event.code, event.modifiers) {
        // 基本移動
        (KeyCode::Up, KeyModifiers::NONE) => Some(Command::Move(Direction::Up)),
        (KeyCode::Down, KeyModifiers::NONE) => Some(Command::Move(Direction::Down)),
        (KeyCode::Left, KeyModifiers::NONE) => Some(Command::Move(Direction::Left)),
        (KeyCode::Right, KeyModifiers::NONE) => Some(Command::Move(Direction::Right)),
        (KeyCode::Home, _) => Some(Command::Move(Direction::Home)),
        (KeyCode::End, _) => Some(Command::Move(Direction::End)),
        (KeyCode::PageUp, _) => Some(Command::Move(Direction::PageUp)),
        (KeyCode::PageDown, _) => Some(Command::Move(Direction::PageDown)),

        // Emacs 風格移動
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Some(Command::Move(Direction::Up)),
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Some(Command::Move(Direction::Down)),
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Some(Command::Move(Direction::Left)),
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Some(Command::Move(Direction::Home)),
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Some(Command::Move(Direction::End)),

        // 字符輸入
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Command::Insert(c))
        }
        (KeyCode::Tab, KeyModifiers::NONE) => Some(Command::Insert('\t')),
        (KeyCode::Enter, _) => Some(Command::InsertNewline),

        // 刪除操作
        (KeyCode::Backspace, _) => Some(Command::Backspace),
        (KeyCode::Char('h'), KeyModifiers::CONTROL) => Some(Command::Backspace),
        (KeyCode::Delete, _) => Some(Command::Delete),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(Command::DeleteLine),
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(Command::DeleteLine),

        // Ctrl 組合鍵
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(Command::Save),
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Some(Command::Find),

        // ESC 清除訊息
        (KeyCode::Esc, _) => Some(Command::Cancel),

        _ => None,
    }
}

/// 提示框中的按鍵映射
pub fn handle_prompt_key(event: KeyEvent) -> Option<Command> {
    match (event.code, event.modifiers) {
        (KeyCode::Enter, _) => Some(Command::Confirm),
        (KeyCode::Esc, _) => Some(Command::Cancel),
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Some(Command::Cancel),
        (KeyCode::Backspace, _) | (KeyCode::Delete, _) => Some(Command::Backspace),
        (KeyCode::Up, _) => Some(Command::Move(Direction::Up)),
        (KeyCode::Down, _) => Some(Command::Move(Direction::Down)),
        (KeyCode::Left, _) => Some(Command::Move(Direction::Left)),
        (KeyCode::Right, _) => Some(Command::Move(Direction::Right)),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Command::Insert(c))
        }
        _ => None,
    }
}
