// 編輯上下文：文件 + 光標 + 視窗
//
// 所有編輯操作都作用在一個明確的上下文上，沒有全局狀態。

use crate::buffer::Document;
use crate::cursor::Cursor;
use crate::input::Direction;
use crate::view::Viewport;

pub struct Context {
    pub document: Document,
    pub cursor: Cursor,
    pub viewport: Viewport,
}

impl Context {
    pub fn new(document: Document, viewport: Viewport) -> Self {
        Self {
            document,
            cursor: Cursor::new(),
            viewport,
        }
    }

    /// 在光標處插入字符；光標在虛擬末行時先追加一個空行
    pub fn insert_char(&mut self, ch: char) {
        if self.cursor.row == self.document.row_count() {
            self.document.insert_row(self.cursor.row, Vec::new());
        }
        self.document.insert_char(self.cursor.row, self.cursor.col, ch);
        self.cursor.col += 1;
    }

    /// 在光標處拆分當前行
    pub fn insert_newline(&mut self) {
        if self.cursor.row >= self.document.row_count() {
            self.document.insert_row(self.document.row_count(), Vec::new());
        } else {
            self.document.split_row(self.cursor.row, self.cursor.col);
        }
        self.cursor.row += 1;
        self.cursor.col = 0;
    }

    /// 刪除光標左側字符；在行首時把本行接到上一行末尾
    pub fn delete_char(&mut self) {
        let Cursor { row, col } = self.cursor;
        if row >= self.document.row_count() || (row == 0 && col == 0) {
            return;
        }

        if col > 0 {
            self.document.delete_char(row, col - 1);
            self.cursor.col -= 1;
        } else {
            let rest = self
                .document
                .row(row)
                .map(|r| r.chars().to_vec())
                .unwrap_or_default();
            let prev_len = self.document.row(row - 1).map_or(0, |r| r.len());
            self.document.append_chars(row - 1, &rest);
            self.document.delete_row(row);
            self.cursor.row -= 1;
            self.cursor.col = prev_len;
        }
    }

    /// 刪除光標下的字符
    pub fn delete_right(&mut self) {
        let Some(row) = self.document.row(self.cursor.row) else {
            return;
        };
        // 最後一行行尾之後沒有字符
        if self.cursor.col >= row.len() && self.cursor.row + 1 == self.document.row_count() {
            return;
        }
        self.cursor.move_right(&self.document);
        self.delete_char();
    }

    pub fn delete_row(&mut self) {
        self.document.delete_row(self.cursor.row);
        self.cursor.clamp(&self.document);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let doc = &self.document;
        match direction {
            Direction::Up => self.cursor.move_up(doc),
            Direction::Down => self.cursor.move_down(doc),
            Direction::Left => self.cursor.move_left(doc),
            Direction::Right => self.cursor.move_right(doc),
            Direction::Home => self.cursor.move_to_line_start(),
            Direction::End => self.cursor.move_to_line_end(doc),
            Direction::PageUp => {
                // 先移到螢幕頂部，再向上移動一整屏
                self.cursor.row = self.viewport.row_offset.min(doc.row_count());
                for _ in 0..self.viewport.screen_rows {
                    self.cursor.move_up(doc);
                }
            }
            Direction::PageDown => {
                self.cursor.row = (self.viewport.row_offset + self.viewport.screen_rows)
                    .saturating_sub(1)
                    .min(doc.row_count());
                for _ in 0..self.viewport.screen_rows {
                    self.cursor.move_down(doc);
                }
            }
        }
    }

    /// 計算光標的顯示列並調整視窗偏移，返回顯示列
    pub fn scroll(&mut self) -> usize {
        let rx = self
            .document
            .row(self.cursor.row)
            .map_or(0, |r| r.cx_to_rx(self.cursor.col, self.document.tab_stop()));
        self.viewport.scroll(self.cursor.row, rx);
        rx
    }
}
