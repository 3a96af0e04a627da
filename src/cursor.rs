use crate::buffer::Document;

/// 光標位置（原始字符座標）
///
/// `row` 可以等於行數，表示文件末尾之後的虛擬行。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize, // 邏輯行號 (0-based)
    pub col: usize, // 原始字符列號 (0-based)
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self, doc: &Document) {
        if self.row > 0 {
            self.row -= 1;
        }
        self.snap_to_line(doc);
    }

    pub fn move_down(&mut self, doc: &Document) {
        if self.row < doc.row_count() {
            self.row += 1;
        }
        self.snap_to_line(doc);
    }

    pub fn move_left(&mut self, doc: &Document) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // 移動到上一行末尾
            self.row -= 1;
            self.col = line_len(doc, self.row);
        }
    }

    pub fn move_right(&mut self, doc: &Document) {
        if self.row >= doc.row_count() {
            return;
        }
        if self.col < line_len(doc, self.row) {
            self.col += 1;
        } else {
            // 移動到下一行開頭
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_line_end(&mut self, doc: &Document) {
        self.col = line_len(doc, self.row);
    }

    /// 把位置限制在文件範圍內
    pub fn clamp(&mut self, doc: &Document) {
        self.row = self.row.min(doc.row_count());
        self.snap_to_line(doc);
    }

    /// 列號不能超出當前行長度
    fn snap_to_line(&mut self, doc: &Document) {
        self.col = self.col.min(line_len(doc, self.row));
    }
}

/// 指定行的字符數，虛擬行為 0
fn line_len(doc: &Document, row: usize) -> usize {
    doc.row(row).map_or(0, |r| r.len())
}
