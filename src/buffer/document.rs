use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::row::Row;
use crate::highlight::SyntaxProfile;

/// 以行為單位的文件
///
/// 每次修改都同步重算受影響行的顯示內容和高亮；塊註解狀態改變時，
/// 向後逐行傳播直到狀態穩定。
pub struct Document {
    rows: Vec<Row>,
    modified: bool,
    syntax: Option<&'static SyntaxProfile>,
    file_path: Option<PathBuf>,
    tab_stop: usize,
}

impl Document {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            modified: false,
            syntax: None,
            file_path: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// 載入文件；任何讀取失敗（包括文件不存在）都返回錯誤
    pub fn open(path: &Path, tab_stop: usize) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let mut doc = Self::new(tab_stop);
        doc.load_str(&String::from_utf8_lossy(&bytes));
        log::info!("Loaded {} rows from {}", doc.row_count(), path.display());

        doc.set_file_path(path);
        Ok(doc)
    }

    /// 追加文本，每行一個 row；行尾的 `\r` 一併去除。載入不算修改。
    pub fn load_str(&mut self, text: &str) {
        let modified = self.modified;
        for line in text.lines() {
            let line = line.trim_end_matches(['\r', '\n']);
            self.insert_row(self.rows.len(), line.chars().collect());
        }
        self.modified = modified;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn syntax(&self) -> Option<&'static SyntaxProfile> {
        self.syntax
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    /// 設定文件名並重新選擇語法
    pub fn set_file_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
        self.set_syntax(SyntaxProfile::for_filename(path));
    }

    /// 更換語法設定，所有行重新高亮
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxProfile>) {
        match syntax {
            Some(profile) => log::debug!("Syntax highlighting: {}", profile.name),
            None => log::debug!("Syntax highlighting disabled"),
        }
        self.syntax = syntax;
        self.update_syntax(0, self.rows.len());
    }

    /// 在 `at` 插入一行，`at` 超出 `[0, row_count]` 時不做任何事
    pub fn insert_row(&mut self, at: usize, chars: Vec<char>) {
        if at > self.rows.len() {
            return;
        }

        let mut row = Row::new(at, chars);
        row.update(self.tab_stop);
        self.rows.insert(at, row);
        for (idx, row) in self.rows.iter_mut().enumerate().skip(at + 1) {
            row.set_index(idx);
        }

        // 後一行的塊註解輸入來自新行，也需要重算
        self.update_syntax(at, 2);
        self.modified = true;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }

        self.rows.remove(at);
        for (idx, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.set_index(idx);
        }

        self.update_syntax(at, 1);
        self.modified = true;
    }

    /// `col` 會被限制在 `[0, len]`
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.insert_char(col, ch);
        self.row_changed(row);
    }

    /// `col` 超出 `[0, len)` 時不做任何事
    pub fn delete_char(&mut self, row: usize, col: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if r.delete_char(col) {
            self.row_changed(row);
        }
    }

    pub fn append_chars(&mut self, row: usize, chars: &[char]) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.append_chars(chars);
        self.row_changed(row);
    }

    /// 在 `col` 處把一行拆成兩行，返回被移到新行的後半段
    ///
    /// `col == 0` 時新行持有整行內容，原行變為空行。
    pub fn split_row(&mut self, row: usize, col: usize) -> Vec<char> {
        let Some(r) = self.rows.get_mut(row) else {
            return Vec::new();
        };
        let suffix = r.split_off(col);
        self.row_changed(row);
        self.insert_row(row + 1, suffix.clone());
        suffix
    }

    /// 每行以單個 `\n` 結尾，包括最後一行
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = String::new();
        for row in &self.rows {
            buf.extend(row.chars());
            buf.push('\n');
        }
        buf.into_bytes()
    }

    /// 保存到當前文件名，返回寫入的字節數
    ///
    /// 先把文件截斷到新內容的長度再寫入，縮小寫入失敗時留下舊的尾部數據的窗口。
    /// 截斷成功但寫入失敗時文件內容仍可能不完整，這個風險沒有消除。
    pub fn save(&mut self) -> Result<usize> {
        let path = self.file_path.clone().context("No file name")?;
        let bytes = self.to_bytes();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        file.set_len(bytes.len() as u64)
            .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
        file.write_all(&bytes)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        self.modified = false;
        log::info!("{} bytes written to {}", bytes.len(), path.display());
        Ok(bytes.len())
    }

    fn row_changed(&mut self, row: usize) {
        self.rows[row].update(self.tab_stop);
        self.update_syntax(row, 1);
        self.modified = true;
    }

    /// 從 `start` 開始至少重算 `count` 行，之後只要行尾塊註解狀態改變就繼續
    fn update_syntax(&mut self, start: usize, count: usize) {
        let mut idx = start;
        while idx < self.rows.len() {
            let open_comment = idx > 0 && self.rows[idx - 1].open_comment();
            let changed = self.rows[idx].update_syntax(self.syntax, open_comment);
            idx += 1;
            if !changed && idx >= start + count {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Highlight;
    use tempfile::TempDir;

    fn doc_with(lines: &[&str]) -> Document {
        let mut doc = Document::new(4);
        for line in lines {
            doc.insert_row(doc.row_count(), line.chars().collect());
        }
        doc
    }

    fn c_doc(lines: &[&str]) -> Document {
        let mut doc = doc_with(lines);
        doc.set_syntax(SyntaxProfile::by_name("c"));
        doc
    }

    fn text(doc: &Document, row: usize) -> String {
        doc.row(row).map(|r| r.to_text()).unwrap_or_default()
    }

    fn assert_indices(doc: &Document) {
        for (idx, row) in doc.rows().iter().enumerate() {
            assert_eq!(row.index(), idx);
            assert_eq!(row.render().len(), row.highlight().len());
        }
    }

    #[test]
    fn test_insert_row_out_of_range_is_noop() {
        let mut doc = doc_with(&["a"]);
        doc.modified = false;
        doc.insert_row(5, vec!['x']);
        assert_eq!(doc.row_count(), 1);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_insert_and_delete_renumber() {
        let mut doc = doc_with(&["a", "b", "c"]);
        doc.insert_row(1, vec!['x']);
        assert_eq!(text(&doc, 1), "x");
        assert_eq!(text(&doc, 2), "b");
        assert_indices(&doc);

        doc.delete_row(0);
        assert_eq!(text(&doc, 0), "x");
        assert_eq!(doc.row_count(), 3);
        assert_indices(&doc);

        doc.delete_row(3);
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn test_insert_char_clamps_column() {
        let mut doc = doc_with(&["ab"]);
        doc.insert_char(0, 99, 'c');
        assert_eq!(text(&doc, 0), "abc");
        assert!(doc.is_modified());
    }

    #[test]
    fn test_delete_char_out_of_range_is_noop() {
        let mut doc = doc_with(&["ab"]);
        doc.modified = false;
        doc.delete_char(0, 2);
        assert_eq!(text(&doc, 0), "ab");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_insert_then_delete_restores_row() {
        let mut doc = doc_with(&["hello"]);
        for col in 0..=5 {
            doc.insert_char(0, col, 'X');
            doc.delete_char(0, col);
            assert_eq!(text(&doc, 0), "hello");
        }
    }

    #[test]
    fn test_split_then_append_restores_row() {
        for col in 0..=5 {
            let mut doc = doc_with(&["hello", "next"]);
            let suffix = doc.split_row(0, col);
            assert_eq!(doc.row_count(), 3);
            assert_eq!(text(&doc, 1), suffix.iter().collect::<String>());
            doc.append_chars(0, &suffix);
            doc.delete_row(1);
            assert_eq!(text(&doc, 0), "hello");
            assert_eq!(text(&doc, 1), "next");
            assert_indices(&doc);
        }
    }

    #[test]
    fn test_split_at_zero_moves_whole_row() {
        let mut doc = doc_with(&["abc"]);
        doc.split_row(0, 0);
        assert_eq!(text(&doc, 0), "");
        assert_eq!(text(&doc, 1), "abc");
    }

    #[test]
    fn test_tab_insert_updates_render() {
        let mut doc = doc_with(&["ab"]);
        doc.insert_char(0, 0, '\t');
        let row = doc.row(0).unwrap();
        assert_eq!(row.render().iter().collect::<String>(), "    ab");
        assert_eq!(row.cx_to_rx(1, doc.tab_stop()), 4);
        assert_indices(&doc);
    }

    #[test]
    fn test_block_comment_carry() {
        let doc = c_doc(&["x /* open", "still", "end */ y"]);
        assert!(doc.row(0).unwrap().open_comment());
        assert!(doc.row(1).unwrap().open_comment());
        assert!(!doc.row(2).unwrap().open_comment());
        assert_eq!(doc.row(1).unwrap().highlight()[0], Highlight::MlComment);
        assert_eq!(doc.row(2).unwrap().highlight()[7], Highlight::Normal);
    }

    #[test]
    fn test_closing_comment_propagates_downwards() {
        let mut doc = c_doc(&["/* a", "b", "c", "5"]);
        assert_eq!(doc.row(3).unwrap().highlight()[0], Highlight::MlComment);

        // 在第一行末尾補上 */，後續所有行都應恢復
        doc.append_chars(0, &['*', '/']);
        assert!(!doc.row(0).unwrap().open_comment());
        assert!(!doc.row(2).unwrap().open_comment());
        assert_eq!(doc.row(3).unwrap().highlight()[0], Highlight::Number);
    }

    #[test]
    fn test_inserted_row_feeds_following_row() {
        let mut doc = c_doc(&["int a;", "5"]);
        doc.insert_row(1, "/* x".chars().collect());
        assert_eq!(doc.row(2).unwrap().highlight()[0], Highlight::MlComment);

        doc.delete_row(1);
        assert_eq!(doc.row(1).unwrap().highlight()[0], Highlight::Number);
        assert_indices(&doc);
    }

    #[test]
    fn test_long_comment_run_does_not_recurse() {
        let lines: Vec<String> = (0..20_000).map(|i| format!("line {}", i)).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut doc = c_doc(&refs);
        doc.insert_char(0, 0, '*');
        doc.insert_char(0, 0, '/');
        assert!(doc.row(19_999).unwrap().open_comment());
    }

    #[test]
    fn test_set_file_path_selects_syntax() {
        let mut doc = doc_with(&["int x = 5;"]);
        assert!(doc.syntax().is_none());
        doc.set_file_path(Path::new("main.c"));
        assert_eq!(doc.syntax().map(|s| s.name), Some("c"));
        assert_eq!(doc.row(0).unwrap().highlight()[8], Highlight::Number);
    }

    #[test]
    fn test_load_str_strips_line_endings() {
        let mut doc = Document::new(4);
        doc.load_str("a\r\nb\n\nlast");
        assert_eq!(doc.row_count(), 4);
        assert_eq!(text(&doc, 0), "a");
        assert_eq!(text(&doc, 2), "");
        assert_eq!(text(&doc, 3), "last");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.c");
        let err = Document::open(&path, 4).err().unwrap();
        assert!(format!("{}", err).starts_with("Failed to read file:"));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing_file_selects_syntax() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.c");
        fs::write(&path, "int x;\n").unwrap();
        let doc = Document::open(&path, 4).unwrap();
        assert_eq!(doc.row_count(), 1);
        assert!(!doc.is_modified());
        assert_eq!(doc.syntax().map(|s| s.name), Some("c"));
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Document::open(dir.path(), 4).is_err());
    }

    #[test]
    fn test_save_writes_newline_per_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a\r\nb").unwrap();

        let mut doc = Document::open(&path, 4).unwrap();
        doc.insert_char(1, 1, 'c');
        let written = doc.save().unwrap();

        assert_eq!(written, 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nbc\n");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_save_truncates_longer_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a much longer original content\nwith two lines\n").unwrap();

        let mut doc = Document::open(&path, 4).unwrap();
        doc.delete_row(1);
        doc.delete_row(0);
        doc.insert_row(0, "short".chars().collect());
        doc.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_save_without_name_fails_and_stays_modified() {
        let mut doc = doc_with(&["x"]);
        assert!(doc.save().is_err());
        assert!(doc.is_modified());
    }

    #[test]
    fn test_save_failure_keeps_modified() {
        let dir = TempDir::new().unwrap();
        let mut doc = doc_with(&["x"]);
        // 目錄無法以寫入模式打開
        doc.file_path = Some(dir.path().to_path_buf());
        assert!(doc.save().is_err());
        assert!(doc.is_modified());
    }
}
