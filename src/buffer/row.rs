use std::ops::Range;

use crate::highlight::{classify, Highlight, SyntaxProfile};
use crate::render::{self, Cell};

/// 文件中的一行
///
/// `render` 和 `hl` 都由 `chars` 推導，只能通過 [`Row::update`] 和
/// [`Row::update_syntax`] 重新計算，兩者長度永遠相同。
#[derive(Debug, Clone, Default)]
pub struct Row {
    idx: usize,                // 在文件中的位置，插入/刪除行時重新編號
    chars: Vec<char>,          // 原始字符，不含換行符
    render: Vec<char>,         // 展開 Tab 後的顯示字符
    hl: Vec<Highlight>,        // 每個顯示字符的高亮類別
    hl_open_comment: bool,     // 行尾是否仍在塊註解中
}

impl Row {
    pub(crate) fn new(idx: usize, chars: Vec<char>) -> Self {
        Self {
            idx,
            chars,
            ..Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.idx
    }

    pub(crate) fn set_index(&mut self, idx: usize) {
        self.idx = idx;
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn render(&self) -> &[char] {
        &self.render
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    pub fn open_comment(&self) -> bool {
        self.hl_open_comment
    }

    pub fn to_text(&self) -> String {
        self.chars.iter().collect()
    }

    /// 重新生成顯示內容
    pub(crate) fn update(&mut self, tab_stop: usize) {
        self.render = render::render_chars(&self.chars, tab_stop);
        // 高亮稍後由文件統一重算，先保持長度一致
        self.hl.resize(self.render.len(), Highlight::Normal);
    }

    /// 重新計算高亮，返回行尾塊註解狀態是否改變
    pub(crate) fn update_syntax(
        &mut self,
        syntax: Option<&SyntaxProfile>,
        open_comment: bool,
    ) -> bool {
        let (hl, still_open) = classify(&self.render, syntax, open_comment);
        self.hl = hl;
        let changed = self.hl_open_comment != still_open;
        self.hl_open_comment = still_open;
        changed
    }

    /// `at` 會被限制在 `[0, len]`
    pub(crate) fn insert_char(&mut self, at: usize, ch: char) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, ch);
    }

    /// `at` 超出 `[0, len)` 時不做任何事，返回是否刪除
    pub(crate) fn delete_char(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        true
    }

    pub(crate) fn append_chars(&mut self, chars: &[char]) {
        self.chars.extend_from_slice(chars);
    }

    /// 在 `at` 處截斷，返回被移除的後半段
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<char> {
        let at = at.min(self.chars.len());
        self.chars.split_off(at)
    }

    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        render::cx_to_rx(&self.chars, cx, tab_stop)
    }

    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        render::rx_to_cx(&self.chars, rx, tab_stop)
    }

    /// 顯示格，`overlay` 是搜索匹配的暫時覆蓋範圍（顯示字符索引）
    pub fn cells(&self, overlay: Option<Range<usize>>) -> Vec<Cell> {
        render::cells(&self.render, &self.hl, overlay)
    }
}
