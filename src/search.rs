// 增量搜索
//
// 每次按鍵後從上一次匹配的行開始，按方向逐行查找，首尾相接，最多掃描一遍。
// 匹配高亮是疊加在基礎高亮之上的暫時覆蓋層，不修改行本身的高亮數組。

use std::ops::Range;

use crate::context::Context;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// 搜索提示框中的按鍵
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Confirm,
    Cancel,
    Next,
    Previous,
    /// 查詢文字改變（或其他任意按鍵）
    Edit,
}

/// 匹配高亮：行號和顯示字符範圍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOverlay {
    pub row: usize,
    pub range: Range<usize>,
}

pub struct Search {
    last_match: Option<usize>,
    direction: SearchDirection,
    overlay: Option<MatchOverlay>,
}

impl Search {
    pub fn new() -> Self {
        Self {
            last_match: None,
            direction: SearchDirection::Forward,
            overlay: None,
        }
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn overlay(&self) -> Option<&MatchOverlay> {
        self.overlay.as_ref()
    }

    /// 指定行的匹配範圍
    pub fn overlay_for(&self, row: usize) -> Option<Range<usize>> {
        self.overlay
            .as_ref()
            .filter(|o| o.row == row)
            .map(|o| o.range.clone())
    }

    fn reset(&mut self) {
        self.last_match = None;
        self.direction = SearchDirection::Forward;
    }

    /// 處理提示框中的一次按鍵，找到匹配時返回行號
    pub fn on_key(&mut self, ctx: &mut Context, query: &str, key: SearchKey) -> Option<usize> {
        self.overlay = None;

        match key {
            SearchKey::Confirm | SearchKey::Cancel => {
                self.reset();
                return None;
            }
            SearchKey::Next => self.direction = SearchDirection::Forward,
            SearchKey::Previous => self.direction = SearchDirection::Backward,
            SearchKey::Edit => self.reset(),
        }

        // 還沒有匹配時總是向前搜索
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }

        let needle: Vec<char> = query.chars().collect();
        if needle.is_empty() {
            return None;
        }

        let row_count = ctx.document.row_count();
        let mut current = self.last_match;
        for _ in 0..row_count {
            let row_idx = match (current, self.direction) {
                (None, _) => 0,
                (Some(r), SearchDirection::Forward) => (r + 1) % row_count,
                (Some(r), SearchDirection::Backward) => {
                    if r == 0 {
                        row_count - 1
                    } else {
                        (r - 1).min(row_count - 1)
                    }
                }
            };
            current = Some(row_idx);

            let Some(row) = ctx.document.row(row_idx) else {
                continue;
            };
            // 每行只找第一次出現的位置
            let Some(start) = find_chars(row.render(), &needle) else {
                continue;
            };

            let tab_stop = ctx.document.tab_stop();
            let rx = render::render_width(&row.render()[..start], tab_stop);
            ctx.cursor.row = row_idx;
            ctx.cursor.col = row.rx_to_cx(rx, tab_stop);
            // 滾到文件末尾，下次重繪時向上滾動，使匹配行出現在螢幕頂部
            ctx.viewport.row_offset = row_count;

            self.last_match = Some(row_idx);
            self.overlay = Some(MatchOverlay {
                row: row_idx,
                range: start..start + needle.len(),
            });
            log::debug!("Search {:?} matched row {} at {}", query, row_idx, start);
            return Some(row_idx);
        }

        None
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Document;
    use crate::cursor::Cursor;
    use crate::highlight::{Highlight, SyntaxProfile};
    use crate::view::Viewport;

    fn ctx(text: &str) -> Context {
        let mut doc = Document::new(4);
        doc.load_str(text);
        Context::new(doc, Viewport::new(80, 24))
    }

    #[test]
    fn test_find_chars() {
        let hay: Vec<char> = "abcabc".chars().collect();
        assert_eq!(find_chars(&hay, &['c', 'a']), Some(2));
        assert_eq!(find_chars(&hay, &['x']), None);
        assert_eq!(find_chars(&['a'], &['a', 'b']), None);
    }

    #[test]
    fn test_first_match_moves_cursor_and_scrolls() {
        let mut ctx = ctx("alpha\nbeta\ngamma");
        let mut search = Search::new();

        assert_eq!(search.on_key(&mut ctx, "mm", SearchKey::Edit), Some(2));
        assert_eq!(ctx.cursor, Cursor { row: 2, col: 2 });
        assert_eq!(ctx.viewport.row_offset, 3);
        assert_eq!(search.overlay_for(2), Some(2..4));
        assert_eq!(search.overlay_for(1), None);

        ctx.scroll();
        assert_eq!(ctx.viewport.row_offset, 2);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut ctx = ctx("x1\nno\nx2\nx3");
        let mut search = Search::new();

        assert_eq!(search.on_key(&mut ctx, "x", SearchKey::Edit), Some(0));
        assert_eq!(search.on_key(&mut ctx, "x", SearchKey::Next), Some(2));
        assert_eq!(search.on_key(&mut ctx, "x", SearchKey::Next), Some(3));
        assert_eq!(search.on_key(&mut ctx, "x", SearchKey::Next), Some(0));
        assert_eq!(search.on_key(&mut ctx, "x", SearchKey::Previous), Some(3));
        assert_eq!(search.direction(), SearchDirection::Backward);
    }

    #[test]
    fn test_previous_without_match_searches_forward() {
        let mut ctx = ctx("a\nb\na");
        let mut search = Search::new();
        assert_eq!(search.on_key(&mut ctx, "a", SearchKey::Previous), Some(0));
        assert_eq!(search.direction(), SearchDirection::Forward);
    }

    #[test]
    fn test_edit_restarts_from_top() {
        let mut ctx = ctx("ab\nab");
        let mut search = Search::new();
        search.on_key(&mut ctx, "a", SearchKey::Edit);
        search.on_key(&mut ctx, "a", SearchKey::Next);
        assert_eq!(search.last_match(), Some(1));
        assert_eq!(search.on_key(&mut ctx, "ab", SearchKey::Edit), Some(0));
    }

    #[test]
    fn test_second_occurrence_in_same_row_is_skipped() {
        let mut ctx = ctx("foo foo");
        let mut search = Search::new();
        search.on_key(&mut ctx, "foo", SearchKey::Edit);
        assert_eq!(ctx.cursor.col, 0);
        // 單行文件中 Next 會回到同一行的第一次出現
        search.on_key(&mut ctx, "foo", SearchKey::Next);
        assert_eq!(ctx.cursor.col, 0);
    }

    #[test]
    fn test_no_match_leaves_everything_unchanged() {
        let mut ctx = ctx("one\ntwo\nthree");
        ctx.cursor = Cursor { row: 1, col: 2 };
        ctx.viewport.row_offset = 1;
        let mut search = Search::new();

        assert_eq!(search.on_key(&mut ctx, "zzz", SearchKey::Edit), None);
        assert_eq!(search.on_key(&mut ctx, "zzz", SearchKey::Next), None);
        assert_eq!(ctx.cursor, Cursor { row: 1, col: 2 });
        assert_eq!(ctx.viewport.row_offset, 1);
        assert!(search.overlay().is_none());
        assert_eq!(search.last_match(), None);
    }

    #[test]
    fn test_empty_document() {
        let mut ctx = ctx("");
        let mut search = Search::new();
        assert_eq!(search.on_key(&mut ctx, "a", SearchKey::Edit), None);
    }

    #[test]
    fn test_confirm_and_cancel_clear_state() {
        let mut ctx = ctx("abc");
        let mut search = Search::new();
        search.on_key(&mut ctx, "b", SearchKey::Edit);
        assert!(search.overlay().is_some());

        assert_eq!(search.on_key(&mut ctx, "b", SearchKey::Confirm), None);
        assert!(search.overlay().is_none());
        assert_eq!(search.last_match(), None);
        // 光標停在匹配處
        assert_eq!(ctx.cursor, Cursor { row: 0, col: 1 });
    }

    #[test]
    fn test_match_after_tab_maps_to_raw_column() {
        let mut ctx = ctx("\tneedle");
        let mut search = Search::new();
        search.on_key(&mut ctx, "needle", SearchKey::Edit);
        assert_eq!(ctx.cursor.col, 1);
        assert_eq!(search.overlay_for(0), Some(4..10));
    }

    #[test]
    fn test_match_after_wide_glyph_maps_to_raw_column() {
        let mut ctx = ctx("世界x");
        let mut search = Search::new();
        search.on_key(&mut ctx, "x", SearchKey::Edit);
        assert_eq!(ctx.cursor.col, 2);
    }

    #[test]
    fn test_overlay_leaves_base_highlight_intact() {
        let mut ctx = ctx("int x = 5;");
        ctx.document.set_syntax(SyntaxProfile::by_name("c"));
        let mut search = Search::new();
        search.on_key(&mut ctx, "5", SearchKey::Edit);

        let row = ctx.document.row(0).unwrap();
        assert_eq!(row.highlight()[8], Highlight::Number);
        let cells = row.cells(search.overlay_for(0));
        assert_eq!(cells[8].hl, Highlight::Match);

        search.on_key(&mut ctx, "5", SearchKey::Cancel);
        let cells = ctx.document.row(0).unwrap().cells(search.overlay_for(0));
        assert_eq!(cells[8].hl, Highlight::Number);
    }
}
