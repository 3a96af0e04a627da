// 顯示投影：原始字符 -> 顯示字符，以及兩種列座標之間的換算
//
// 寬度規則只有兩條：
//   1. Tab 固定佔 `tab_stop` 列（不按列對齊）
//   2. 其他字符按 Unicode 寬度，寬字元為 2，控制字符和無法判斷時為 1

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::highlight::Highlight;

/// 單個字符的顯示寬度
pub fn char_width(ch: char, tab_stop: usize) -> usize {
    if ch == '\t' {
        tab_stop
    } else if ch.is_control() {
        // 控制字符以單個替代字形顯示
        1
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// 一串字符的總顯示寬度
pub fn render_width(chars: &[char], tab_stop: usize) -> usize {
    chars.iter().map(|&ch| char_width(ch, tab_stop)).sum()
}

/// 生成顯示內容：每個 Tab 展開為固定數量的空格
pub fn render_chars(chars: &[char], tab_stop: usize) -> Vec<char> {
    let mut render = Vec::with_capacity(chars.len());
    for &ch in chars {
        if ch == '\t' {
            render.extend(std::iter::repeat(' ').take(tab_stop));
        } else {
            render.push(ch);
        }
    }
    render
}

/// 光標列（原始字符索引）-> 顯示列
pub fn cx_to_rx(chars: &[char], cx: usize, tab_stop: usize) -> usize {
    render_width(&chars[..cx.min(chars.len())], tab_stop)
}

/// 顯示列 -> 光標列
///
/// 累加寬度直到超過 `rx`，返回已經過的字符數。落在寬字元或 Tab 中間時，
/// 結果是該字符本身的索引，不一定是最近的一個。
pub fn rx_to_cx(chars: &[char], rx: usize, tab_stop: usize) -> usize {
    let mut current = 0;
    for (cx, &ch) in chars.iter().enumerate() {
        current += char_width(ch, tab_stop);
        if current > rx {
            return cx;
        }
    }
    chars.len()
}

/// 交給終端繪製的一個顯示格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// 控制字符已替換為替代字形
    pub ch: char,
    pub hl: Highlight,
    /// 控制字符需要反色繪製
    pub control: bool,
    pub width: usize,
}

impl Cell {
    fn new(ch: char, hl: Highlight) -> Self {
        if ch.is_control() {
            let code = ch as u32;
            let sym = if code <= 26 {
                char::from_u32('@' as u32 + code).unwrap_or('?')
            } else {
                '?'
            };
            Self {
                ch: sym,
                hl,
                control: true,
                width: 1,
            }
        } else {
            Self {
                ch,
                hl,
                control: false,
                width: UnicodeWidthChar::width(ch).unwrap_or(1),
            }
        }
    }
}

/// 生成一行的顯示格，`overlay` 範圍內的字符以匹配色覆蓋
pub fn cells(render: &[char], hl: &[Highlight], overlay: Option<Range<usize>>) -> Vec<Cell> {
    render
        .iter()
        .zip(hl)
        .enumerate()
        .map(|(idx, (&ch, &class))| {
            let class = match &overlay {
                Some(range) if range.contains(&idx) => Highlight::Match,
                _ => class,
            };
            Cell::new(ch, class)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_tab_expands_to_fixed_width() {
        // 不按列對齊："a\t" 仍然得到 1 + 4 個字符
        assert_eq!(render_chars(&chars("a\tb"), 4), chars("a    b"));
        assert_eq!(render_chars(&chars("\tab"), 4), chars("    ab"));
        assert_eq!(render_chars(&chars("abc\t"), 8).len(), 3 + 8);
    }

    #[test]
    fn test_single_tab_length() {
        for tab_stop in [1, 2, 4, 8] {
            let raw = chars("x\tyz");
            assert_eq!(render_chars(&raw, tab_stop).len(), raw.len() - 1 + tab_stop);
        }
    }

    #[test]
    fn test_cx_to_rx() {
        let raw = chars("\tab");
        assert_eq!(cx_to_rx(&raw, 0, 4), 0);
        assert_eq!(cx_to_rx(&raw, 1, 4), 4);
        assert_eq!(cx_to_rx(&raw, 3, 4), 6);
        // 超出範圍時按行尾計算
        assert_eq!(cx_to_rx(&raw, 99, 4), 6);
    }

    #[test]
    fn test_wide_glyphs() {
        let raw = chars("a世b");
        assert_eq!(cx_to_rx(&raw, 2, 4), 3);
        assert_eq!(rx_to_cx(&raw, 3, 4), 2);
        // 落在寬字元的第二列，解析為寬字元本身
        assert_eq!(rx_to_cx(&raw, 2, 4), 1);
    }

    #[test]
    fn test_rx_to_cx_inside_tab() {
        let raw = chars("\tab");
        assert_eq!(rx_to_cx(&raw, 0, 4), 0);
        assert_eq!(rx_to_cx(&raw, 3, 4), 0);
        assert_eq!(rx_to_cx(&raw, 4, 4), 1);
        assert_eq!(rx_to_cx(&raw, 100, 4), 3);
    }

    #[test]
    fn test_round_trip_without_wide_glyphs() {
        for text in ["", "abc", "\t\tx", "a\tb\tc", "int\tmain()"] {
            let raw = chars(text);
            for cx in 0..=raw.len() {
                assert_eq!(rx_to_cx(&raw, cx_to_rx(&raw, cx, 4), 4), cx, "{:?} @ {}", text, cx);
            }
        }
    }

    #[test]
    fn test_control_cells() {
        let render = chars("a\u{1}\u{7f}");
        let hl = vec![Highlight::Normal; 3];
        let cells = cells(&render, &hl, None);
        assert_eq!(cells[0].ch, 'a');
        assert!(!cells[0].control);
        assert_eq!(cells[1].ch, 'A');
        assert!(cells[1].control);
        assert_eq!(cells[2].ch, '?');
        assert!(cells[2].control);
    }

    #[test]
    fn test_overlay_does_not_touch_base() {
        let render = chars("abcd");
        let hl = vec![Highlight::Keyword1; 4];
        let cells = cells(&render, &hl, Some(1..3));
        let classes: Vec<_> = cells.iter().map(|c| c.hl).collect();
        assert_eq!(
            classes,
            vec![
                Highlight::Keyword1,
                Highlight::Match,
                Highlight::Match,
                Highlight::Keyword1
            ]
        );
        assert!(hl.iter().all(|h| *h == Highlight::Keyword1));
    }
}
