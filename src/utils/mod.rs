mod logger;

pub use logger::{init_logger, DEFAULT_LOG_FILE};

use unicode_width::UnicodeWidthChar;

/// 計算字符串的視覺寬度（考慮寬字元）
/// 中文字元等寬字元會正確計算為 2，ASCII 字元計算為 1
pub fn visual_width(s: &str) -> usize {
    s.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum()
}

/// 按視覺寬度截斷字符串，不會切開寬字元
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + char_width > max_width {
            return &s[..idx];
        }
        width += char_width;
    }
    s
}

/// 按字符數截斷
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
