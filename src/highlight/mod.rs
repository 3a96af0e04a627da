// 語法高亮主模組

mod engine;
mod syntax;

pub use engine::classify;
pub use syntax::{HighlightFlags, Keyword, SyntaxProfile};

/// 每個顯示字符的高亮類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Number,
    String,
    /// 單行註解
    Comment,
    /// 塊註解
    MlComment,
    /// 主要關鍵字（控制流程等）
    Keyword1,
    /// 次要關鍵字（類型名稱等）
    Keyword2,
    /// 搜索匹配
    Match,
}

const SEPARATORS: &str = ",.()+-/*=~%<>[];，；。：（）";

/// 分隔符：空白或固定的標點集合，用來界定關鍵字和數字
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || SEPARATORS.contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        for ch in [' ', '\t', ',', '(', ';', '，', '（'] {
            assert!(is_separator(ch), "{:?} should be a separator", ch);
        }
        for ch in ['a', '_', '0', '"', '{'] {
            assert!(!is_separator(ch), "{:?} should not be a separator", ch);
        }
    }
}
