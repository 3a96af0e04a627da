//! 語法高亮引擎
//!
//! 逐字符掃描一行的顯示內容（已展開 Tab），為每個字符決定高亮類別。
//! 跨行狀態只有一個：行尾是否仍處於未結束的塊註解中。

use super::{is_separator, Highlight, SyntaxProfile};

/// 重新計算一行的高亮
///
/// `open_comment` 是上一行留下的塊註解狀態。返回每個字符的高亮類別，
/// 以及本行結束時是否仍在塊註解內。
///
/// 每個位置的規則優先級：單行註解、塊註解、字串、數字、關鍵字、普通字符。
pub fn classify(
    render: &[char],
    syntax: Option<&SyntaxProfile>,
    open_comment: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let Some(syntax) = syntax else {
        return (hl, false);
    };

    let scs = syntax.single_line_comment.as_slice();
    let mcs = syntax.block_comment_start.as_slice();
    let mce = syntax.block_comment_end.as_slice();
    let block_comments = syntax.has_block_comments();

    let mut prev_sep = true;
    // 正在哪種引號的字串中
    let mut in_string: Option<char> = None;
    let mut in_comment = open_comment && block_comments;

    let mut i = 0;
    while i < render.len() {
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };
        let rest = &render[i..];

        if !scs.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(scs) {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if block_comments && in_string.is_none() {
            if in_comment {
                hl[i] = Highlight::MlComment;
                if rest.starts_with(mce) {
                    hl[i..i + mce.len()].fill(Highlight::MlComment);
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            } else if rest.starts_with(mcs) {
                hl[i..i + mcs.len()].fill(Highlight::MlComment);
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        let ch = render[i];

        if syntax.flags.strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                // 轉義字符連同下一個字符一起跳過
                if ch == '\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if ch == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if ch == '"' || ch == '\'' {
                hl[i] = Highlight::String;
                in_string = Some(ch);
                i += 1;
                continue;
            }
        }

        if syntax.flags.numbers
            && ((ch.is_numeric() && (prev_sep || prev_hl == Highlight::Number))
                || (ch == '.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            let keyword = syntax.keywords.iter().find(|kw| {
                !kw.text.is_empty()
                    && rest.starts_with(&kw.text)
                    && rest.get(kw.text.len()).map_or(true, |&next| is_separator(next))
            });
            if let Some(kw) = keyword {
                hl[i..i + kw.text.len()].fill(kw.class);
                i += kw.text.len();
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(ch);
        i += 1;
    }

    (hl, in_comment)
}
