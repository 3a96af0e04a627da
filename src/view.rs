use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color},
    terminal::{Clear, ClearType},
};

use crate::buffer::{Document, Row};
use crate::config::Config;
use crate::context::Context;
use crate::highlight::Highlight;
use crate::search::MatchOverlay;
use crate::utils::{truncate_chars, truncate_to_width, visual_width};

/// 狀態欄和訊息欄各佔一行
const BAR_ROWS: u16 = 2;

/// 視窗：可見範圍的偏移和大小
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize, // 視窗頂部顯示的行號
    pub col_offset: usize, // 視窗左側的顯示列
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            screen_rows: rows.saturating_sub(BAR_ROWS) as usize,
            screen_cols: cols as usize,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.screen_rows = rows.saturating_sub(BAR_ROWS) as usize;
        self.screen_cols = cols as usize;
    }

    /// 讓 (row, rx) 落在可見範圍內
    pub fn scroll(&mut self, row: usize, rx: usize) {
        // 向上滾動
        if row < self.row_offset {
            self.row_offset = row;
        }
        // 向下滾動
        if row >= self.row_offset + self.screen_rows {
            self.row_offset = (row + 1).saturating_sub(self.screen_rows);
        }
        if rx < self.col_offset {
            self.col_offset = rx;
        }
        if rx >= self.col_offset + self.screen_cols {
            self.col_offset = (rx + 1).saturating_sub(self.screen_cols);
        }
    }
}

/// 高亮類別對應的前景色，`None` 表示終端預設色
pub fn highlight_color(hl: Highlight) -> Option<Color> {
    match hl {
        Highlight::Normal => None,
        Highlight::Number => Some(Color::Red),
        Highlight::Match => Some(Color::Blue),
        Highlight::String => Some(Color::Magenta),
        Highlight::Comment | Highlight::MlComment => Some(Color::Cyan),
        Highlight::Keyword1 => Some(Color::Yellow),
        Highlight::Keyword2 => Some(Color::Green),
    }
}

/// 重繪整個螢幕
///
/// 調用前應先執行 [`Context::scroll`]，讓視窗偏移跟上光標。
pub fn draw<W: Write>(
    out: &mut W,
    ctx: &Context,
    overlay: Option<&MatchOverlay>,
    message: Option<&str>,
    config: &Config,
) -> Result<()> {
    queue!(out, cursor::Hide, cursor::MoveTo(0, 0))?;

    draw_rows(out, ctx, overlay)?;
    draw_status_bar(out, ctx, config)?;
    draw_message_bar(out, &ctx.viewport, message)?;

    let rx = ctx
        .document
        .row(ctx.cursor.row)
        .map_or(0, |r| r.cx_to_rx(ctx.cursor.col, ctx.document.tab_stop()));
    let x = rx.saturating_sub(ctx.viewport.col_offset);
    let y = ctx.cursor.row.saturating_sub(ctx.viewport.row_offset);
    queue!(out, cursor::MoveTo(x as u16, y as u16), cursor::Show)?;

    out.flush()?;
    Ok(())
}

fn draw_rows<W: Write>(out: &mut W, ctx: &Context, overlay: Option<&MatchOverlay>) -> Result<()> {
    let vp = &ctx.viewport;
    let doc = &ctx.document;

    for screen_row in 0..vp.screen_rows {
        let file_row = vp.row_offset + screen_row;
        queue!(out, cursor::MoveTo(0, screen_row as u16))?;

        match doc.row(file_row) {
            Some(row) => {
                let range = overlay.filter(|o| o.row == file_row).map(|o| o.range.clone());
                draw_row(out, row, range, vp)?;
            }
            None if doc.row_count() == 0 && screen_row == vp.screen_rows / 3 => {
                let welcome = format!("gkilo editor -- version {}", env!("CARGO_PKG_VERSION"));
                let welcome = truncate_to_width(&welcome, vp.screen_cols);
                let mut padding = vp.screen_cols.saturating_sub(visual_width(welcome)) / 2;
                if padding > 0 {
                    queue!(out, style::Print("~"))?;
                    padding -= 1;
                }
                queue!(out, style::Print(" ".repeat(padding)), style::Print(welcome))?;
            }
            None => {
                queue!(out, style::Print("~"))?;
            }
        }

        // 清除行的剩餘部分
        queue!(out, Clear(ClearType::UntilNewLine))?;
    }
    Ok(())
}

/// 繪製一行的可見部分，只在顏色改變時輸出控制序列
fn draw_row<W: Write>(
    out: &mut W,
    row: &Row,
    overlay: Option<std::ops::Range<usize>>,
    vp: &Viewport,
) -> Result<()> {
    let mut current: Option<Color> = None;
    let mut col = 0;

    for cell in row.cells(overlay) {
        let start = col;
        col += cell.width;
        if start < vp.col_offset {
            // 寬字元跨過左邊界時，可見的部分用空格填充
            if col > vp.col_offset {
                let filler = (col - vp.col_offset).min(vp.screen_cols);
                queue!(out, style::Print(" ".repeat(filler)))?;
            }
            continue;
        }
        if col - vp.col_offset > vp.screen_cols {
            break;
        }

        if cell.control {
            queue!(
                out,
                style::SetAttribute(Attribute::Reverse),
                style::Print(cell.ch),
                style::SetAttribute(Attribute::NoReverse)
            )?;
            continue;
        }

        let color = highlight_color(cell.hl);
        if color != current {
            match color {
                Some(c) => queue!(out, style::SetForegroundColor(c))?,
                None => queue!(out, style::ResetColor)?,
            }
            current = color;
        }
        queue!(out, style::Print(cell.ch))?;
    }

    if current.is_some() {
        queue!(out, style::ResetColor)?;
    }
    Ok(())
}

/// 狀態欄左右兩部分
pub fn status_texts(doc: &Document, row: usize, config: &Config) -> (String, String) {
    let name = doc.file_name();
    let left = format!(
        "{} - {} lines{}",
        truncate_chars(&name, config.filename_max_print),
        doc.row_count(),
        if doc.is_modified() { " (modified)" } else { "" }
    );
    let right = format!(
        "{} | {}/{}",
        doc.syntax().map_or("no ft", |s| s.name),
        row + 1,
        doc.row_count()
    );
    (left, right)
}

fn draw_status_bar<W: Write>(out: &mut W, ctx: &Context, config: &Config) -> Result<()> {
    let width = ctx.viewport.screen_cols;
    let (left, right) = status_texts(&ctx.document, ctx.cursor.row, config);

    let left = truncate_to_width(&left, width);
    let used = visual_width(left);
    let right_width = visual_width(&right);

    // 右側放不下時只填充空白
    let line = if used + right_width <= width {
        format!("{}{}{}", left, " ".repeat(width - used - right_width), right)
    } else {
        format!("{}{}", left, " ".repeat(width - used))
    };

    queue!(
        out,
        cursor::MoveTo(0, ctx.viewport.screen_rows as u16),
        style::SetAttribute(Attribute::Reverse),
        style::Print(line),
        style::SetAttribute(Attribute::Reset)
    )?;
    Ok(())
}

fn draw_message_bar<W: Write>(out: &mut W, vp: &Viewport, message: Option<&str>) -> Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, (vp.screen_rows + 1) as u16),
        Clear(ClearType::UntilNewLine)
    )?;
    if let Some(msg) = message {
        queue!(out, style::Print(truncate_to_width(msg, vp.screen_cols)))?;
    }
    Ok(())
}
