// 狀態訊息：帶時間戳，重繪時檢查是否過期

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, Instant::now())
    }

    pub fn at(text: impl Into<String>, set_at: Instant) -> Self {
        Self {
            text: text.into(),
            set_at,
        }
    }

    /// 在 `now` 時刻仍可見則返回訊息內容
    pub fn visible(&self, now: Instant, timeout: Duration) -> Option<&str> {
        if now.saturating_duration_since(self.set_at) < timeout && !self.text.is_empty() {
            Some(&self.text)
        } else {
            None
        }
    }
}
