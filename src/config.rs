// 配置管理

use std::time::Duration;

pub struct Config {
    /// Tab 展開的固定空格數
    pub tab_stop: usize,
    /// 有未保存修改時，需連續按幾次退出鍵
    pub quit_times: u8,
    /// 狀態訊息顯示多久後消失
    pub message_timeout: Duration,
    /// 狀態欄中文件名最多顯示的字符數
    pub filename_max_print: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            tab_stop: 4,
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
            filename_max_print: 20,
        }
    }

    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
