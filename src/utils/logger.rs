// 日誌工具
//
// 編輯器佔用整個終端，因此日誌寫入文件而不是 stderr

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// 開啟調試模式但未指定日誌文件時使用的默認文件名
pub const DEFAULT_LOG_FILE: &str = "gkilo.log";

pub fn init_logger(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);

    let target = match log_file {
        Some(path) => Some(path),
        None if debug => Some(Path::new(DEFAULT_LOG_FILE)),
        None => None,
    };

    if let Some(path) = target {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}
