use anyhow::{bail, Result};
use gkilo::config::Config;
use gkilo::editor::Editor;
use gkilo::terminal::Terminal;
use gkilo::utils;
use std::ffi::OsStr;
use std::path::PathBuf;

const HELP: &str = "\
gkilo - A small terminal text editor with syntax highlighting

USAGE:
  gkilo [OPTIONS] [FILE]

OPTIONS:
  -f, --file <FILE>     File to open
      --tab-stop <N>    Number of spaces a tab expands to (default: 4)
      --debug           Enable debug logging (written to gkilo.log)
      --log <PATH>      Write log records to PATH
  -h, --help            Print help
  -V, --version         Print version

KEYBOARD SHORTCUTS:
  Ctrl+S              Save file
  Ctrl+Q              Quit (press repeatedly if modified)
  Ctrl+F              Find (arrows: next/previous match, ESC: cancel)
  Backspace/Ctrl+H    Delete character before cursor
  Delete              Delete character under cursor
  Ctrl+D/Ctrl+L       Delete current line
  Arrow Keys          Move cursor
  Home/End            Move to line start/end
  Page Up/Down        Scroll page up/down
";

struct Args {
    file: Option<PathBuf>,
    tab_stop: Option<usize>,
    debug: bool,
    log_file: Option<PathBuf>,
}

fn parse_path(s: &OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}

/// 解析命令列；已經打印幫助或版本時返回 `None`
fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    if pargs.contains(["-V", "--version"]) {
        println!("gkilo {}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    let debug = pargs.contains("--debug");
    let tab_stop: Option<usize> = pargs.opt_value_from_str("--tab-stop")?;
    let log_file = pargs.opt_value_from_os_str("--log", parse_path)?;
    let mut file = pargs.opt_value_from_os_str(["-f", "--file"], parse_path)?;
    if file.is_none() {
        file = pargs.opt_free_from_os_str(parse_path)?;
        if let Some(path) = &file {
            if path.to_string_lossy().starts_with('-') {
                bail!("Unknown argument: {}", path.display());
            }
        }
    }

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unknown arguments: {:?}", remaining);
    }

    if tab_stop == Some(0) {
        bail!("--tab-stop must be at least 1");
    }

    Ok(Some(Args {
        file,
        tab_stop,
        debug,
        log_file,
    }))
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // 初始化日誌
    utils::init_logger(args.debug, args.log_file.as_deref())?;

    let mut config = Config::new();
    if let Some(tab_stop) = args.tab_stop {
        config = config.with_tab_stop(tab_stop);
    }

    // 創建編輯器，文件讀取失敗時直接退出，不觸碰終端
    let mut editor = Editor::new(args.file.as_deref(), config)?;

    // 設置 panic hook 以確保終端正常恢復
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = Terminal::exit_raw_mode();
        let _ = Terminal::show_cursor();
        original_hook(panic_info);
    }));

    editor.run()?;

    Ok(())
}
