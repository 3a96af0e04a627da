/// 光標移動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// 按鍵映射後的邏輯動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // 字符輸入
    Insert(char),

    // 刪除操作
    Backspace,  // 刪除光標左側字符
    Delete,     // 刪除光標下的字符
    DeleteLine, // 刪除整行

    // 換行（拆分當前行）
    InsertNewline,

    // 光標移動
    Move(Direction),

    // 文件操作
    Save,
    Quit,

    // 搜索
    Find,

    // 提示框中的確認 / 取消
    Confirm,
    Cancel,
}
