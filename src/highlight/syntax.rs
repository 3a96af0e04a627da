// 文件類型與語法設定

use once_cell::sync::Lazy;
use std::path::Path;

use super::Highlight;

/// 是否啟用數字 / 字串高亮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: Vec<char>,
    pub class: Highlight,
}

impl Keyword {
    /// 解析關鍵字定義，結尾的 `|` 表示次要關鍵字，`|` 本身不參與比較
    pub fn parse(def: &str) -> Self {
        match def.strip_suffix('|') {
            Some(text) => Self {
                text: text.chars().collect(),
                class: Highlight::Keyword2,
            },
            None => Self {
                text: def.chars().collect(),
                class: Highlight::Keyword1,
            },
        }
    }
}

/// 驅動高亮器的語言設定
#[derive(Debug, Clone)]
pub struct SyntaxProfile {
    pub name: &'static str,
    /// 以 `.` 開頭為副檔名匹配，否則為文件名子字串匹配
    pub file_match: &'static [&'static str],
    /// 空表示沒有單行註解
    pub single_line_comment: Vec<char>,
    pub block_comment_start: Vec<char>,
    pub block_comment_end: Vec<char>,
    pub keywords: Vec<Keyword>,
    pub flags: HighlightFlags,
}

struct ProfileDef {
    name: &'static str,
    file_match: &'static [&'static str],
    single_line_comment: &'static str,
    block_comment: (&'static str, &'static str),
    keywords: &'static [&'static str],
    flags: HighlightFlags,
}

const ALL_FLAGS: HighlightFlags = HighlightFlags {
    numbers: true,
    strings: true,
};

const PROFILE_DEFS: &[ProfileDef] = &[
    ProfileDef {
        name: "c",
        file_match: &[".c", ".h", ".cpp"],
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
            "float|", "char|", "unsigned|", "signed|", "void|",
        ],
        flags: ALL_FLAGS,
    },
    ProfileDef {
        name: "go",
        file_match: &[".go"],
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        keywords: &[
            "break", "case", "chan", "const", "continue", "default", "defer", "else",
            "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
            "package", "range", "return", "select", "struct", "switch", "type", "var", "int|",
            "int64|", "uint|", "byte|", "rune|", "string|", "bool|", "float64|", "error|",
            "any|",
        ],
        flags: ALL_FLAGS,
    },
    ProfileDef {
        name: "rust",
        file_match: &[".rs"],
        single_line_comment: "//",
        block_comment: ("/*", "*/"),
        keywords: &[
            "as", "break", "const", "continue", "crate", "else", "enum", "fn", "for", "if",
            "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "return",
            "self", "static", "struct", "trait", "type", "use", "where", "while", "i32|",
            "i64|", "u8|", "u32|", "u64|", "usize|", "f64|", "bool|", "char|", "str|",
            "String|", "Self|",
        ],
        flags: ALL_FLAGS,
    },
    ProfileDef {
        name: "python",
        file_match: &[".py"],
        single_line_comment: "#",
        block_comment: ("", ""),
        keywords: &[
            "and", "as", "break", "class", "continue", "def", "elif", "else", "except", "for",
            "from", "if", "import", "in", "is", "lambda", "not", "or", "pass", "return", "try",
            "while", "with", "yield", "None|", "True|", "False|", "self|",
        ],
        flags: ALL_FLAGS,
    },
];

static SYNTAX_DB: Lazy<Vec<SyntaxProfile>> =
    Lazy::new(|| PROFILE_DEFS.iter().map(SyntaxProfile::from_def).collect());

impl SyntaxProfile {
    fn from_def(def: &ProfileDef) -> Self {
        Self {
            name: def.name,
            file_match: def.file_match,
            single_line_comment: def.single_line_comment.chars().collect(),
            block_comment_start: def.block_comment.0.chars().collect(),
            block_comment_end: def.block_comment.1.chars().collect(),
            keywords: def.keywords.iter().map(|k| Keyword::parse(k)).collect(),
            flags: def.flags,
        }
    }

    /// 所有內建語法設定
    pub fn builtin() -> &'static [SyntaxProfile] {
        &SYNTAX_DB
    }

    pub fn by_name(name: &str) -> Option<&'static SyntaxProfile> {
        SYNTAX_DB.iter().find(|p| p.name == name)
    }

    /// 根據文件名選擇第一個匹配的語法設定
    pub fn for_filename(path: &Path) -> Option<&'static SyntaxProfile> {
        SYNTAX_DB.iter().find(|profile| profile.matches(path))
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let extension = path.extension().and_then(|e| e.to_str());

        self.file_match
            .iter()
            .any(|pattern| match pattern.strip_prefix('.') {
                Some(ext) => extension == Some(ext),
                None => file_name.contains(pattern),
            })
    }

    pub fn has_block_comments(&self) -> bool {
        !self.block_comment_start.is_empty() && !self.block_comment_end.is_empty()
    }
}
