/// File category classification based on file extensions.
///
/// Groups files into coarse content categories. When an extension appears
/// in more than one group (`ogg` is both video and audio) the first group
/// in [`Category::PRECEDENCE`] wins.
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Coarse content categories, declared in match precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "doc")]
    Document,
    #[serde(rename = "source code")]
    SourceCode,
    #[serde(rename = "executable")]
    Executable,
    #[serde(rename = "disk image")]
    DiskImage,
    #[serde(rename = "virtual machine image")]
    VmImage,
    #[serde(rename = "database")]
    Database,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "sub")]
    Subtitle,
    #[serde(rename = "archive")]
    Archive,
    #[serde(rename = "undefined")]
    Undefined,
}

const VIDEO: &[&str] = &["mp4", "webm", "avi", "mkv", "mov", "ogg", "wmv"];

const IMAGE: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];

const DOCUMENT: &[&str] = &[
    "txt", "odt", "ods", "odp", "html", "css", "pdf", "mhtml", "xml", "json", "docx", "djvu",
    "djv", "xls", "xlsx", "ppt", "pptx", "md", "markdown", "yaml", "yml",
];

const SOURCE_CODE: &[&str] = &[
    "py", "pyi", "js", "mjs", "cjs", "ts", "tsx", "java", "c", "cpp", "cxx", "cc", "h", "hpp",
    "hxx", "cs", "rb", "erb", "php", "phtml", "go", "rs", "swift", "kt", "kts", "dart", "sh",
    "bash", "zsh", "pl", "pm", "r", "rmd", "m", "asm", "s", "hs", "scala", "ex", "exs", "erl",
    "hrl", "lua", "d", "fs", "fsx", "mm", "groovy", "bas", "vb", "ps1",
];

const EXECUTABLE: &[&str] = &[
    "exe", "dll", "so", "bin", "app", "dmg", "elf", "o", "obj", "class", "jar", "pyc", "pyd",
    "wasm",
];

const DISK_IMAGE: &[&str] = &["iso", "img"];

const VM_IMAGE: &[&str] = &["vhd", "vhdx", "vmdk"];

const DATABASE: &[&str] = &["db", "mdb", "sqlite", "sql"];

const AUDIO: &[&str] = &["mp3", "flac", "m4a", "wav", "ogg"];

const SUBTITLE: &[&str] = &["srt", "ass", "vtt"];

const ARCHIVE: &[&str] = &["zip", "rar", "gzip", "gz", "tar", "7z"];

impl Category {
    /// Every category that owns an extension set, in match order.
    /// `Undefined` is the fallback and has no set of its own.
    pub const PRECEDENCE: [Category; 11] = [
        Self::Video,
        Self::Image,
        Self::Document,
        Self::SourceCode,
        Self::Executable,
        Self::DiskImage,
        Self::VmImage,
        Self::Database,
        Self::Audio,
        Self::Subtitle,
        Self::Archive,
    ];

    /// Label used in reports and as the breakdown key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Document => "doc",
            Self::SourceCode => "source code",
            Self::Executable => "executable",
            Self::DiskImage => "disk image",
            Self::VmImage => "virtual machine image",
            Self::Database => "database",
            Self::Audio => "audio",
            Self::Subtitle => "sub",
            Self::Archive => "archive",
            Self::Undefined => "undefined",
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO,
            Self::Image => IMAGE,
            Self::Document => DOCUMENT,
            Self::SourceCode => SOURCE_CODE,
            Self::Executable => EXECUTABLE,
            Self::DiskImage => DISK_IMAGE,
            Self::VmImage => VM_IMAGE,
            Self::Database => DATABASE,
            Self::Audio => AUDIO,
            Self::Subtitle => SUBTITLE,
            Self::Archive => ARCHIVE,
            Self::Undefined => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an extension into a [`Category`].
///
/// Accepts the extension with or without its leading dot. Matching is
/// case-insensitive; the extension is lowercased into a fixed stack buffer,
/// so anything longer than 16 bytes is `Undefined` without allocating.
pub fn classify_by_category(extension: &str) -> Category {
    let bytes = extension.strip_prefix('.').unwrap_or(extension).as_bytes();
    if bytes.is_empty() || bytes.len() > 16 {
        return Category::Undefined;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let Ok(lower_str) = std::str::from_utf8(&lower[..bytes.len()]) else {
        return Category::Undefined;
    };

    Category::PRECEDENCE
        .into_iter()
        .find(|category| category.extensions().contains(&lower_str))
        .unwrap_or(Category::Undefined)
}

/// Lowercase suffix of `path` including the leading dot, or `""` when the
/// file name has no suffix. Dotfiles such as `.bashrc` have no suffix.
pub fn extension_key(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        Some(_) | None => String::new(),
    }
}
