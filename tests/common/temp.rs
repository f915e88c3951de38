use std::{
    fs,
    path::{Path, PathBuf},
};

use enc_lines::Encoding;
use tempfile::TempDir;

/// Scratch directory removed when dropped.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn new() -> Self {
        Self { dir: tempfile::Builder::new().prefix("enc_lines_").tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_bytes(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Write `fixture` and return its path.
    pub fn write_fixture(&self, rel: &str, fixture: &Fixture) -> PathBuf {
        self.write_bytes(rel, &fixture.bytes())
    }
}

/// Text stored in a given encoding, optionally behind its BOM.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub text: String,
    pub encoding: Encoding,
    pub with_bom: bool,
}

impl Fixture {
    pub fn new(text: impl Into<String>, encoding: Encoding) -> Self {
        Self { text: text.into(), encoding, with_bom: false }
    }

    #[allow(dead_code)]
    pub fn with_bom(mut self) -> Self {
        self.with_bom = true;
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = if self.with_bom { bom(self.encoding).to_vec() } else { Vec::new() };
        bytes.extend(encode(&self.text, self.encoding));
        bytes
    }

    /// Lines the exact strategies must report.
    #[allow(dead_code)]
    pub fn expected_lines(&self) -> u64 {
        if self.text.is_empty() {
            return 0;
        }
        let crlf = self.text.matches("\r\n").count();
        let terminators = self.text.chars().filter(|&c| c == '\r' || c == '\n').count();
        (terminators - crlf) as u64 + 1
    }
}

fn bom(encoding: Encoding) -> &'static [u8] {
    match encoding {
        Encoding::Utf8 => &[0xEF, 0xBB, 0xBF],
        Encoding::Utf16Le => &[0xFF, 0xFE],
        Encoding::Utf16Be => &[0xFE, 0xFF],
        Encoding::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
        Encoding::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        Encoding::Gb18030 => &[0x84, 0x31, 0x95, 0x33],
        Encoding::Iso8859_1 => &[],
    }
}

/// Encode `text`; only ASCII is supported for GB18030 and ISO-8859-1.
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        Encoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        Encoding::Utf32Le => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
        Encoding::Utf32Be => text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect(),
        Encoding::Utf8 | Encoding::Gb18030 | Encoding::Iso8859_1 => text.as_bytes().to_vec(),
    }
}
