//! Text file I/O that preserves the file's encoding
//!
//! Supported encodings:
//! - UTF-8 with or without a byte-order mark
//! - UTF-16 little-endian with a byte-order mark
//! - UTF-16 big-endian with a byte-order mark

use crate::error::ManagerError;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Encoding detected when a text file was read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    /// Returns the byte-order mark written for this encoding
    pub fn bom(&self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => &[],
            TextEncoding::Utf8Bom => UTF8_BOM,
            TextEncoding::Utf16Le => UTF16_LE_BOM,
            TextEncoding::Utf16Be => UTF16_BE_BOM,
        }
    }
}

/// Decoded file content together with the encoding it was read with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub content: String,
    pub encoding: TextEncoding,
}

/// Reads and decodes a text file
pub fn read_text(path: &Path) -> Result<TextFile, ManagerError> {
    let bytes = fs::read(path).map_err(|e| ManagerError::read_error(path, e))?;
    decode(&bytes).map_err(|message| ManagerError::invalid_encoding(path, message))
}

/// Encodes `content` and writes it to `path`, replacing the file
pub fn write_text(path: &Path, content: &str, encoding: TextEncoding) -> Result<(), ManagerError> {
    fs::write(path, encode(content, encoding)).map_err(|e| ManagerError::write_error(path, e))
}

/// Decodes raw bytes, detecting the encoding from the byte-order mark
pub fn decode(bytes: &[u8]) -> Result<TextFile, String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return Ok(TextFile {
            content: decode_utf8(rest)?,
            encoding: TextEncoding::Utf8Bom,
        });
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return Ok(TextFile {
            content: decode_utf16(rest, u16::from_le_bytes)?,
            encoding: TextEncoding::Utf16Le,
        });
    }

    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return Ok(TextFile {
            content: decode_utf16(rest, u16::from_be_bytes)?,
            encoding: TextEncoding::Utf16Be,
        });
    }

    Ok(TextFile {
        content: decode_utf8(bytes)?,
        encoding: TextEncoding::Utf8,
    })
}

/// Encodes text with the given encoding, including its byte-order mark
pub fn encode(content: &str, encoding: TextEncoding) -> Vec<u8> {
    let mut bytes = encoding.bom().to_vec();
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => bytes.extend_from_slice(content.as_bytes()),
        TextEncoding::Utf16Le => bytes.extend(content.encode_utf16().flat_map(u16::to_le_bytes)),
        TextEncoding::Utf16Be => bytes.extend(content.encode_utf16().flat_map(u16::to_be_bytes)),
    }
    bytes
}

fn decode_utf8(bytes: &[u8]) -> Result<String, String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err("UTF-16 content has an odd number of bytes".to_string());
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();

    String::from_utf16(&units).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_plain_utf8() {
        let file = decode("héllo".as_bytes()).unwrap();
        assert_eq!(file.content, "héllo");
        assert_eq!(file.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_utf8_bom() {
        let file = decode(&[0xEF, 0xBB, 0xBF, b'a', b'b']).unwrap();
        assert_eq!(file.content, "ab");
        assert_eq!(file.encoding, TextEncoding::Utf8Bom);
    }

    #[test]
    fn test_decode_utf16_le() {
        let file = decode(&[0xFF, 0xFE, b'h', 0, b'i', 0]).unwrap();
        assert_eq!(file.content, "hi");
        assert_eq!(file.encoding, TextEncoding::Utf16Le);
    }

    #[test]
    fn test_decode_utf16_be() {
        let file = decode(&[0xFE, 0xFF, 0, b'h', 0, b'i']).unwrap();
        assert_eq!(file.content, "hi");
        assert_eq!(file.encoding, TextEncoding::Utf16Be);
    }

    #[test]
    fn test_decode_odd_utf16_fails() {
        assert!(decode(&[0xFF, 0xFE, b'h']).is_err());
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        assert!(decode(&[0xC3, 0x28]).is_err());
    }

    #[test]
    fn test_encode_restores_bom() {
        assert_eq!(encode("ab", TextEncoding::Utf8Bom), vec![0xEF, 0xBB, 0xBF, b'a', b'b']);
        assert_eq!(encode("a", TextEncoding::Utf16Le), vec![0xFF, 0xFE, b'a', 0]);
        assert_eq!(encode("a", TextEncoding::Utf16Be), vec![0xFE, 0xFF, 0, b'a']);
        assert_eq!(encode("a", TextEncoding::Utf8), vec![b'a']);
    }

    #[test]
    fn test_write_keeps_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AssemblyInfo.cs");
        std::fs::write(&path, encode("old", TextEncoding::Utf16Le)).unwrap();

        let file = read_text(&path).unwrap();
        write_text(&path, "new", file.encoding).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, vec![0xFF, 0xFE, b'n', 0, b'e', 0, b'w', 0]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_text(&dir.path().join("missing.cs")).unwrap_err();
        assert!(matches!(err, ManagerError::ReadError { .. }));
    }
}
