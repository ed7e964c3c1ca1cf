// Reading matrix files from disk

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;
use symgrid_engine::Grid;

use crate::error::LoadError;
use crate::json;
use crate::loader::{self, LoadOptions};

/// On-disk encoding of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is matrix text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Text,
        }
    }
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
///
/// The handle is scoped to this call and closed on every return path.
pub fn read_to_string(path: &Path) -> Result<String, LoadError> {
    let unavailable = |reason: String| LoadError::ResourceUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| unavailable(e.to_string()))?;

    Ok(decode(bytes))
}

/// A byte-order mark selects the encoding and is dropped. Otherwise UTF-8
/// first; on failure, recover the buffer and decode as Windows-1252.
pub fn decode(bytes: Vec<u8>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(&bytes) {
        log::debug!("input has a {} byte-order mark", encoding.name());
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Parse already-read content in the given format.
pub fn parse_content(
    content: &str,
    format: Format,
    options: &LoadOptions,
) -> Result<Grid, LoadError> {
    match format {
        Format::Text => loader::parse_with(content, options),
        Format::Json => json::from_json(content),
    }
}

/// Read and parse a matrix file, choosing the format from its extension.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Grid, LoadError> {
    load_as(path, Format::from_path(path), options)
}

/// Read and parse a matrix file in an explicit format.
pub fn load_as(path: &Path, format: Format, options: &LoadOptions) -> Result<Grid, LoadError> {
    let content = read_to_string(path)?;
    parse_content(&content, format, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Layout;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_resource_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match load(&path, &LoadOptions::default()) {
            Err(LoadError::ResourceUnavailable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ResourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn directory_is_resource_unavailable() {
        let dir = tempdir().unwrap();
        let err = read_to_string(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::ResourceUnavailable { .. }));
    }

    #[test]
    fn load_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.txt");
        fs::write(&path, "3\n1 2 1\n4 5 6\n0 0 0\n").unwrap();

        let grid = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.row(1), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn load_respects_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.txt");
        fs::write(&path, "2\n1 2 3 4\n").unwrap();

        assert!(load(&path, &LoadOptions::default()).is_err());
        let grid = load(&path, &LoadOptions::with_layout(Layout::Tokens)).unwrap();
        assert_eq!(grid.get(1, 1), Some(4.0));
    }

    #[test]
    fn load_json_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.JSON");
        fs::write(&path, "[[1, 0, 1], [2, 2, 2], [3, 4, 5]]").unwrap();

        let grid = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(grid.get(2, 2), Some(5.0));
    }

    #[test]
    fn windows_1252_fallback() {
        // 0xA0 (NBSP in Windows-1252) is invalid as a lone UTF-8 byte
        let decoded = decode(vec![b'1', 0xA0, b'\n', b'4', b'\n']);
        assert_eq!(decoded, "1\u{a0}\n4\n");
        // NBSP is whitespace, so the content still parses
        assert!(loader::parse(&decoded).is_ok());
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = decode(b"\xEF\xBB\xBF2\n1 1\n2 2\n".to_vec());
        assert_eq!(decoded, "2\n1 1\n2 2\n");
        assert_eq!(loader::parse(&decoded).unwrap().size(), 2);
    }

    #[test]
    fn utf16_bom_selects_encoding() {
        // "1\n5\n" as UTF-16LE
        let bytes = vec![0xFF, 0xFE, b'1', 0, b'\n', 0, b'5', 0, b'\n', 0];
        assert_eq!(decode(bytes), "1\n5\n");
    }

    #[test]
    fn load_bom_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notepad.txt");
        fs::write(&path, b"\xEF\xBB\xBF1\r\n9\r\n").unwrap();

        let grid = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(grid.get(0, 0), Some(9.0));
    }

    #[test]
    fn load_as_overrides_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.txt");
        fs::write(&path, "[[1, 2], [2, 1]]").unwrap();

        assert!(matches!(
            load(&path, &LoadOptions::default()),
            Err(LoadError::InvalidSize { .. })
        ));
        let grid = load_as(&path, Format::Json, &LoadOptions::default()).unwrap();
        assert_eq!(grid.get(1, 0), Some(2.0));
    }
}
