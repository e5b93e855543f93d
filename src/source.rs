//! Reading SQL scripts from disk

use std::path::Path;

use encoding_rs::WINDOWS_1252;

use crate::error::SqlSyncError;

const UTF8_BOM: char = '\u{feff}';

/// Read a script as text, trying UTF-8 first, then Windows-1252 as fallback.
///
/// A leading byte-order mark is dropped.
pub fn read_sql_file(path: &Path) -> Result<String, SqlSyncError> {
    let bytes = std::fs::read(path).map_err(|source| SqlSyncError::SqlFileReadError {
        path: path.to_path_buf(),
        source,
    })?;
    decode_sql(bytes).ok_or_else(|| SqlSyncError::SqlFileEncodingError {
        path: path.to_path_buf(),
    })
}

/// Decode script bytes; `None` when they are neither UTF-8 nor Windows-1252
pub fn decode_sql(bytes: Vec<u8>) -> Option<String> {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            // Scripts saved by older Windows tools are commonly Windows-1252
            let (decoded, _, had_errors) = WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return None;
            }
            decoded.into_owned()
        }
    };
    Some(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
