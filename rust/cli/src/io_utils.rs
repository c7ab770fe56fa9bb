//! File I/O utilities for reading hand-history exports and preparing output
//! paths.
//!
//! ## Compressed File Support
//!
//! `read_text_auto` decompresses `.zst` (Zstandard) files based on the file
//! extension, so archived exports can be parsed without unpacking them first.

/// Read a text file, decompressing `.zst` files and stripping a UTF-8 BOM.
///
/// Hand-history exports saved by Windows tools often start with a BOM, which
/// would otherwise end up in front of the first hand's header.
///
/// # Example
///
/// ```rust,no_run
/// # use hhreplay_cli::io_utils::read_text_auto;
/// let export = read_text_auto("HH20250730 Tournament.txt").unwrap();
/// let archived = read_text_auto("HH20250730 Tournament.txt.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 64 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
