//! File naming and writing of rendered avatars.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use monogram::{AvatarError, OutputFormat};

/// Where the encoded avatar goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output.
    Stdout,
    /// A file on disk.
    File(PathBuf),
}

/// Generate an output filename from the avatar text and format.
///
/// Sanitizes the first 50 characters of the text to kebab-case,
/// appends a unix timestamp, and adds the format's file extension.
#[must_use]
pub fn auto_filename(text: &str, format: OutputFormat) -> String {
    let sanitized = sanitize_for_filename(text, 50);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{sanitized}-{timestamp}.{}", format.extension())
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "avatar".to_string()
    } else {
        result
    }
}

/// Resolve the destination: `-` is stdout, otherwise an explicit or generated path.
#[must_use]
pub fn resolve_destination(explicit: Option<&str>, text: &str, format: OutputFormat) -> Destination {
    match explicit {
        Some("-") => Destination::Stdout,
        Some(p) => Destination::File(PathBuf::from(p)),
        None => Destination::File(PathBuf::from(auto_filename(text, format))),
    }
}

/// Write encoded avatar bytes to the destination.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_avatar(data: &[u8], destination: &Destination) -> Result<(), AvatarError> {
    match destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
        Destination::File(path) => write_file(data, path)?,
    }
    Ok(())
}

fn write_file(data: &[u8], path: &Path) -> Result<(), AvatarError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("Ada Lovelace", 50), "ada-lovelace");
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(sanitize_for_filename("John O'Brien!!", 50), "john-o-brien");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_for_filename("", 50), "avatar");
        assert_eq!(sanitize_for_filename("!!!", 50), "avatar");
    }

    #[test]
    fn auto_filename_uses_format_extension() {
        let name = auto_filename("Ada Lovelace", OutputFormat::Jpeg);
        assert!(name.starts_with("ada-lovelace-"));
        assert_eq!(Path::new(&name).extension().unwrap(), "jpg");
        assert_eq!(Path::new(&auto_filename("x", OutputFormat::WebP)).extension().unwrap(), "webp");
    }

    #[test]
    fn resolve_stdout() {
        assert_eq!(resolve_destination(Some("-"), "x", OutputFormat::Png), Destination::Stdout);
    }

    #[test]
    fn resolve_explicit() {
        let dest = resolve_destination(Some("me.png"), "ignored", OutputFormat::Jpeg);
        assert_eq!(dest, Destination::File(PathBuf::from("me.png")));
    }

    #[test]
    fn resolve_auto() {
        let Destination::File(path) = resolve_destination(None, "Ada", OutputFormat::Png) else {
            panic!("expected a file destination");
        };
        assert!(path.to_str().unwrap().starts_with("ada-"));
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("monogram_output_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested/avatar.png");

        write_avatar(&[1, 2, 3], &Destination::File(path.clone())).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
