// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

/// Create an appender that writes to exactly `path` (no rotation). A bare file name is
/// created in the current folder.
///
/// Note that if you wrap this up in a non blocking writer, it doesn't work. Here's an
/// example of this:
/// `tracing_appender::non_blocking(try_create(path)?)`
///
/// # Errors
///
/// Returns an error if:
/// - The path has no file name
/// - The parent folder does not exist
pub fn try_create(
    path: &Path,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        Some(it) if !it.as_os_str().is_empty() => it,
        _ => Path::new("."),
    };

    if !parent.is_dir() {
        return Err(miette::miette!(
            "Can't access folder {}. It might not exist, or don't have required permissions.",
            parent.display()
        ));
    }

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_create_in_existing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readline.log");
        let appender = try_create(&path);
        assert!(appender.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_try_create_in_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("readline.log");
        assert!(try_create(&path).is_err());
    }
}
