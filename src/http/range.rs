//! Range header parsing for raw file responses
//!
//! Single `bytes=` ranges only; multi-range requests are ignored and served
//! as full content, which RFC 7233 permits.

/// Outcome of parsing a Range header against a known file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// No usable Range header, serve the whole file
    Full,
    /// Serve `start..=end` (both inclusive, already clamped to the file)
    Partial { start: usize, end: usize },
    /// Range cannot be satisfied, respond 416
    Unsatisfiable,
}

/// Parse an HTTP Range header value
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn parse_range_header(header: Option<&str>, file_size: usize) -> ByteRange {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return ByteRange::Full;
    };
    if spec.contains(',') || file_size == 0 {
        return ByteRange::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return ByteRange::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        return match end_str.parse::<usize>() {
            Ok(0) => ByteRange::Unsatisfiable,
            Ok(suffix) => ByteRange::Partial {
                start: file_size.saturating_sub(suffix),
                end: file_size - 1,
            },
            Err(_) => ByteRange::Full,
        };
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return ByteRange::Full;
    };
    if start >= file_size {
        return ByteRange::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        match end_str.parse::<usize>() {
            Ok(e) => e.min(file_size - 1),
            Err(_) => return ByteRange::Full,
        }
    };

    if start > end {
        return ByteRange::Unsatisfiable;
    }

    ByteRange::Partial { start, end }
}
