//! Filename derivation and path-component sanitization.

use sha2::{Digest, Sha256};
use url::Url;

/// Hex characters of the content hash kept in derived filenames.
const CONTENT_HASH_LEN: usize = 8;

/// Fallback stem when the URL path has no usable last segment.
const FALLBACK_STEM: &str = "image";

/// Derives `{stem}-{hash}{ext}` from the URL's last path segment and the
/// SHA-256 of `content`.
///
/// The query string is ignored, so cache-busting suffixes do not change the
/// name. The same bytes always give the same name; different images that share
/// a filename stem get different names.
#[must_use]
pub fn name_with_content_hash(url: &str, content: &[u8]) -> String {
    let (stem, ext) = split_last_segment(url);
    let digest = format!("{:x}", Sha256::digest(content));
    let hash = &digest[..CONTENT_HASH_LEN];
    format!("{stem}-{hash}{ext}")
}

fn split_last_segment(url: &str) -> (String, String) {
    let segment = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .map(|raw| match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.clone(),
        })
        .unwrap_or_default();

    let (stem, ext) = match segment.rfind('.') {
        Some(dot) if dot > 0 && is_extension(&segment[dot + 1..]) => {
            (&segment[..dot], segment[dot..].to_lowercase())
        }
        _ => (segment.as_str(), String::new()),
    };

    let stem = sanitize_component(stem);
    if stem == "_" {
        (FALLBACK_STEM.to_string(), ext)
    } else {
        (stem, ext)
    }
}

fn is_extension(candidate: &str) -> bool {
    (1..=11).contains(&candidate.len()) && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Makes `name` safe as a single path component.
///
/// Separators, characters reserved on common filesystems, and control
/// characters become `_`; every dot in a run of two or more dots becomes `_`,
/// so the result never contains `..`. Surrounding whitespace is trimmed and an
/// empty or `.` result becomes `_`. Applying it twice changes nothing.
#[must_use]
pub fn sanitize_component(name: &str) -> String {
    let mapped: Vec<char> = replace_reserved(name).chars().collect();

    let mut out = String::with_capacity(mapped.len());
    for (i, &c) in mapped.iter().enumerate() {
        let dotted_run = c == '.'
            && ((i > 0 && mapped[i - 1] == '.') || mapped.get(i + 1) == Some(&'.'));
        out.push(if dotted_run { '_' } else { c });
    }

    let trimmed = out.trim();
    if trimmed.is_empty() || trimmed == "." {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Makes a resolved filename safe to join under its target directory.
///
/// Lighter than [`sanitize_component`]: separators, reserved and control
/// characters become `_` and surrounding whitespace is trimmed, but dots
/// inside the name are kept. Only a name made entirely of dots (`.`, `..`)
/// has its dots replaced, and an empty name becomes `_`.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let mapped = replace_reserved(name);
    let trimmed = mapped.trim();
    if trimmed.is_empty() {
        "_".to_string()
    } else if trimmed.chars().all(|c| c == '.') {
        "_".repeat(trimmed.len())
    } else {
        trimmed.to_string()
    }
}

fn replace_reserved(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
