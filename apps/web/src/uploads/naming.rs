//! Filesystem-safe, collision-resistant names for uploaded templates.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::template::TemplateKind;

/// Extra attempts with a longer random suffix once every single letter is taken.
const WIDE_SUFFIX_ATTEMPTS: usize = 8;
const WIDE_SUFFIX_LEN: usize = 8;

/// NAME_MAX on common filesystems, in bytes.
const MAX_FILENAME_LEN: usize = 255;
/// Longest extension kept, leading dot included.
const MAX_EXTENSION_LEN: usize = 16;

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Splits `name` into `(base, extension)`, the extension keeping its leading dot.
///
/// Only the final `/` component is searched, and leading dots of that component never
/// start an extension: `.bashrc` has none, `archive.tar.gz` has `.gz`.
pub fn split_extension(name: &str) -> (&str, &str) {
    let tail_start = name.rfind('/').map_or(0, |i| i + 1);
    let tail = &name[tail_start..];
    let leading_dots = tail.len() - tail.trim_start_matches('.').len();

    match tail[leading_dots..].rfind('.') {
        Some(dot) => name.split_at(tail_start + leading_dots + dot),
        None => (name, ""),
    }
}

/// Reduces an arbitrary string to a name that is safe to join onto a directory.
///
/// Non-ASCII characters are dropped, path separators and whitespace collapse into `_`,
/// anything outside `[A-Za-z0-9_.-]` is removed and dot runs are squeezed, so the result
/// can never traverse upwards. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let mut cleaned = String::with_capacity(spaced.len());
    for c in spaced
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    let stem = cleaned.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| stem.eq_ignore_ascii_case(device))
    {
        return format!("_{cleaned}");
    }
    cleaned.to_string()
}

/// Composes `{base}_{type}_{YYYYMMDD}_{suffix}{ext}` and sanitizes the result.
///
/// Over-long bases and extensions are cut so the name fits in [`MAX_FILENAME_LEN`] bytes
/// while the `_{type}_{YYYYMMDD}_{suffix}` part survives intact. Sanitizing never makes
/// a long name longer.
pub fn unique_filename(
    original_name: &str,
    kind: TemplateKind,
    date: NaiveDate,
    suffix: &str,
) -> String {
    let (base, ext) = split_extension(original_name);
    let ext = truncate_bytes(ext, MAX_EXTENSION_LEN);
    let tail = format!(
        "_{kind}_{date}_{suffix}{ext}",
        kind = kind.as_str(),
        date = date.format("%Y%m%d"),
    );
    let base = truncate_bytes(base, MAX_FILENAME_LEN.saturating_sub(tail.len()));
    secure_filename(&format!("{base}{tail}"))
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Suffixes to try, in order: the 26 uppercase letters shuffled, then a few longer
/// random suffixes for days on which every letter is already in use.
pub fn candidate_suffixes<R: Rng>(rng: &mut R) -> Vec<String> {
    let mut letters: Vec<char> = ('A'..='Z').collect();
    letters.shuffle(rng);

    let mut suffixes: Vec<String> = letters.into_iter().map(String::from).collect();
    suffixes.extend((0..WIDE_SUFFIX_ATTEMPTS).map(|_| random_letters(rng, WIDE_SUFFIX_LEN)));
    suffixes
}

fn random_letters<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
        .collect()
}
