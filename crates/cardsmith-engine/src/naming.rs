//! Deck names and output file names derived from source file names.

use std::path::Path;

/// Extension of source documents.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Suffix replacing [`MARKDOWN_EXTENSION`] in output file names.
pub const FLASHCARDS_SUFFIX: &str = "-flashcards.csv";

/// Whether `file_name` names a markdown document.
pub fn is_markdown(file_name: &str) -> bool {
    file_name.ends_with(MARKDOWN_EXTENSION)
}

/// The file name without its markdown (or other) extension.
pub fn file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or_else(|| {
        Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
    })
}

/// Derive a deck name: strip the extension, turn `-` and `_` into spaces
/// and title-case the result.
///
/// ```
/// use cardsmith_engine::naming::deck_name_from_filename;
///
/// assert_eq!(deck_name_from_filename("american-gothic_lit.md"), "American Gothic Lit");
/// ```
pub fn deck_name_from_filename(file_name: &str) -> String {
    title_case(&file_stem(file_name).replace(['-', '_'], " "))
}

/// Derive the CSV file name for a markdown file name.
///
/// ```
/// use cardsmith_engine::naming::output_filename_for;
///
/// assert_eq!(output_filename_for("baroque-essay.md"), "baroque-essay-flashcards.csv");
/// ```
pub fn output_filename_for(file_name: &str) -> String {
    format!("{}{}", file_stem(file_name), FLASHCARDS_SUFFIX)
}

/// Deck name for a source path, from its final component.
pub fn deck_name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| deck_name_from_filename(&name.to_string_lossy()))
        .unwrap_or_default()
}

/// Title-case every word: the first letter of each run of letters is
/// uppercased and the rest lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
