//! Deriving the short display string drawn on an avatar.

/// Upper bound on the number of segments that contribute an initial.
pub const MAX_INITIALS: usize = 3;

/// Keep only word characters, `@`, and spaces.
///
/// Word characters are Unicode alphanumerics plus `_`, so `"Łukasz Nowak"`
/// keeps its letters while punctuation and emoji are dropped.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| c.is_alphanumeric() || matches!(c, '_' | '@' | ' ')).collect()
}

/// Choose the separator used to split the text.
///
/// An explicit non-empty separator wins, then a space if the text has one,
/// then `.`.
#[must_use]
pub fn resolve_separator<'a>(text: &str, explicit: Option<&'a str>) -> &'a str {
    match explicit {
        Some(sep) if !sep.is_empty() => sep,
        _ if text.contains(' ') => " ",
        _ => ".",
    }
}

/// Compute initials for trimmed text and a resolved separator.
///
/// The separator is looked for before sanitizing so punctuation separators
/// such as `.` survive. When it occurs, every segment is sanitized, blank
/// segments are dropped, and the first character of each remaining one is
/// kept, up to [`MAX_INITIALS`]. Otherwise the result is the first character
/// of the sanitized text, or empty.
#[must_use]
pub fn initials_for_separator(text: &str, separator: &str) -> String {
    if text.contains(separator) {
        text.split(separator)
            .filter_map(|segment| sanitize(segment).trim_start().chars().next())
            .take(MAX_INITIALS)
            .collect()
    } else {
        sanitize(text).trim_start().chars().next().map(String::from).unwrap_or_default()
    }
}

/// Full extraction pipeline: trim, split, sanitize, and optionally uppercase.
#[must_use]
pub fn extract(text: &str, separator: Option<&str>, upcase: bool) -> String {
    let trimmed = text.trim();
    let separator = resolve_separator(trimmed, separator);
    let initials = initials_for_separator(trimmed, separator);
    if upcase {
        initials.to_uppercase()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filters_punctuation() {
        assert_eq!(sanitize("John O'Brien!"), "John OBrien");
        assert_eq!(sanitize("a.b"), "ab");
        assert_eq!(sanitize("dev_ops@example"), "dev_ops@example");
        assert_eq!(sanitize("🎉🎉"), "");
    }

    #[test]
    fn sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize("Łukasz Żółw"), "Łukasz Żółw");
        assert_eq!(sanitize("山田 太郎"), "山田 太郎");
    }

    #[test]
    fn two_words_split_on_space() {
        assert_eq!(extract("John Smith", None, true), "JS");
    }

    #[test]
    fn dotted_name_splits_on_dot() {
        assert_eq!(extract("john.smith", None, true), "JS");
    }

    #[test]
    fn space_wins_over_dot() {
        assert_eq!(extract("john.smith jr", None, true), "JJ");
    }

    #[test]
    fn explicit_separator() {
        assert_eq!(extract("john_smith", Some("_"), true), "JS");
        assert_eq!(extract("mary-jane watson", Some("-"), true), "MJ");
    }

    #[test]
    fn empty_separator_is_ignored() {
        assert_eq!(extract("Ada Lovelace", Some(""), true), "AL");
    }

    #[test]
    fn at_most_three_initials() {
        assert_eq!(extract("a.b.c.d", None, true), "ABC");
        assert_eq!(extract("Anna Beth Carla Dora", None, true), "ABC");
    }

    #[test]
    fn blank_segments_are_dropped() {
        assert_eq!(initials_for_separator("a..b.", "."), "ab");
        assert_eq!(extract("!! John   Smith", None, true), "JS");
        assert_eq!(extract("a. b", Some("."), true), "AB");
    }

    #[test]
    fn no_separator_takes_first_sanitized_character() {
        assert_eq!(extract("x", None, true), "X");
        assert_eq!(extract("x", None, false), "x");
        assert_eq!(extract("'quoted'", None, true), "Q");
    }

    #[test]
    fn empty_input() {
        assert_eq!(extract("", None, true), "");
        assert_eq!(extract("   ", None, true), "");
        assert_eq!(extract("?!", None, true), "");
        assert_eq!(extract("..", None, true), "");
    }

    #[test]
    fn upcase_flag_is_respected() {
        assert_eq!(extract("john smith", None, false), "js");
        assert_eq!(extract("émile zola", None, true), "ÉZ");
    }

    #[test]
    fn resolve_separator_order() {
        assert_eq!(resolve_separator("a b", Some("_")), "_");
        assert_eq!(resolve_separator("a b", None), " ");
        assert_eq!(resolve_separator("ab", None), ".");
    }
}
