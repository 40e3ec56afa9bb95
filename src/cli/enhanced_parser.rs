//! Splitting of repeatable list flags that also accept comma-separated values

/// Flatten repeated and comma-separated values
///
/// Items are trimmed and empty items are dropped.
///
/// # Examples
///
/// ```
/// use gitfame::cli::enhanced_parser::parse_comma_separated;
///
/// // --exclude "vendor/*,docs/*" --exclude build/*
/// let input = vec!["vendor/*,docs/*".to_string(), "build/*".to_string()];
/// assert_eq!(parse_comma_separated(input), vec!["vendor/*", "docs/*", "build/*"]);
/// ```
pub fn parse_comma_separated(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .flat_map(|item| {
            item.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<String>>()
        })
        .collect()
}

pub struct EnhancedParser;

impl EnhancedParser {
    /// Parse --exclude / --restrict-to glob patterns
    pub fn parse_globs(patterns: Vec<String>) -> Vec<String> {
        parse_comma_separated(patterns)
    }

    /// Parse --extensions; a leading dot is optional
    pub fn parse_extensions(extensions: Vec<String>) -> Vec<String> {
        parse_comma_separated(extensions)
    }

    /// Parse --languages names, kept as typed
    pub fn parse_languages(languages: Vec<String>) -> Vec<String> {
        parse_comma_separated(languages)
    }
}
