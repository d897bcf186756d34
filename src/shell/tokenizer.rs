/// Characters that separate words on an input line.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Splits a raw line into words. There is no quoting: every delimiter splits.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|word| !word.is_empty())
        .map(String::from)
        .collect()
}
