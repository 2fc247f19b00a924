/// Map a raw identity string to its canonical key.
///
/// Rules, in order:
/// - Absent input is the empty string
/// - Trim surrounding whitespace
/// - Drop every `@`
/// - Lowercase (Unicode-aware)
/// - Drop whitespace, `.`, `_` and `-`
/// - Drop anything that is not an ASCII letter or digit
///
/// An empty result means "discard this record". The output only ever contains
/// `[a-z0-9]`, which makes the function idempotent.
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());

    for ch in trimmed.chars().filter(|&c| c != '@') {
        // Some characters lowercase to several chars (e.g. 'İ' -> "i\u{307}").
        for lc in ch.to_lowercase() {
            if is_separator(lc) {
                continue;
            }
            if lc.is_ascii_alphanumeric() {
                out.push(lc);
            }
        }
    }

    out
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '_' | '-')
}
