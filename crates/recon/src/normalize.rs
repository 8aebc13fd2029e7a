/// Canonicalize free text for comparison.
///
/// Lower-cases, turns every character that is neither alphanumeric nor
/// whitespace into a word break, collapses whitespace runs to one space and
/// trims. `"AI-Image Upscaler!!"` becomes `"ai image upscaler"`.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split already-normalized text into its words.
pub(crate) fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses() {
        assert_eq!(normalize("  Foo   Tracker\t\n"), "foo tracker");
    }

    #[test]
    fn punctuation_breaks_words() {
        assert_eq!(normalize("ai-image-upscaler!!"), "ai image upscaler");
        assert_eq!(normalize("Hello, world."), "hello world");
    }

    #[test]
    fn empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! --- ???"), "");
    }

    #[test]
    fn keeps_digits_and_unicode_letters() {
        assert_eq!(normalize("Web3 Café"), "web3 café");
    }

    #[test]
    fn idempotent() {
        for s in ["Foo Tracker", "a--b  c!!", "  x  ", "MVP: SaaS for $5/mo"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
