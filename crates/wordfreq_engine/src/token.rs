pub trait Tokenizer: Send + Sync {
    /// Appends the normalized words of `line` to `out`.
    fn tokenize_into(&self, line: &str, out: &mut Vec<String>);

    fn tokenize(&self, line: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.tokenize_into(line, &mut out);
        out
    }
}

/// Keeps ASCII letters and digits, treats everything else as a separator and
/// lower-cases each word.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericTokenizer;

impl Tokenizer for AlphanumericTokenizer {
    fn tokenize_into(&self, line: &str, out: &mut Vec<String>) {
        out.extend(
            line.split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|word| !word.is_empty())
                .map(str::to_ascii_lowercase),
        );
    }
}
