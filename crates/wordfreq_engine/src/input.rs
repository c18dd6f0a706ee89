use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use engine_logging::engine_info;

use crate::{EngineError, TokenBuffer, Tokenizer};

/// Reads `path` line by line and tokenizes it into one buffer.
pub fn load_tokens(path: &Path, tokenizer: &dyn Tokenizer) -> Result<TokenBuffer, EngineError> {
    let input_error = |source| EngineError::Input {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(input_error)?;
    let buffer = read_tokens(BufReader::new(file), tokenizer).map_err(input_error)?;
    engine_info!("loaded {} tokens from {:?}", buffer.len(), path);
    Ok(buffer)
}

/// Tokenizes every line of `reader`. Invalid UTF-8 is replaced, not rejected.
pub fn read_tokens<R: BufRead>(mut reader: R, tokenizer: &dyn Tokenizer) -> io::Result<TokenBuffer> {
    let mut tokens = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        tokenizer.tokenize_into(&String::from_utf8_lossy(&line), &mut tokens);
    }
    Ok(TokenBuffer::new(tokens))
}

pub fn tokens_from_text(text: &str, tokenizer: &dyn Tokenizer) -> TokenBuffer {
    let mut tokens = Vec::new();
    for line in text.lines() {
        tokenizer.tokenize_into(line, &mut tokens);
    }
    TokenBuffer::new(tokens)
}
