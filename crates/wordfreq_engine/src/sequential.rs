use wordfreq_core::Tally;

use crate::TokenBuffer;

/// Single-threaded full scan; the baseline the pipeline is measured against.
pub fn count_sequential(buffer: &TokenBuffer) -> Tally {
    let mut tally = Tally::new();
    for word in buffer.iter() {
        tally.record(word);
    }
    tally
}
