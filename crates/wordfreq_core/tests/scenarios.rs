use pretty_assertions::assert_eq;
use wordfreq_core::{count_range, split_chunks, ChunkSize, Tally};

fn tally(pairs: &[(&str, u64)]) -> Tally {
    pairs.iter().map(|(word, count)| (*word, *count)).collect()
}

#[test]
fn six_tokens_in_chunks_of_two() {
    let tokens = ["a", "b", "a", "c", "b", "a"];
    let chunks = split_chunks(tokens.len(), ChunkSize::new(2).unwrap());
    let ranges: Vec<_> = chunks.iter().map(|c| c.range()).collect();
    assert_eq!(ranges, vec![0..2, 2..4, 4..6]);

    let partials: Vec<Tally> = chunks.iter().map(|c| count_range(&tokens, *c)).collect();
    assert_eq!(partials[0], tally(&[("a", 1), ("b", 1)]));
    assert_eq!(partials[1], tally(&[("a", 1), ("c", 1)]));
    assert_eq!(partials[2], tally(&[("b", 1), ("a", 1)]));

    let mut merged = Tally::new();
    for partial in partials {
        merged.merge(partial);
    }
    assert_eq!(merged, tally(&[("a", 3), ("b", 2), ("c", 1)]));
}

#[test]
fn chunk_larger_than_buffer_yields_single_chunk() {
    let tokens = ["to", "be", "or", "not", "to"];
    let chunks = split_chunks(tokens.len(), ChunkSize::new(10).unwrap());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].range(), 0..5);

    let counted = count_range(&tokens, chunks[0]);
    assert_eq!(
        counted,
        tally(&[("to", 2), ("be", 1), ("or", 1), ("not", 1)])
    );
}

#[test]
fn empty_buffer_has_nothing_to_count() {
    let chunks = split_chunks(0, ChunkSize::new(3).unwrap());
    assert!(chunks.is_empty());
}
