use proptest::prelude::*;
use wordfreq_core::{count_range, split_chunks, ChunkSize, ChunkSplitter, Tally};

fn sequential(tokens: &[String]) -> Tally {
    let mut tally = Tally::new();
    for token in tokens {
        tally.record(token);
    }
    tally
}

proptest! {
    #[test]
    fn chunks_cover_buffer_exactly_once(total in 0usize..5_000, size in 1usize..700) {
        let size = ChunkSize::new(size).unwrap();
        let chunks = split_chunks(total, size);

        let mut next = 0;
        for chunk in &chunks {
            prop_assert_eq!(chunk.start(), next);
            prop_assert!(chunk.len() > 0);
            prop_assert!(chunk.len() <= size.get());
            prop_assert!(chunk.end() <= total);
            next = chunk.end();
        }
        prop_assert_eq!(next, total);
        prop_assert_eq!(chunks.len(), ChunkSplitter::chunk_count(total, size));
    }

    #[test]
    fn splitting_is_idempotent(total in 0usize..5_000, size in 1usize..700) {
        let size = ChunkSize::new(size).unwrap();
        prop_assert_eq!(split_chunks(total, size), split_chunks(total, size));
    }

    #[test]
    fn merged_chunk_tallies_equal_single_pass(
        tokens in prop::collection::vec("[a-e]{1,2}", 0..400),
        size in 1usize..50,
    ) {
        let size = ChunkSize::new(size).unwrap();
        let mut merged = Tally::new();
        for chunk in split_chunks(tokens.len(), size) {
            merged.merge(count_range(&tokens, chunk));
        }
        prop_assert_eq!(merged, sequential(&tokens));
    }

    #[test]
    fn merge_order_does_not_matter(
        tokens in prop::collection::vec("[a-d]", 1..300),
        size in 1usize..40,
        seed in any::<u64>(),
    ) {
        let size = ChunkSize::new(size).unwrap();
        let partials: Vec<Tally> = split_chunks(tokens.len(), size)
            .into_iter()
            .map(|chunk| count_range(&tokens, chunk))
            .collect();

        let mut forward = Tally::new();
        for partial in partials.iter().cloned() {
            forward.merge(partial);
        }

        // Deterministic shuffle driven by the generated seed.
        let mut shuffled = partials;
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }
        let mut permuted = Tally::new();
        for partial in shuffled {
            permuted.merge(partial);
        }

        prop_assert_eq!(forward, permuted);
    }
}
