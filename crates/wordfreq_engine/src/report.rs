use std::fmt::Write as _;

use serde::Serialize;
use wordfreq_core::RunSummary;

use crate::Comparison;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// Printable outcome of a [`Comparison`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub words: usize,
    pub distinct_words: usize,
    pub num_cpu: usize,
    pub words_per_map: usize,
    pub run: RunSummary,
    pub parallel_micros: u128,
    pub sequential_micros: u128,
    pub speedup: Option<f64>,
    pub tallies_agree: bool,
    pub top: Vec<WordCount>,
}

impl Report {
    pub fn from_comparison(comparison: &Comparison, top_n: usize) -> Self {
        let top = comparison
            .tally
            .top(top_n)
            .into_iter()
            .map(|(word, count)| WordCount {
                word: word.to_string(),
                count,
            })
            .collect();

        Self {
            words: comparison.tokens,
            distinct_words: comparison.tally.len(),
            num_cpu: comparison.parallelism,
            words_per_map: comparison.chunk_size,
            run: comparison.summary,
            parallel_micros: comparison.parallel_elapsed.as_micros(),
            sequential_micros: comparison.sequential_elapsed.as_micros(),
            speedup: comparison.speedup(),
            tallies_agree: comparison.tallies_agree,
            top,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "#Words: {}", self.words);
        let _ = writeln!(
            out,
            "mapred(numCPU={}, wordsPerMap={}) took {} micros",
            self.num_cpu, self.words_per_map, self.parallel_micros
        );
        let _ = writeln!(
            out,
            "serial(numCPU={}, wordsPerMap={}) took {} micros",
            self.num_cpu, self.words_per_map, self.sequential_micros
        );
        if let Some(speedup) = self.speedup {
            let _ = writeln!(out, "speedup: {speedup:.2}x");
        }
        if !self.tallies_agree {
            let _ = writeln!(out, "WARNING: parallel and serial counts differ");
        }
        if !self.top.is_empty() {
            let _ = writeln!(
                out,
                "top {} of {} distinct words:",
                self.top.len(),
                self.distinct_words
            );
            let width = self.top.iter().map(|entry| entry.word.len()).max().unwrap_or(0);
            for entry in &self.top {
                let _ = writeln!(out, "  {:<width$}  {}", entry.word, entry.count);
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
