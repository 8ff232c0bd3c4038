//! Parallel framing of independent streams.
//!
//! Chunks of different identities carry no ordering requirement relative to
//! each other, so whole streams can be framed concurrently using rayon. Each
//! stream gets its own single-stream framer; its chunks are still processed
//! strictly in arrival order.

use crate::core::{Line, LineNotification};
use crate::error::Result;
use crate::framing::builder::FramerBuilder;
use crate::splitter::{CrlfSplitter, Splitter};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Lines reconstructed from one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLines<I> {
    /// Identity of the stream.
    pub identity: I,
    /// Completed lines, in stream order.
    pub lines: Vec<Line>,
    /// Fragment left after the last delimiter.
    pub carry: String,
}

/// Frames many independent streams in parallel.
///
/// # Examples
///
/// ```
/// use lineframe::framing::ParallelFramer;
///
/// let framer = ParallelFramer::new();
/// let results = framer
///     .frame(vec![("a", vec!["x\r", "\ny"]), ("b", vec!["1\n2\n"])])
///     .unwrap();
///
/// assert_eq!(results[0].lines, ["x"]);
/// assert_eq!(results[0].carry, "y");
/// assert_eq!(results[1].lines, ["1", "2"]);
/// ```
#[derive(Clone)]
pub struct ParallelFramer {
    /// Delimiter rule shared by every stream.
    splitter: Arc<dyn Splitter>,
    /// Minimum number of streams before work is spread across threads.
    min_parallel_streams: usize,
}

impl Default for ParallelFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelFramer {
    /// Creates a parallel framer with the default `\r?\n` rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            splitter: Arc::new(CrlfSplitter),
            min_parallel_streams: 2,
        }
    }

    /// Sets the delimiter rule.
    #[must_use]
    pub fn splitter(mut self, splitter: Arc<dyn Splitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Sets the minimum stream count for parallel processing.
    ///
    /// Fewer streams are framed sequentially on the calling thread.
    #[must_use]
    pub fn min_parallel_streams(mut self, n: usize) -> Self {
        self.min_parallel_streams = n.max(1);
        self
    }

    /// Frames each `(identity, chunks)` stream, returning results in input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first framing error encountered.
    pub fn frame<I, C>(&self, streams: Vec<(I, Vec<C>)>) -> Result<Vec<StreamLines<I>>>
    where
        I: Send,
        C: AsRef<str> + Send,
    {
        if streams.len() < self.min_parallel_streams {
            return streams
                .into_iter()
                .map(|(identity, chunks)| self.frame_one(identity, &chunks))
                .collect();
        }

        tracing::debug!(
            streams = streams.len(),
            threads = rayon::current_num_threads(),
            "framing streams in parallel"
        );

        let results: Vec<Result<StreamLines<I>>> = streams
            .into_par_iter()
            .map(|(identity, chunks)| self.frame_one(identity, &chunks))
            .collect();

        // Collect results, propagating any errors
        results.into_iter().collect()
    }

    fn frame_one<I, C: AsRef<str>>(&self, identity: I, chunks: &[C]) -> Result<StreamLines<I>> {
        let mut framer = FramerBuilder::<()>::new()
            .shared_splitter(Arc::clone(&self.splitter))
            .build(Vec::new())?;
        for chunk in chunks {
            framer.feed(chunk.as_ref())?;
        }

        let carry = framer.carry().unwrap_or_default().to_string();
        let lines = framer
            .into_sink()
            .into_iter()
            .map(LineNotification::into_parts)
            .map(|(_, line)| line)
            .collect();

        Ok(StreamLines {
            identity,
            lines,
            carry,
        })
    }
}

impl std::fmt::Debug for ParallelFramer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelFramer")
            .field("splitter", &self.splitter.name())
            .field("min_parallel_streams", &self.min_parallel_streams)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::Framer;
    use crate::splitter::StrictCrlfSplitter;
    use crate::store::MemoryCarryStore;

    fn sample_streams() -> Vec<(String, Vec<String>)> {
        (0..8)
            .map(|i| {
                let text = (0..50).map(|n| format!("s{i}-l{n}\r\n")).collect::<String>();
                let chunks = text
                    .as_bytes()
                    .chunks(7 + i)
                    .map(|c| String::from_utf8(c.to_vec()).unwrap())
                    .collect();
                (format!("stream-{i}"), chunks)
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_multiplexed() {
        let streams = sample_streams();
        let parallel = ParallelFramer::new().frame(streams.clone()).unwrap();

        let mut framer = Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        let longest = streams.iter().map(|(_, c)| c.len()).max().unwrap();
        for round in 0..longest {
            for (id, chunks) in &streams {
                if let Some(chunk) = chunks.get(round) {
                    framer.feed_keyed(id.clone(), chunk).unwrap();
                }
            }
        }

        for result in &parallel {
            let expected: Vec<Line> = framer
                .sink()
                .iter()
                .filter(|n| n.identity() == Some(&result.identity))
                .map(|n| n.line().clone())
                .collect();
            assert_eq!(result.lines, expected);
            assert_eq!(result.lines.len(), 50);
            assert!(result.carry.is_empty());
        }
    }

    #[test]
    fn test_results_keep_input_order() {
        let results = ParallelFramer::new()
            .frame(vec![(3, vec!["c\n"]), (1, vec!["a\n"]), (2, vec!["b"])])
            .unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.identity).collect();
        assert_eq!(ids, [3, 1, 2]);
        assert_eq!(results[2].carry, "b");
    }

    #[test]
    fn test_sequential_below_threshold() {
        let framer = ParallelFramer::new().min_parallel_streams(10);
        let results = framer.frame(vec![("only", vec!["x\ny"])]).unwrap();
        assert_eq!(results[0].lines, ["x"]);
        assert_eq!(results[0].carry, "y");
    }

    #[test]
    fn test_custom_splitter() {
        let framer = ParallelFramer::new().splitter(Arc::new(StrictCrlfSplitter));
        let results = framer
            .frame(vec![("a", vec!["1\n2\r\n"]), ("b", vec!["3\r", "\n"])])
            .unwrap();
        assert_eq!(results[0].lines, ["1\n2"]);
        assert_eq!(results[1].lines, ["3"]);
        assert!(format!("{framer:?}").contains("crlf-strict"));
    }
}
