//! Closure-backed splitters.

use crate::splitter::traits::{Split, Splitter};
use std::fmt;

/// Adapts a function with the splitter signature into a [`Splitter`].
///
/// The function receives `(chunk, carry)` and must honour the same contract
/// as any other splitter: partition `carry + chunk` in order and return the
/// trailing fragment as the new carry.
///
/// # Examples
///
/// ```
/// use lineframe::splitter::{FnSplitter, Split, Splitter};
///
/// let semicolons = FnSplitter::new("semicolon", |chunk: &str, carry: &str| {
///     let joined = format!("{carry}{chunk}");
///     let mut parts: Vec<String> = joined.split(';').map(str::to_string).collect();
///     let carry = parts.pop().unwrap_or_default();
///     Split::new(parts, carry)
/// });
///
/// let split = semicolons.split("b;c", "a;");
/// assert_eq!(split.lines, vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(split.carry, "c");
/// ```
pub struct FnSplitter<F> {
    name: &'static str,
    func: F,
}

impl<F> FnSplitter<F>
where
    F: Fn(&str, &str) -> Split + Send + Sync,
{
    /// Wraps `func` under the given name.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> fmt::Debug for FnSplitter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSplitter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Splitter for FnSplitter<F>
where
    F: Fn(&str, &str) -> Split + Send + Sync,
{
    fn split(&self, chunk: &str, carry: &str) -> Split {
        (self.func)(chunk, carry)
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "caller-supplied split function"
    }
}
