//! Line notification sinks.
//!
//! A framer has no return value of its own: every completed line is
//! announced to a [`LineSink`] exactly once, in arrival order. What the sink
//! does with it (collect, forward to a channel, dispatch to protocol logic)
//! is outside the framer's concern, and a sink failing to deliver never
//! rolls back framing state.

use crate::core::LineNotification;
use std::sync::mpsc;

/// Receiver of line notifications.
pub trait LineSink<I> {
    /// Announces one completed line.
    fn emit(&mut self, notification: LineNotification<I>);
}

impl<I> LineSink<I> for Vec<LineNotification<I>> {
    fn emit(&mut self, notification: LineNotification<I>) {
        self.push(notification);
    }
}

impl<I> LineSink<I> for mpsc::Sender<LineNotification<I>> {
    fn emit(&mut self, notification: LineNotification<I>) {
        if self.send(notification).is_err() {
            tracing::warn!("line receiver disconnected, dropping notification");
        }
    }
}

impl<I, S: LineSink<I> + ?Sized> LineSink<I> for &mut S {
    fn emit(&mut self, notification: LineNotification<I>) {
        (**self).emit(notification);
    }
}

/// Sink calling a closure for every notification.
///
/// # Examples
///
/// ```
/// use lineframe::framing::{FnSink, Framer};
///
/// let mut seen = Vec::new();
/// let mut framer = Framer::<(), _>::single_stream(FnSink(|n: lineframe::core::LineNotification<()>| {
///     seen.push(n.line().to_string());
/// }));
/// framer.feed("a\nb\n").unwrap();
/// drop(framer);
/// assert_eq!(seen, ["a", "b"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<I, F> LineSink<I> for FnSink<F>
where
    F: FnMut(LineNotification<I>),
{
    fn emit(&mut self, notification: LineNotification<I>) {
        (self.0)(notification);
    }
}
