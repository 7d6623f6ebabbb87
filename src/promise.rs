use crate::{Failure, Outcome};
use alloc::boxed::Box;
use void::Void;

/// A one-shot continuation sink.
///
/// Each stage of a chain owns the promise for its downstream neighbour and
/// completes it exactly once, either inline or later from wherever the stage
/// stashed it. Completion consumes the promise; dropping one that was never
/// completed is a contract violation and panics.
pub struct Promise<T, E = Void> {
    sink: Option<Box<dyn FnOnce(Outcome<T, E>)>>,
}

impl<T: 'static, E: 'static> Promise<T, E> {
    pub(crate) fn new(sink: impl FnOnce(Outcome<T, E>) + 'static) -> Self {
        Promise {
            sink: Some(Box::new(sink)),
        }
    }

    /// Completes the stage successfully with `value`.
    pub fn resolve(self, value: T) {
        self.complete(Outcome::Success(value));
    }

    /// Completes the stage with a raised failure.
    pub fn reject(self, failure: Failure<E>) {
        self.complete(Outcome::Failure(failure));
    }

    pub fn complete(mut self, outcome: Outcome<T, E>) {
        let sink = self.sink.take().expect("promise already completed");
        sink(outcome);
    }
}

impl<T, E> Drop for Promise<T, E> {
    fn drop(&mut self) {
        #[cfg(feature = "std")]
        let unwinding = std::thread::panicking();
        #[cfg(not(feature = "std"))]
        let unwinding = false;

        if self.sink.is_some() && !unwinding {
            panic!("promise dropped without being completed");
        }
    }
}
