use crate::{Failure, Future, Promise};
use void::Void;

/// What a value continuation hands back: a finished value, a nested future
/// to splice in at this stage boundary, or a raised failure.
///
/// [`resolve`](Resolution::resolve) is the single point where synchronous
/// and asynchronous completions converge: a nested future's chain is
/// evaluated straight into the parent promise, so the pipeline keeps its
/// flat appearance no matter which form the callback chose.
pub enum Resolution<T, E = Void> {
    Value(T),
    Nested(Future<T, E>),
    Failure(Failure<E>),
}

impl<T: 'static, E: 'static> Resolution<T, E> {
    pub fn value(value: T) -> Self {
        Resolution::Value(value)
    }

    pub fn resolve(self, promise: Promise<T, E>) {
        match self {
            Resolution::Value(value) => promise.resolve(value),
            Resolution::Nested(future) => future.chain().run(promise),
            Resolution::Failure(failure) => promise.reject(failure),
        }
    }
}

impl<T, E> From<Future<T, E>> for Resolution<T, E> {
    fn from(future: Future<T, E>) -> Self {
        Resolution::Nested(future)
    }
}

impl<T, E> From<Failure<E>> for Resolution<T, E> {
    fn from(failure: Failure<E>) -> Self {
        Resolution::Failure(failure)
    }
}

impl<T, E> From<Result<T, E>> for Resolution<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Resolution::Value(value),
            Err(error) => Resolution::Failure(Failure::new(error)),
        }
    }
}

impl<E> From<()> for Resolution<(), E> {
    fn from(_: ()) -> Self {
        Resolution::Value(())
    }
}
