use super::Future;
use crate::{Failure, Outcome};

/// A future that settles immediately with a prepared outcome.
pub fn ready<T: 'static, E: 'static>(outcome: Outcome<T, E>) -> Future<T, E> {
    Future::new(move |promise| promise.complete(outcome))
}

/// A future that settles immediately with `value`.
pub fn ok<T: 'static, E: 'static>(value: T) -> Future<T, E> {
    Future::new(move |promise| promise.resolve(value))
}

/// A future that settles immediately with a failure carrying `error`.
pub fn err<T: 'static, E: 'static>(error: E) -> Future<T, E> {
    Future::new(move |promise| promise.reject(Failure::new(error)))
}
