use crate::{Failure, Promise, Resolution};
use void::Void;

/// The value that flows along a chain: one stage's settled result.
///
/// Exactly one `Outcome` is produced per evaluation of a chain. A failure
/// outcome bypasses every value-continuation stage downstream of it.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T, E = Void> {
    Success(T),
    Failure(Failure<E>),
}

impl<T, E> Outcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Consumes the success payload. The outcome must be successful.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => panic!("took the value of a failure outcome"),
        }
    }

    /// Consumes the failure. The outcome must be a failure.
    pub fn into_failure(self) -> Failure<E> {
        match self {
            Outcome::Success(_) => panic!("took the failure of a successful outcome"),
            Outcome::Failure(failure) => failure,
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure.into_error()),
        }
    }

    /// Hands the success payload to `callback` and delivers whatever it
    /// returns into `promise`. The outcome must be successful; failures are
    /// routed around value continuations before this point is reached.
    pub fn resolve_with<U, R, F>(self, callback: F, promise: Promise<U, E>)
    where
        U: 'static,
        E: 'static,
        F: FnOnce(T) -> R,
        R: Into<Resolution<U, E>>,
    {
        match self {
            Outcome::Success(value) => callback(value).into().resolve(promise),
            Outcome::Failure(_) => panic!("resolved a failure outcome through a value callback"),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(Failure::new(error)),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, Failure<E>> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}
