use crate::{Chain, Executor, Outcome, Promise, Resolution};
use alloc::boxed::Box;
use void::Void;

mod either;
mod ordered;
mod ready;
mod unordered;

pub use ready::{err, ok, ready};

/// A lazily evaluated, composable computation that eventually settles to a
/// value of type `T` or a failure carrying `E`.
///
/// A future wraps a [`Chain`] and exposes the combinator vocabulary on top
/// of it. Nothing runs until [`done`](Future::done) attaches the terminal
/// sink; every combinator consumes the future and yields a new one.
///
/// ```
/// use catena::{ok, Outcome, Resolution};
///
/// ok::<i32, i32>(6581)
///     .then(|value| Resolution::value(value + 1))
///     .done(|outcome: Outcome<i32, i32>| assert_eq!(outcome.into_value(), 6582));
/// ```
pub struct Future<T, E = Void> {
    chain: Chain<T, E>,
}

impl<T: 'static, E: 'static> Future<T, E> {
    /// Builds a future from a starter that is run when evaluation begins and
    /// must eventually complete the promise it receives.
    pub fn new(starter: impl FnOnce(Promise<T, E>) + 'static) -> Self {
        Future {
            chain: Chain::new(starter),
        }
    }

    /// Unwraps the underlying chain.
    pub fn chain(self) -> Chain<T, E> {
        self.chain
    }

    /// Continues the pipeline with `callback` on success.
    ///
    /// The callback receives the settled value moved in and returns anything
    /// convertible into a [`Resolution`]: a finished value, a nested future
    /// to splice in, a failure, a plain `Result`, or `()` for unit
    /// pipelines. On an inbound failure the callback is skipped and the
    /// failure is forwarded verbatim.
    pub fn then<U, R, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> R + 'static,
        R: Into<Resolution<U, E>>,
    {
        Future::from(
            self.chain
                .transform(move |outcome: Outcome<T, E>, promise| {
                    if outcome.is_success() {
                        outcome.resolve_with(callback, promise);
                    } else {
                        promise.reject(outcome.into_failure());
                    }
                }),
        )
    }

    /// Sequences a prepared future behind this one.
    ///
    /// `next` is dismantled now but evaluated only once this future settles
    /// successfully; its result replaces this future's value. If this future
    /// fails, `next` is cancelled without running any of its stages and the
    /// failure is forwarded.
    pub fn then_future<U: 'static>(self, next: Future<U, E>) -> Future<U, E> {
        let next = next.chain();
        Future::from(
            self.chain
                .transform(move |outcome: Outcome<T, E>, promise| {
                    if outcome.is_success() {
                        next.run(promise);
                    } else {
                        next.cancel();
                        promise.reject(outcome.into_failure());
                    }
                }),
        )
    }

    /// Handles a failure, either recovering with a new value (or nested
    /// future) or re-raising by returning a [`Failure`](crate::Failure).
    ///
    /// Success passes through untouched, which is what pins the recovered
    /// type to `T`.
    pub fn fail<R, F>(self, callback: F) -> Future<T, E>
    where
        F: FnOnce(E) -> R + 'static,
        R: Into<Resolution<T, E>>,
    {
        Future::from(
            self.chain
                .transform(move |outcome: Outcome<T, E>, promise| match outcome {
                    success @ Outcome::Success(_) => promise.complete(success),
                    Outcome::Failure(failure) => {
                        callback(failure.into_error()).into().resolve(promise)
                    }
                }),
        )
    }

    /// Transforms the settled outcome, success or failure alike. This is the
    /// only combinator whose callback observes both arms.
    pub fn map<U, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        Future::from(
            self.chain
                .transform(move |outcome, promise: Promise<U, E>| promise.complete(callback(outcome))),
        )
    }

    /// [`map`](Future::map) under the name that reads best at the end of a
    /// pipeline.
    pub fn finally<U, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        self.map(callback)
    }

    /// Attaches the terminal sink and evaluates the whole pipeline.
    pub fn done(self, sink: impl FnOnce(Outcome<T, E>) + 'static) {
        self.chain.evaluate_into(sink);
    }

    /// Defers everything downstream of this point to `executor`.
    ///
    /// When the upstream stage settles, the pending outcome and the
    /// downstream promise are captured into a [`Task`](crate::Task) and
    /// submitted; the executor decides when, and on which context, the
    /// pipeline resumes.
    pub fn enqueue(self, mut executor: impl Executor + 'static) -> Future<T, E> {
        Future::from(
            self.chain
                .transform(move |outcome, promise: Promise<T, E>| {
                    executor.execute(Box::new(move || promise.complete(outcome)));
                }),
        )
    }
}

impl<T, E> From<Chain<T, E>> for Future<T, E> {
    fn from(chain: Chain<T, E>) -> Self {
        Future { chain }
    }
}

/// A future produced by the join operators, whose value is a flat tuple of
/// the joined results.
///
/// Keeping joins as their own type is what lets a further `&` or `>>`
/// splice elements instead of nesting pairs: joining a `Joined` appends to
/// its tuple. The full combinator surface is available and delegates to the
/// wrapped [`Future`]; combinators that keep the value type keep the join
/// flavour too.
pub struct Joined<T, E = Void> {
    future: Future<T, E>,
}

impl<T: 'static, E: 'static> Joined<T, E> {
    pub(crate) fn from_future(future: Future<T, E>) -> Self {
        Joined { future }
    }

    pub fn into_future(self) -> Future<T, E> {
        self.future
    }

    pub fn chain(self) -> Chain<T, E> {
        self.future.chain()
    }

    pub fn then<U, R, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(T) -> R + 'static,
        R: Into<Resolution<U, E>>,
    {
        self.future.then(callback)
    }

    pub fn then_future<U: 'static>(self, next: Future<U, E>) -> Future<U, E> {
        self.future.then_future(next)
    }

    pub fn fail<R, F>(self, callback: F) -> Joined<T, E>
    where
        F: FnOnce(E) -> R + 'static,
        R: Into<Resolution<T, E>>,
    {
        Joined::from_future(self.future.fail(callback))
    }

    pub fn map<U, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        self.future.map(callback)
    }

    pub fn finally<U, F>(self, callback: F) -> Future<U, E>
    where
        U: 'static,
        F: FnOnce(Outcome<T, E>) -> Outcome<U, E> + 'static,
    {
        self.future.finally(callback)
    }

    pub fn done(self, sink: impl FnOnce(Outcome<T, E>) + 'static) {
        self.future.done(sink);
    }

    pub fn enqueue(self, executor: impl Executor + 'static) -> Joined<T, E> {
        Joined::from_future(self.future.enqueue(executor))
    }
}

impl<T, E> From<Joined<T, E>> for Future<T, E> {
    fn from(joined: Joined<T, E>) -> Self {
        joined.future
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err, ok, Failure, Task};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn then_runs_on_success() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        ok::<i32, i32>(2)
            .then(|value| Resolution::value(value * 10))
            .done(move |outcome: Outcome<i32, i32>| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some(20));
    }

    #[test]
    fn then_is_skipped_on_failure() {
        let called = Rc::new(Cell::new(false));
        let probe = called.clone();
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        err::<i32, i32>(5)
            .then(move |value| {
                probe.set(true);
                Resolution::value(value)
            })
            .done(move |outcome: Outcome<i32, i32>| {
                sink.set(Some(outcome.into_failure().into_error()))
            });
        assert!(!called.get());
        assert_eq!(seen.get(), Some(5));
    }

    #[test]
    fn then_future_runs_the_prepared_future_on_success() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        ok::<i32, i32>(1)
            .then_future(ok::<&str, i32>("next"))
            .done(move |outcome: Outcome<&str, i32>| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some("next"));
    }

    #[test]
    fn then_future_cancels_the_prepared_future_on_failure() {
        let started = Rc::new(Cell::new(false));
        let probe = started.clone();
        let staged = Future::<i32, i32>::new(move |promise| {
            probe.set(true);
            promise.resolve(7);
        });

        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        err::<i32, i32>(3).then_future(staged).done(move |outcome| {
            sink.set(Some(outcome.into_failure().into_error()))
        });

        assert!(!started.get());
        assert_eq!(seen.get(), Some(3));
    }

    #[test]
    fn fail_recovers_with_a_new_value() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        err::<i32, i32>(7)
            .fail(|error| Resolution::value(error + 1))
            .done(move |outcome: Outcome<i32, i32>| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some(8));
    }

    #[test]
    fn fail_reraises_a_bare_failure() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        err::<i32, i32>(7)
            .fail(|error| Failure::new(error * 2))
            .done(move |outcome: Outcome<i32, i32>| {
                probe.set(Some(outcome.into_failure().into_error()))
            });
        assert_eq!(seen.get(), Some(14));
    }

    #[test]
    fn fail_forwards_success_untouched() {
        let called = Rc::new(Cell::new(false));
        let probe = called.clone();
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        ok::<i32, i32>(4)
            .fail(move |error| {
                probe.set(true);
                Failure::new(error)
            })
            .done(move |outcome: Outcome<i32, i32>| sink.set(Some(outcome.into_value())));
        assert!(!called.get());
        assert_eq!(seen.get(), Some(4));
    }

    #[test]
    fn map_observes_both_arms() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        err::<i32, i32>(1)
            .map(|outcome: Outcome<i32, i32>| match outcome {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(_) => Outcome::Success(0),
            })
            .done(move |outcome: Outcome<i32, i32>| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some(0));
    }

    #[test]
    fn enqueue_defers_downstream_stages() {
        let queue: Rc<RefCell<Vec<Task>>> = Rc::new(RefCell::new(Vec::new()));
        let submit = queue.clone();
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();

        ok::<i32, i32>(9)
            .enqueue(move |task: Task| submit.borrow_mut().push(task))
            .then(|value| Resolution::value(value + 1))
            .done(move |outcome: Outcome<i32, i32>| probe.set(Some(outcome.into_value())));

        assert_eq!(seen.get(), None);
        let pending: Vec<Task> = queue.borrow_mut().drain(..).collect();
        for task in pending {
            task();
        }
        assert_eq!(seen.get(), Some(10));
    }

    #[test]
    fn composing_without_done_runs_nothing() {
        let started = Rc::new(Cell::new(false));
        let probe = started.clone();
        let called = Rc::new(Cell::new(false));
        let then_probe = called.clone();

        let future = Future::<i32, i32>::new(move |promise| {
            probe.set(true);
            promise.resolve(1);
        })
        .then(move |value| {
            then_probe.set(true);
            Resolution::value(value)
        });

        drop(future);
        assert!(!started.get());
        assert!(!called.get());
    }
}
