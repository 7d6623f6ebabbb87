use super::{Future, Joined};
use crate::tuples::{Append, Concat, Prepend};
use crate::{Chain, Outcome, Promise};
use alloc::rc::Rc;
use core::cell::RefCell;
use core::ops::BitAnd;

/// Two-slot collector shared by the sinks of a join's sub-chains.
///
/// Fires its promise exactly once, when both sides have reported. Exactly
/// one failure surfaces that failure; two failures surface the
/// first-arriving one, and the later failure is silently dropped.
pub(super) struct TupleResult<L, R, O, E> {
    lhs: Option<Outcome<L, E>>,
    rhs: Option<Outcome<R, E>>,
    lhs_first: bool,
    merge: fn(L, R) -> O,
    promise: Option<Promise<O, E>>,
}

impl<L: 'static, R: 'static, O: 'static, E: 'static> TupleResult<L, R, O, E> {
    pub(super) fn new(merge: fn(L, R) -> O, promise: Promise<O, E>) -> Self {
        TupleResult {
            lhs: None,
            rhs: None,
            lhs_first: false,
            merge,
            promise: Some(promise),
        }
    }

    pub(super) fn assign_lhs(&mut self, outcome: Outcome<L, E>) {
        if self.rhs.is_none() {
            self.lhs_first = true;
        }
        self.lhs = Some(outcome);
        self.try_complete();
    }

    pub(super) fn assign_rhs(&mut self, outcome: Outcome<R, E>) {
        self.rhs = Some(outcome);
        self.try_complete();
    }

    fn try_complete(&mut self) {
        if self.lhs.is_none() || self.rhs.is_none() {
            return;
        }

        let promise = self.promise.take().expect("join collector already fired");
        let lhs = self.lhs.take().unwrap();
        let rhs = self.rhs.take().unwrap();

        match (lhs, rhs) {
            (Outcome::Success(lhs), Outcome::Success(rhs)) => {
                promise.resolve((self.merge)(lhs, rhs))
            }
            (Outcome::Failure(failure), Outcome::Success(_)) => promise.reject(failure),
            (Outcome::Success(_), Outcome::Failure(failure)) => promise.reject(failure),
            (Outcome::Failure(first), Outcome::Failure(second)) => {
                promise.reject(if self.lhs_first { first } else { second })
            }
        }
    }
}

/// Launches both chains at evaluation start, left before right, and merges
/// their results through a shared collector. Completion order is
/// unconstrained.
pub(super) fn launch<L, R, O, E>(
    lhs: Chain<L, E>,
    rhs: Chain<R, E>,
    merge: fn(L, R) -> O,
) -> Future<O, E>
where
    L: 'static,
    R: 'static,
    O: 'static,
    E: 'static,
{
    Future::new(move |promise| {
        let collector = Rc::new(RefCell::new(TupleResult::new(merge, promise)));
        let lhs_collector = collector.clone();
        let rhs_collector = collector;
        lhs.evaluate_into(move |outcome| lhs_collector.borrow_mut().assign_lhs(outcome));
        rhs.evaluate_into(move |outcome| rhs_collector.borrow_mut().assign_rhs(outcome));
    })
}

impl<L: 'static, R: 'static, E: 'static> BitAnd<Future<R, E>> for Future<L, E> {
    type Output = Joined<(L, R), E>;

    fn bitand(self, rhs: Future<R, E>) -> Self::Output {
        Joined::from_future(launch(self.chain(), rhs.chain(), |lhs, rhs| (lhs, rhs)))
    }
}

impl<L, R, E> BitAnd<Future<R, E>> for Joined<L, E>
where
    L: Append<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Append<R>>::Output: 'static,
{
    type Output = Joined<<L as Append<R>>::Output, E>;

    fn bitand(self, rhs: Future<R, E>) -> Self::Output {
        Joined::from_future(launch(self.chain(), rhs.chain(), |lhs: L, rhs| lhs.append(rhs)))
    }
}

impl<L, R, E> BitAnd<Joined<R, E>> for Future<L, E>
where
    L: 'static,
    R: Prepend<L> + 'static,
    E: 'static,
    <R as Prepend<L>>::Output: 'static,
{
    type Output = Joined<<R as Prepend<L>>::Output, E>;

    fn bitand(self, rhs: Joined<R, E>) -> Self::Output {
        Joined::from_future(launch(self.chain(), rhs.chain(), |lhs, rhs: R| rhs.prepend(lhs)))
    }
}

impl<L, R, E> BitAnd<Joined<R, E>> for Joined<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = Joined<<L as Concat<R>>::Output, E>;

    fn bitand(self, rhs: Joined<R, E>) -> Self::Output {
        Joined::from_future(launch(self.chain(), rhs.chain(), |lhs: L, rhs| lhs.concat(rhs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err, ok};
    use std::cell::Cell;
    use std::rc::Rc;

    fn pending<T: 'static, E: 'static>() -> (Future<T, E>, Rc<RefCell<Option<Promise<T, E>>>>) {
        let slot: Rc<RefCell<Option<Promise<T, E>>>> = Rc::new(RefCell::new(None));
        let stash = slot.clone();
        let future = Future::new(move |promise| *stash.borrow_mut() = Some(promise));
        (future, slot)
    }

    #[test]
    fn both_successes_merge_into_a_tuple() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        (ok::<i32, i32>(1) & ok::<&str, i32>("a"))
            .done(move |outcome| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some((1, "a")));
    }

    #[test]
    fn chained_joins_flatten() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        ((ok::<i32, i32>(1) & ok::<&str, i32>("x")) & ok::<u8, i32>(3))
            .done(move |outcome| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some((1, "x", 3u8)));
    }

    #[test]
    fn joins_of_joins_concatenate() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        ((ok::<i32, i32>(1) & ok::<i32, i32>(2)) & (ok::<i32, i32>(3) & ok::<i32, i32>(4)))
            .done(move |outcome| probe.set(Some(outcome.into_value())));
        assert_eq!(seen.get(), Some((1, 2, 3, 4)));
    }

    #[test]
    fn a_single_failure_wins_over_the_other_success() {
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();
        (ok::<i32, i32>(1) & err::<&str, i32>(5))
            .done(move |outcome| probe.set(Some(outcome.into_failure().into_error())));
        assert_eq!(seen.get(), Some(5));
    }

    #[test]
    fn two_failures_surface_the_first_arriving_one() {
        let (slow, slot) = pending::<i32, i32>();
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();

        (slow & err::<i32, i32>(2))
            .done(move |outcome| probe.set(Some(outcome.into_failure().into_error())));

        // The right side already reported; the left failure arrives second
        // and loses.
        assert_eq!(seen.get(), None);
        let promise = slot.borrow_mut().take().unwrap();
        promise.reject(crate::Failure::new(1));
        assert_eq!(seen.get(), Some(2));
    }

    #[test]
    fn both_sides_launch_before_either_completes() {
        let (lhs, lhs_slot) = pending::<i32, i32>();
        let (rhs, rhs_slot) = pending::<i32, i32>();
        let seen = Rc::new(Cell::new(None));
        let probe = seen.clone();

        (lhs & rhs).done(move |outcome| probe.set(Some(outcome.into_value())));

        let lhs_promise = lhs_slot.borrow_mut().take().expect("left side launched");
        let rhs_promise = rhs_slot.borrow_mut().take().expect("right side launched");
        rhs_promise.resolve(2);
        assert_eq!(seen.get(), None);
        lhs_promise.resolve(1);
        assert_eq!(seen.get(), Some((1, 2)));
    }
}
