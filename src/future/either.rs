use super::{Future, Joined};
use crate::{Chain, Outcome, Promise};
use alloc::rc::Rc;
use core::cell::RefCell;
use core::ops::BitOr;

/// One-shot first-wins slot shared by the sinks of a race's sub-chains.
/// The later outcome, success or failure, is dropped.
pub(super) struct AnyResult<T, E> {
    promise: Option<Promise<T, E>>,
}

impl<T: 'static, E: 'static> AnyResult<T, E> {
    pub(super) fn new(promise: Promise<T, E>) -> Self {
        AnyResult {
            promise: Some(promise),
        }
    }

    pub(super) fn assign(&mut self, outcome: Outcome<T, E>) {
        if let Some(promise) = self.promise.take() {
            promise.complete(outcome);
        }
    }
}

/// Launches both chains at evaluation start, left before right; the first
/// outcome to arrive settles the race.
pub(super) fn launch_race<T: 'static, E: 'static>(
    lhs: Chain<T, E>,
    rhs: Chain<T, E>,
) -> Future<T, E> {
    Future::new(move |promise| {
        let winner = Rc::new(RefCell::new(AnyResult::new(promise)));
        let lhs_winner = winner.clone();
        lhs.evaluate_into(move |outcome| lhs_winner.borrow_mut().assign(outcome));
        rhs.evaluate_into(move |outcome| winner.borrow_mut().assign(outcome));
    })
}

impl<T: 'static, E: 'static> BitOr for Future<T, E> {
    type Output = Future<T, E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        launch_race(self.chain(), rhs.chain())
    }
}

impl<T: 'static, E: 'static> BitOr for Joined<T, E> {
    type Output = Joined<T, E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Joined::from_future(launch_race(self.chain(), rhs.chain()))
    }
}
