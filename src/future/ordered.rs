use super::unordered::TupleResult;
use super::{Future, Joined};
use crate::tuples::{Append, Concat, Prepend};
use crate::Chain;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::ops::Shr;

/// Like the concurrent join, but strictly sequenced: the right-hand chain is
/// launched from inside the left-hand sink, so it starts only once the left
/// side has reported. That holds after a left-hand failure too: the right
/// side still runs, and the left failure, having arrived first, is what the
/// collector surfaces.
pub(super) fn launch_sequenced<L, R, O, E>(
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
        lhs.evaluate_into(move |outcome| {
            lhs_collector.borrow_mut().assign_lhs(outcome);
            rhs.evaluate_into(move |outcome| rhs_collector.borrow_mut().assign_rhs(outcome));
        });
    })
}

impl<L: 'static, R: 'static, E: 'static> Shr<Future<R, E>> for Future<L, E> {
    type Output = Joined<(L, R), E>;

    fn shr(self, rhs: Future<R, E>) -> Self::Output {
        Joined::from_future(launch_sequenced(self.chain(), rhs.chain(), |lhs, rhs| {
            (lhs, rhs)
        }))
    }
}

impl<L, R, E> Shr<Future<R, E>> for Joined<L, E>
where
    L: Append<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Append<R>>::Output: 'static,
{
    type Output = Joined<<L as Append<R>>::Output, E>;

    fn shr(self, rhs: Future<R, E>) -> Self::Output {
        Joined::from_future(launch_sequenced(self.chain(), rhs.chain(), |lhs: L, rhs| {
            lhs.append(rhs)
        }))
    }
}

impl<L, R, E> Shr<Joined<R, E>> for Future<L, E>
where
    L: 'static,
    R: Prepend<L> + 'static,
    E: 'static,
    <R as Prepend<L>>::Output: 'static,
{
    type Output = Joined<<R as Prepend<L>>::Output, E>;

    fn shr(self, rhs: Joined<R, E>) -> Self::Output {
        Joined::from_future(launch_sequenced(self.chain(), rhs.chain(), |lhs, rhs: R| {
            rhs.prepend(lhs)
        }))
    }
}

impl<L, R, E> Shr<Joined<R, E>> for Joined<L, E>
where
    L: Concat<R> + 'static,
    R: 'static,
    E: 'static,
    <L as Concat<R>>::Output: 'static,
{
    type Output = Joined<<L as Concat<R>>::Output, E>;

    fn shr(self, rhs: Joined<R, E>) -> Self::Output {
        Joined::from_future(launch_sequenced(self.chain(), rhs.chain(), |lhs: L, rhs| {
            lhs.concat(rhs)
        }))
    }
}
