use crate::{Outcome, Promise};
use alloc::boxed::Box;
use void::Void;

/// An owned, single-shot pipeline of stages producing one [`Outcome`].
///
/// A chain is inert until [`evaluate_into`](Chain::evaluate_into) attaches
/// the terminal sink; composing stages with [`transform`](Chain::transform)
/// only wraps the starter. Dropping a chain that was never evaluated runs no
/// stage, which is the crate's cancellation primitive.
pub struct Chain<T, E = Void> {
    starter: Box<dyn FnOnce(Promise<T, E>)>,
}

impl<T: 'static, E: 'static> Chain<T, E> {
    /// Wraps a starter that is run when evaluation begins. The starter must
    /// eventually complete the promise it is handed; saving the promise and
    /// returning makes the chain asynchronous.
    pub fn new(starter: impl FnOnce(Promise<T, E>) + 'static) -> Self {
        Chain {
            starter: Box::new(starter),
        }
    }

    /// Appends a stage, consuming the chain. The stage receives the upstream
    /// outcome and the promise for the downstream neighbour.
    pub fn transform<U: 'static>(
        self,
        stage: impl FnOnce(Outcome<T, E>, Promise<U, E>) + 'static,
    ) -> Chain<U, E> {
        Chain::new(move |promise| self.run(Promise::new(move |outcome| stage(outcome, promise))))
    }

    /// Attaches the terminal sink and drives the chain.
    pub fn evaluate_into(self, sink: impl FnOnce(Outcome<T, E>) + 'static) {
        self.run(Promise::new(sink));
    }

    pub(crate) fn run(self, promise: Promise<T, E>) {
        (self.starter)(promise);
    }

    /// Consumes the chain without evaluating it; no stage runs.
    pub fn cancel(self) {}
}
