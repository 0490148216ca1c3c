use std::cell::Cell;
use std::rc::Rc;

/// Liveness flag shared between a mounted view and the async work it
/// started. Once released, pending results must not touch view state.
#[derive(Clone, Debug)]
pub struct ViewLease {
    alive: Rc<Cell<bool>>,
}

impl ViewLease {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Mark the view as torn down. Idempotent.
    pub fn release(&self) {
        self.alive.set(false);
    }

    /// Run `f` only while the view is mounted.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        self.is_alive().then(f)
    }
}

impl Default for ViewLease {
    fn default() -> Self {
        Self::new()
    }
}
