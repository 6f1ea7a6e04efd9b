use std::collections::BTreeMap;

type Handler<S, A> = Box<dyn Fn(&S, &A) -> S>;

/// Minimal state container with per-kind handlers.
///
/// Dispatching an action of a kind with no registered handler leaves the
/// state untouched, so an empty store is a pure pass-through. The game core
/// never reads from it; hosts use it for session-level bookkeeping.
pub struct Store<S, A> {
    state: S,
    handlers: BTreeMap<String, Handler<S, A>>,
    dispatched: u64,
}

impl<S, A> Store<S, A> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            handlers: BTreeMap::new(),
            dispatched: 0,
        }
    }

    /// Register the handler for `kind`, replacing any previous one.
    pub fn on(&mut self, kind: impl Into<String>, handler: impl Fn(&S, &A) -> S + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    /// Apply `action` under `kind`. Returns whether a handler ran.
    pub fn dispatch(&mut self, kind: &str, action: &A) -> bool {
        self.dispatched += 1;
        match self.handlers.get(kind) {
            Some(handler) => {
                self.state = handler(&self.state, action);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Total actions dispatched, handled or not.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<S: Default, A> Default for Store<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
