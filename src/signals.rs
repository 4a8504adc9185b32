//! Listener registry.
//!
//! Registering a listener hands back a [`ListenerToken`]; passing that token
//! to [`Listeners::disconnect`] is the only cleanup a caller ever performs.

use std::fmt;

/// Opaque handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// Listeners invoked in registration order.
pub struct Listeners<T> {
    next_token: u64,
    entries: Vec<(ListenerToken, Callback<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_token: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<T> Listeners<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, callback: impl FnMut(&T) + 'static) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.entries.push((token, Box::new(callback)));
        token
    }

    /// Remove a listener. Returns `false` when the token was already gone.
    pub fn disconnect(&mut self, token: ListenerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(t, _)| *t != token);
        self.entries.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
