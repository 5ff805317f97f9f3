//! Change notification
//!
//! Synchronous observer registry behind the workbench's single "layout
//! changed" event. Listeners carry no payload; consumers re-query the tree
//! on receipt.

use std::fmt;

/// Handle returned by [`crate::Workbench::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Listener registry for layout-change notifications.
pub(crate) struct ChangeNotifier {
    listeners: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a listener, returning a handle for later removal.
    pub(crate) fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the handle is unknown.
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Invoke every listener, in subscription order.
    pub(crate) fn emit(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
