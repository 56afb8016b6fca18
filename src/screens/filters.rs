//! Observable filter chip state

use tokio::sync::watch;

use crate::models::{FilterKind, FilterOption};

/// Holds the filter options of one screen and publishes every change.
///
/// Exactly one option is selected at any time; each change replaces the whole
/// set.
#[derive(Debug)]
pub struct FilterState<K: FilterKind> {
    tx: watch::Sender<Vec<FilterOption<K>>>,
}

impl<K: FilterKind> Default for FilterState<K> {
    fn default() -> Self {
        Self::new(K::all()[0])
    }
}

impl<K: FilterKind> FilterState<K> {
    pub fn new(active: K) -> Self {
        let (tx, _rx) = watch::channel(FilterOption::set_for(active));
        Self { tx }
    }

    /// Receiver that sees every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Vec<FilterOption<K>>> {
        self.tx.subscribe()
    }

    /// Copy of the current options
    pub fn snapshot(&self) -> Vec<FilterOption<K>> {
        self.tx.borrow().clone()
    }

    /// Currently selected kind
    pub fn active(&self) -> K {
        self.tx
            .borrow()
            .iter()
            .find(|o| o.selected)
            .map(|o| o.kind)
            .unwrap_or(K::all()[0])
    }

    /// Rewrite the set so only `kind` is selected and publish it
    pub fn select(&self, kind: K) {
        self.tx.send_replace(FilterOption::set_for(kind));
    }

    /// Kind `offset` chips away from the active one, wrapping around
    pub fn neighbour(&self, offset: isize) -> K {
        let all = K::all();
        let current = all.iter().position(|&k| k == self.active()).unwrap_or(0) as isize;
        let len = all.len() as isize;
        all[(current + offset).rem_euclid(len) as usize]
    }
}
