//! The published route table shared between dispatchers and the reload worker.
//!
//! # Design Decisions
//! - `RwLock<Arc<RouteTable>>`: readers hold the lock for one lookup, the
//!   writer holds it for one pointer replacement
//! - Tables are built before the write lock is taken and the superseded
//!   table is dropped after it is released
//! - A poisoned lock is recovered; the guarded value is only ever a whole Arc

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::routing::table::{Route, RouteTable};

/// Handle to the currently published route table.
#[derive(Debug, Clone)]
pub struct SharedRoutes {
    inner: Arc<RwLock<Arc<RouteTable>>>,
}

impl SharedRoutes {
    pub fn new(table: RouteTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Look up a path in the current table.
    pub fn resolve(&self, path: &str) -> Option<Arc<Route>> {
        self.read().lookup(path).cloned()
    }

    /// The current table as a whole.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        Arc::clone(&self.read())
    }

    /// Replace the current table, returning the one it superseded.
    pub(crate) fn publish(&self, table: RouteTable) -> Arc<RouteTable> {
        let table = Arc::new(table);
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, table)
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<RouteTable>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedRoutes {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}
