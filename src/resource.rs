// ResourceArc wrapper for the streaming table
//
// Lets a Table persist across NIF calls. The BEAM may call in from any
// scheduler thread, so the table sits behind a Mutex.

use crate::table::{Table, TableConfig};
use rustler::{Error, NifResult, Resource, ResourceArc};
use std::sync::{Mutex, MutexGuard};

pub struct TableResource {
    inner: Mutex<Table>,
}

#[rustler::resource_impl]
impl Resource for TableResource {}

impl TableResource {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        TableResource {
            inner: Mutex::new(Table::with_config(config)),
        }
    }

    /// Lock the table. A poisoned lock surfaces as an Elixir exception.
    pub fn lock(&self) -> NifResult<MutexGuard<'_, Table>> {
        self.inner
            .lock()
            .map_err(|_| Error::RaiseAtom("table_poisoned"))
    }
}

impl Default for TableResource {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the ResourceArc
pub type TableRef = ResourceArc<TableResource>;
