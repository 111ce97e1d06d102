//! Status - 登録状況とディスパッチ回数のビュー
//!
//! どちらも `Serialize` なので、ホストはそのまま JSON で出せる。

use std::cell::Cell;

use serde::Serialize;

use crate::domain::DelegateInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
    /// In registration order.
    pub delegates: Vec<DelegateInfo>,
    pub sealed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchCounts {
    pub creates: u64,
    pub full_binds: u64,
    pub partial_binds: u64,
    pub recycles: u64,
    pub attaches: u64,
    pub detaches: u64,
}

/// Interior-mutable counters behind [`DispatchCounts`].
#[derive(Debug, Default)]
pub(crate) struct DispatchCounters {
    pub(crate) creates: Cell<u64>,
    pub(crate) full_binds: Cell<u64>,
    pub(crate) partial_binds: Cell<u64>,
    pub(crate) recycles: Cell<u64>,
    pub(crate) attaches: Cell<u64>,
    pub(crate) detaches: Cell<u64>,
}

impl DispatchCounters {
    pub(crate) fn bump(counter: &Cell<u64>) {
        counter.set(counter.get().saturating_add(1));
    }

    pub(crate) fn snapshot(&self) -> DispatchCounts {
        DispatchCounts {
            creates: self.creates.get(),
            full_binds: self.full_binds.get(),
            partial_binds: self.partial_binds.get(),
            recycles: self.recycles.get(),
            attaches: self.attaches.get(),
            detaches: self.detaches.get(),
        }
    }
}
