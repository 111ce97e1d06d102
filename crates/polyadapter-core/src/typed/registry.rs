//! DelegateRegistry - delegate の登録と参照
//!
//! # 学習ポイント
//! - 正本（`delegates: Vec`）＋ 派生インデックス 2 本（layout id / item 型）
//! - 挿入は 1 つの関数の中で検査してから両方に書く（部分書き込みなし）
//! - Arc による共有所有権
//!
//! # 使用例
//! ```ignore
//! let mut registry = DelegateRegistry::new();
//! registry.register(HeaderDelegate::new())?;
//!
//! let delegate = registry.lookup_by_type(ItemType::of::<Header>())?;
//! ```

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::app::status::RegistryStatus;
use crate::domain::{
    CollisionError, DelegateInfo, ItemType, LayoutId, NotFoundError, RegisterError,
};

use super::delegate::BindingDelegate;
use super::erased::{DynDelegate, TypedDelegate};

/// Delegates keyed by layout id and by item type.
///
/// Built during setup (mutable), then used for lookups (immutable). When
/// `seal_on_first_lookup` is set, the first lookup freezes the registry.
pub struct DelegateRegistry<V> {
    delegates: Vec<Arc<dyn DynDelegate<V>>>,
    by_layout: HashMap<LayoutId, usize>,
    by_type: HashMap<ItemType, usize>,
    seal_on_first_lookup: bool,
    sealed: Cell<bool>,
}

impl<V: 'static> DelegateRegistry<V> {
    pub fn new() -> Self {
        Self {
            delegates: Vec::new(),
            by_layout: HashMap::new(),
            by_type: HashMap::new(),
            seal_on_first_lookup: false,
            sealed: Cell::new(false),
        }
    }

    /// Reject registrations once any lookup has happened.
    pub fn sealing_on_first_lookup(mut self) -> Self {
        self.seal_on_first_lookup = true;
        self
    }

    pub fn register<D: BindingDelegate<V>>(&mut self, delegate: D) -> Result<(), RegisterError> {
        self.register_dyn(Arc::new(TypedDelegate::new(delegate)))
    }

    /// Insert into both indices, or into neither.
    pub fn register_dyn(&mut self, delegate: Arc<dyn DynDelegate<V>>) -> Result<(), RegisterError> {
        let incoming = *delegate.info();

        if self.sealed.get() {
            tracing::warn!(delegate = incoming.delegate, "registration after seal rejected");
            return Err(RegisterError::Sealed { incoming });
        }

        if let Err(err) = self.check_collision(&incoming) {
            tracing::warn!(
                kind = ?err.kind(),
                existing = err.existing().delegate,
                incoming = incoming.delegate,
                "delegate registration rejected",
            );
            return Err(err.into());
        }

        let index = self.delegates.len();
        self.delegates.push(delegate);
        self.by_layout.insert(incoming.layout_id, index);
        self.by_type.insert(incoming.item_type, index);

        tracing::debug!(
            delegate = incoming.delegate,
            item_type = incoming.item_type.name(),
            layout_id = incoming.layout_id.raw(),
            capabilities = ?incoming.capabilities,
            "delegate registered",
        );
        Ok(())
    }

    fn check_collision(&self, incoming: &DelegateInfo) -> Result<(), CollisionError> {
        let layout_owner = self.by_layout.get(&incoming.layout_id).copied();
        let type_owner = self.by_type.get(&incoming.item_type).copied();

        match (layout_owner, type_owner) {
            (None, None) => Ok(()),
            (Some(existing), None) => Err(CollisionError::LayoutOnly {
                layout_id: incoming.layout_id,
                existing: *self.delegates[existing].info(),
                incoming: *incoming,
            }),
            (None, Some(existing)) => Err(CollisionError::TypeOnly {
                item_type: incoming.item_type,
                existing: *self.delegates[existing].info(),
                incoming: *incoming,
            }),
            (Some(existing), Some(other)) => Err(CollisionError::Total {
                layout_id: incoming.layout_id,
                item_type: incoming.item_type,
                existing: *self.delegates[existing].info(),
                type_owner: (other != existing).then(|| *self.delegates[other].info()),
                incoming: *incoming,
            }),
        }
    }

    pub fn lookup_by_layout(
        &self,
        layout_id: LayoutId,
    ) -> Result<&Arc<dyn DynDelegate<V>>, NotFoundError> {
        self.note_lookup();
        self.by_layout
            .get(&layout_id)
            .map(|&index| &self.delegates[index])
            .ok_or(NotFoundError::Layout(layout_id))
    }

    pub fn lookup_by_type(
        &self,
        item_type: ItemType,
    ) -> Result<&Arc<dyn DynDelegate<V>>, NotFoundError> {
        self.note_lookup();
        self.by_type
            .get(&item_type)
            .map(|&index| &self.delegates[index])
            .ok_or(NotFoundError::Type(item_type))
    }

    fn note_lookup(&self) {
        if self.seal_on_first_lookup && !self.sealed.replace(true) {
            tracing::debug!(delegates = self.delegates.len(), "delegate registry sealed");
        }
    }

    pub fn contains_type(&self, item_type: ItemType) -> bool {
        self.by_type.contains_key(&item_type)
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.get()
    }

    /// Delegates in registration order.
    pub fn delegates(&self) -> impl Iterator<Item = &DelegateInfo> {
        self.delegates.iter().map(|delegate| delegate.info())
    }

    pub fn registered_types(&self) -> Vec<ItemType> {
        self.delegates().map(|info| info.item_type).collect()
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            delegates: self.delegates().copied().collect(),
            sealed: self.is_sealed(),
        }
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl<V: 'static> Default for DelegateRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
