//! PolyItemCallback - 型消去された差分コールバック
//!
//! 外部の diff エンジンは item の型を知らない。ここで item の実行時型から delegate を引き、
//! その delegate の `ItemCallback` に比較を任せる。
//!
//! 型が違う 2 つの item は決して「同じ item」ではない。

use crate::domain::{DispatchError, Item, Payload};
use crate::typed::registry::DelegateRegistry;

/// Identity, content and payload comparison over mixed-type items.
pub struct PolyItemCallback<'a, V> {
    registry: &'a DelegateRegistry<V>,
    strict: bool,
}

impl<V> Clone for PolyItemCallback<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for PolyItemCallback<'_, V> {}

impl<'a, V: 'static> PolyItemCallback<'a, V> {
    /// `strict` turns content/payload calls on mismatched types into
    /// [`DispatchError::TypeMismatch`].
    pub fn new(registry: &'a DelegateRegistry<V>, strict: bool) -> Self {
        Self { registry, strict }
    }

    /// `false` for items of different types, without a registry lookup.
    pub fn are_items_the_same(&self, old: &dyn Item, new: &dyn Item) -> Result<bool, DispatchError> {
        if old.item_type() != new.item_type() {
            return Ok(false);
        }
        self.registry
            .lookup_by_type(new.item_type())?
            .are_items_the_same(old, new)
    }

    /// Diff engines only ask this after a positive identity check; a
    /// mismatched pair still answers `false` unless strict.
    pub fn are_contents_the_same(
        &self,
        old: &dyn Item,
        new: &dyn Item,
    ) -> Result<bool, DispatchError> {
        if old.item_type() != new.item_type() {
            self.mismatched(old, new, "are_contents_the_same")?;
            return Ok(false);
        }
        self.registry
            .lookup_by_type(new.item_type())?
            .are_contents_the_same(old, new)
    }

    /// Resolved by `new`'s type. The delegate's answer is returned as is.
    pub fn change_payload(
        &self,
        old: &dyn Item,
        new: &dyn Item,
    ) -> Result<Option<Payload>, DispatchError> {
        if old.item_type() != new.item_type() {
            self.mismatched(old, new, "change_payload")?;
            return Ok(None);
        }
        self.registry
            .lookup_by_type(new.item_type())?
            .change_payload(old, new)
    }

    fn mismatched(&self, old: &dyn Item, new: &dyn Item, call: &str) -> Result<(), DispatchError> {
        tracing::warn!(
            call,
            old = old.item_type().name(),
            new = new.item_type().name(),
            "difference callback used on items of different types",
        );
        if self.strict {
            return Err(DispatchError::TypeMismatch {
                old: old.item_type(),
                new: new.item_type(),
            });
        }
        Ok(())
    }
}
