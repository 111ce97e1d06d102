//! DynDelegate - BindingDelegate の型消去
//!
//! # 学習ポイント
//! - ジェネリック trait (`BindingDelegate<V>`) → object-safe trait (`DynDelegate<V>`)
//! - Type erasure パターン (`TypedDelegate<D, V>` → `Arc<dyn DynDelegate<V>>`)
//! - capability は登録時に一度だけ probe して `Capabilities` に記録する

use std::any::type_name;
use std::marker::PhantomData;

use crate::domain::{
    Capabilities, DelegateInfo, DispatchError, Item, ItemType, Payload, ViewSlot,
};

use super::delegate::BindingDelegate;

/// Object-safe view of a delegate, keyed by nothing but erased items and
/// slots. Downcast failures come back as [`DispatchError`].
pub trait DynDelegate<V> {
    fn info(&self) -> &DelegateInfo;

    fn create_slot(&self, item_view: V) -> ViewSlot;

    fn bind(&self, slot: &mut ViewSlot, item: &dyn Item) -> Result<(), DispatchError>;

    /// Partial bind; falls back to [`DynDelegate::bind`] when the delegate
    /// does not support it.
    fn bind_partial(
        &self,
        slot: &mut ViewSlot,
        item: &dyn Item,
        payloads: &[Payload],
    ) -> Result<(), DispatchError>;

    fn on_recycle(&self, slot: &mut ViewSlot) -> Result<(), DispatchError>;

    fn on_attach(&self, slot: &mut ViewSlot) -> Result<(), DispatchError>;

    fn on_detach(&self, slot: &mut ViewSlot) -> Result<(), DispatchError>;

    fn are_items_the_same(&self, old: &dyn Item, new: &dyn Item) -> Result<bool, DispatchError>;

    fn are_contents_the_same(&self, old: &dyn Item, new: &dyn Item)
    -> Result<bool, DispatchError>;

    fn change_payload(
        &self,
        old: &dyn Item,
        new: &dyn Item,
    ) -> Result<Option<Payload>, DispatchError>;
}

pub struct TypedDelegate<D, V> {
    delegate: D,
    info: DelegateInfo,
    _marker: PhantomData<fn(V)>,
}

impl<D: BindingDelegate<V>, V: 'static> TypedDelegate<D, V> {
    pub fn new(delegate: D) -> Self {
        let mut capabilities = Capabilities::empty();
        capabilities.set(
            Capabilities::INCREMENTAL_BIND,
            delegate.as_incremental().is_some(),
        );
        capabilities.set(Capabilities::ON_RECYCLE, delegate.as_recycled().is_some());
        capabilities.set(Capabilities::ON_ATTACH, delegate.as_attached().is_some());
        capabilities.set(Capabilities::ON_DETACH, delegate.as_detached().is_some());

        let info = DelegateInfo {
            layout_id: delegate.layout_id(),
            item_type: ItemType::of::<D::Item>(),
            delegate: type_name::<D>(),
            capabilities,
        };

        Self {
            delegate,
            info,
            _marker: PhantomData,
        }
    }

    fn holder<'s>(&self, slot: &'s mut ViewSlot) -> Result<&'s mut D::Holder, DispatchError> {
        let layout_id = slot.layout_id();
        slot.holder_mut::<D::Holder>()
            .ok_or(DispatchError::HolderMismatch {
                layout_id,
                expected: type_name::<D::Holder>(),
            })
    }

    fn item<'i>(&self, item: &'i dyn Item) -> Result<&'i D::Item, DispatchError> {
        item.downcast_ref::<D::Item>()
            .ok_or(DispatchError::ItemMismatch {
                expected: self.info.item_type,
                actual: item.item_type(),
            })
    }
}

impl<D: BindingDelegate<V>, V: 'static> DynDelegate<V> for TypedDelegate<D, V> {
    fn info(&self) -> &DelegateInfo {
        &self.info
    }

    fn create_slot(&self, item_view: V) -> ViewSlot {
        let holder = self.delegate.create_view_holder(item_view);
        ViewSlot::new(self.info.layout_id, holder)
    }

    fn bind(&self, slot: &mut ViewSlot, item: &dyn Item) -> Result<(), DispatchError> {
        let item = self.item(item)?;
        let holder = self.holder(slot)?;
        self.delegate.bind_view(holder, item);
        Ok(())
    }

    fn bind_partial(
        &self,
        slot: &mut ViewSlot,
        item: &dyn Item,
        payloads: &[Payload],
    ) -> Result<(), DispatchError> {
        let item = self.item(item)?;
        let holder = self.holder(slot)?;
        match self.delegate.as_incremental() {
            Some(incremental) => incremental.bind_view_with_payloads(holder, item, payloads),
            None => self.delegate.bind_view(holder, item),
        }
        Ok(())
    }

    fn on_recycle(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        if let Some(hook) = self.delegate.as_recycled() {
            hook.on_recycle(self.holder(slot)?);
        }
        Ok(())
    }

    fn on_attach(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        if let Some(hook) = self.delegate.as_attached() {
            hook.on_attach(self.holder(slot)?);
        }
        Ok(())
    }

    fn on_detach(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        if let Some(hook) = self.delegate.as_detached() {
            hook.on_detach(self.holder(slot)?);
        }
        Ok(())
    }

    fn are_items_the_same(&self, old: &dyn Item, new: &dyn Item) -> Result<bool, DispatchError> {
        let callback = self.delegate.item_callback();
        Ok(callback.are_items_the_same(self.item(old)?, self.item(new)?))
    }

    fn are_contents_the_same(
        &self,
        old: &dyn Item,
        new: &dyn Item,
    ) -> Result<bool, DispatchError> {
        let callback = self.delegate.item_callback();
        Ok(callback.are_contents_the_same(self.item(old)?, self.item(new)?))
    }

    fn change_payload(
        &self,
        old: &dyn Item,
        new: &dyn Item,
    ) -> Result<Option<Payload>, DispatchError> {
        let callback = self.delegate.item_callback();
        Ok(callback.change_payload(self.item(old)?, self.item(new)?))
    }
}
