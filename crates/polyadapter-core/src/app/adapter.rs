//! PolyAdapter - リスト描画ホストのコールバック面
//!
//! # 流れ
//! 1. ホストが位置を渡す
//! 2. ItemSource から item を借りる
//! 3. item の実行時型で delegate を引く（slot の lifecycle は slot の layout id で引く）
//! 4. delegate の create / bind / recycle / attach / detach を呼ぶ
//!
//! 参照の失敗はすべて設定ミスなので、その呼び出しのエラーとしてホストへ返す。

use std::sync::Arc;

use crate::domain::{
    Capabilities, DispatchError, Item, LayoutId, Payload, RegisterError, ViewSlot,
};
use crate::ports::{Inflater, ItemSource};
use crate::typed::delegate::BindingDelegate;
use crate::typed::erased::DynDelegate;
use crate::typed::registry::DelegateRegistry;

use super::config::AdapterConfig;
use super::diff::PolyItemCallback;
use super::status::{DispatchCounters, DispatchCounts};

/// Routes each item of a heterogeneous list to the delegate registered for
/// its runtime type.
pub struct PolyAdapter<S, V> {
    source: S,
    registry: DelegateRegistry<V>,
    config: AdapterConfig,
    counters: DispatchCounters,
}

impl<S: ItemSource, V: 'static> PolyAdapter<S, V> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, AdapterConfig::default())
    }

    pub fn with_config(source: S, config: AdapterConfig) -> Self {
        let registry = if config.seal_on_first_lookup {
            DelegateRegistry::new().sealing_on_first_lookup()
        } else {
            DelegateRegistry::new()
        };
        Self::from_parts(source, registry, config)
    }

    /// Notifies the source of attachment exactly once.
    pub(crate) fn from_parts(mut source: S, registry: DelegateRegistry<V>, config: AdapterConfig) -> Self {
        source.on_attach();
        Self {
            source,
            registry,
            config,
            counters: DispatchCounters::default(),
        }
    }

    pub fn add_delegate<D: BindingDelegate<V>>(&mut self, delegate: D) -> Result<(), RegisterError> {
        self.registry.register(delegate)
    }

    pub fn item_count(&self) -> usize {
        self.source.item_count()
    }

    fn item(&self, position: usize) -> Result<&dyn Item, DispatchError> {
        let item = self
            .source
            .item_at(position)
            .ok_or(DispatchError::PositionOutOfBounds {
                position,
                count: self.source.item_count(),
            })?;
        debug_assert!(
            !item.is::<Box<dyn Item>>(),
            "item source returned a Box<dyn Item> at position {position}; hand out &**boxed instead",
        );
        Ok(item)
    }

    fn delegate_for(&self, item: &dyn Item) -> Result<&Arc<dyn DynDelegate<V>>, DispatchError> {
        Ok(self.registry.lookup_by_type(item.item_type())?)
    }

    /// Layout id of the delegate registered for the item at `position`.
    pub fn view_type(&self, position: usize) -> Result<LayoutId, DispatchError> {
        let item = self.item(position)?;
        Ok(self.delegate_for(item)?.info().layout_id)
    }

    pub fn create_slot<I>(&self, parent: &mut I, layout_id: LayoutId) -> Result<ViewSlot, DispatchError>
    where
        I: Inflater<View = V> + ?Sized,
    {
        let delegate = self.registry.lookup_by_layout(layout_id)?;
        let slot = delegate.create_slot(parent.inflate(layout_id));
        DispatchCounters::bump(&self.counters.creates);
        Ok(slot)
    }

    /// Full bind of the item at `position`.
    pub fn bind(&self, slot: &mut ViewSlot, position: usize) -> Result<(), DispatchError> {
        let (item, delegate) = self.resolve_for_bind(slot, position)?;
        delegate.bind(slot, item)?;
        slot.set_bound_position(Some(position));
        DispatchCounters::bump(&self.counters.full_binds);
        Ok(())
    }

    /// Partial bind when `payloads` is non-empty and the delegate supports
    /// it; full bind otherwise. `payloads` reaches the delegate unchanged.
    pub fn bind_with_payloads(
        &self,
        slot: &mut ViewSlot,
        position: usize,
        payloads: &[Payload],
    ) -> Result<(), DispatchError> {
        let (item, delegate) = self.resolve_for_bind(slot, position)?;
        let incremental = delegate
            .info()
            .capabilities
            .contains(Capabilities::INCREMENTAL_BIND);

        if !payloads.is_empty() && incremental {
            delegate.bind_partial(slot, item, payloads)?;
            DispatchCounters::bump(&self.counters.partial_binds);
        } else {
            delegate.bind(slot, item)?;
            DispatchCounters::bump(&self.counters.full_binds);
        }
        slot.set_bound_position(Some(position));
        Ok(())
    }

    fn resolve_for_bind(
        &self,
        slot: &ViewSlot,
        position: usize,
    ) -> Result<(&dyn Item, &Arc<dyn DynDelegate<V>>), DispatchError> {
        let item = self.item(position)?;
        let delegate = self.delegate_for(item)?;
        let layout_id = delegate.info().layout_id;
        if slot.layout_id() != layout_id {
            return Err(DispatchError::SlotLayoutMismatch {
                slot: slot.layout_id(),
                item: layout_id,
            });
        }
        tracing::trace!(position, layout_id = layout_id.raw(), "bind");
        Ok((item, delegate))
    }

    /// Clears the slot's bound position even when the delegate has no
    /// recycle hook.
    pub fn on_slot_recycled(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        let delegate = self.registry.lookup_by_layout(slot.layout_id())?;
        if delegate.info().capabilities.contains(Capabilities::ON_RECYCLE) {
            delegate.on_recycle(slot)?;
            DispatchCounters::bump(&self.counters.recycles);
        }
        slot.set_bound_position(None);
        Ok(())
    }

    pub fn on_slot_attached(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        let delegate = self.registry.lookup_by_layout(slot.layout_id())?;
        if delegate.info().capabilities.contains(Capabilities::ON_ATTACH) {
            delegate.on_attach(slot)?;
            DispatchCounters::bump(&self.counters.attaches);
        }
        Ok(())
    }

    pub fn on_slot_detached(&self, slot: &mut ViewSlot) -> Result<(), DispatchError> {
        let delegate = self.registry.lookup_by_layout(slot.layout_id())?;
        if delegate.info().capabilities.contains(Capabilities::ON_DETACH) {
            delegate.on_detach(slot)?;
            DispatchCounters::bump(&self.counters.detaches);
        }
        Ok(())
    }

    /// Type-erased comparison callback for an external diff engine.
    pub fn item_callback(&self) -> PolyItemCallback<'_, V> {
        PolyItemCallback::new(&self.registry, self.config.strict_diff_types)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn registry(&self) -> &DelegateRegistry<V> {
        &self.registry
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn counts(&self) -> DispatchCounts {
        self.counters.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemType, NotFoundError};
    use crate::testing::{
        EventLog, Footer, HEADER_LAYOUT, HeaderDelegate, HeaderHolder, ROW_LAYOUT, RowDelegate,
        RowHolder, TestSource, TextView, header, inflate, row,
    };
    use rstest::rstest;

    fn adapter(
        items: Vec<Box<dyn Item>>,
        log: &EventLog,
    ) -> PolyAdapter<TestSource, TextView> {
        let mut adapter = PolyAdapter::new(TestSource::new(items));
        adapter.add_delegate(HeaderDelegate::new(log)).unwrap();
        adapter.add_delegate(RowDelegate::new(log)).unwrap();
        adapter
    }

    fn payloads(labels: &[&str]) -> Vec<Payload> {
        labels
            .iter()
            .map(|label| Box::new(label.to_string()) as Payload)
            .collect()
    }

    #[test]
    fn attaches_source_once() {
        let log = EventLog::default();
        let adapter = adapter(vec![], &log);
        assert_eq!(adapter.source().attached, 1);
    }

    #[test]
    fn header_row_row_view_types() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), row(1, "a"), row(2, "b")], &log);

        assert_eq!(adapter.item_count(), 3);
        assert_eq!(adapter.view_type(0).unwrap(), HEADER_LAYOUT);
        assert_eq!(adapter.view_type(1).unwrap(), ROW_LAYOUT);
        assert_eq!(adapter.view_type(2).unwrap(), ROW_LAYOUT);
    }

    #[test]
    fn view_type_of_unregistered_item_is_not_found() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), Box::new(Footer)], &log);

        let err = adapter.view_type(1).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::NotFound(NotFoundError::Type(item_type)) if item_type == ItemType::of::<Footer>()
        ));
        assert!(err.to_string().contains("Footer"));
    }

    #[test]
    fn view_type_out_of_bounds() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox")], &log);
        assert!(matches!(
            adapter.view_type(4),
            Err(DispatchError::PositionOutOfBounds { position: 4, count: 1 })
        ));
    }

    #[test]
    fn create_slot_wraps_inflated_view() {
        let log = EventLog::default();
        let adapter = adapter(vec![], &log);
        let mut inflater = inflate;

        let slot = adapter.create_slot(&mut inflater, ROW_LAYOUT).unwrap();
        assert_eq!(slot.layout_id(), ROW_LAYOUT);
        assert_eq!(slot.holder::<RowHolder>().unwrap().view.layout_id, ROW_LAYOUT);
        assert_eq!(log.events(), vec!["row.create"]);
        assert_eq!(adapter.counts().creates, 1);
    }

    #[test]
    fn create_slot_for_unknown_layout_fails() {
        let log = EventLog::default();
        let adapter = adapter(vec![], &log);
        let err = adapter
            .create_slot(&mut inflate, LayoutId::new(77))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::NotFound(NotFoundError::Layout(id)) if id == LayoutId::new(77)
        ));
    }

    #[test]
    fn bind_routes_by_runtime_type() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), row(7, "hello")], &log);

        let mut header_slot = adapter.create_slot(&mut inflate, HEADER_LAYOUT).unwrap();
        let mut row_slot = adapter.create_slot(&mut inflate, ROW_LAYOUT).unwrap();
        adapter.bind(&mut header_slot, 0).unwrap();
        adapter.bind(&mut row_slot, 1).unwrap();

        assert_eq!(header_slot.holder::<HeaderHolder>().unwrap().view.text, "Inbox");
        assert_eq!(row_slot.holder::<RowHolder>().unwrap().view.text, "7: hello");
        assert_eq!(row_slot.bound_position(), Some(1));
        assert_eq!(adapter.counts().full_binds, 2);
    }

    #[test]
    fn bind_into_slot_of_other_layout_fails() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), row(7, "hello")], &log);
        let mut header_slot = adapter.create_slot(&mut inflate, HEADER_LAYOUT).unwrap();

        let err = adapter.bind(&mut header_slot, 1).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::SlotLayoutMismatch { slot, item } if slot == HEADER_LAYOUT && item == ROW_LAYOUT
        ));
        assert_eq!(header_slot.bound_position(), None);
    }

    #[test]
    fn bind_of_unregistered_item_is_not_found() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), Box::new(Footer)], &log);
        let mut slot = adapter.create_slot(&mut inflate, HEADER_LAYOUT).unwrap();

        let err = adapter.bind(&mut slot, 1).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::NotFound(NotFoundError::Type(item_type)) if item_type == ItemType::of::<Footer>()
        ));
        let err = adapter.bind_with_payloads(&mut slot, 1, &payloads(&["x"])).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound(NotFoundError::Type(_))));

        assert_eq!(slot.bound_position(), None);
        assert_eq!(log.events(), vec!["header.create"]);
    }

    #[rstest]
    #[case::full(false)]
    #[case::with_payloads(true)]
    fn bind_out_of_bounds_leaves_slot_unbound(#[case] with_payloads: bool) {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox"), row(1, "a")], &log);
        let mut slot = adapter.create_slot(&mut inflate, ROW_LAYOUT).unwrap();

        let result = if with_payloads {
            adapter.bind_with_payloads(&mut slot, 9, &[])
        } else {
            adapter.bind(&mut slot, 9)
        };

        assert!(matches!(
            result,
            Err(DispatchError::PositionOutOfBounds { position: 9, count: 2 })
        ));
        assert_eq!(slot.bound_position(), None);
        assert_eq!(adapter.counts().full_binds, 0);
    }

    struct BoxHandingSource(Vec<Box<dyn Item>>);

    impl ItemSource for BoxHandingSource {
        fn item_count(&self) -> usize {
            self.0.len()
        }

        fn item_at(&self, position: usize) -> Option<&dyn Item> {
            self.0.get(position).map(|boxed| boxed as &dyn Item)
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "returned a Box<dyn Item>")]
    fn source_handing_out_boxes_is_caught_in_debug() {
        let log = EventLog::default();
        let mut adapter = PolyAdapter::new(BoxHandingSource(vec![header("Inbox")]));
        adapter.add_delegate(HeaderDelegate::new(&log)).unwrap();
        let _ = adapter.view_type(0);
    }

    #[test]
    fn payloads_without_incremental_capability_fall_back_to_full_bind() {
        let log = EventLog::default();
        let adapter = adapter(vec![header("Inbox")], &log);
        let mut slot = adapter.create_slot(&mut inflate, HEADER_LAYOUT).unwrap();

        adapter
            .bind_with_payloads(&mut slot, 0, &payloads(&["ignored"]))
            .unwrap();

        assert_eq!(log.events(), vec!["header.create", "header.bind:Inbox"]);
        assert_eq!(adapter.counts().full_binds, 1);
        assert_eq!(adapter.counts().partial_binds, 0);
    }

    #[test]
    fn payloads_reach_incremental_bind_unchanged() {
        let log = EventLog::default();
        let adapter = adapter(vec![row(3, "old")], &log);
        let mut slot = adapter.create_slot(&mut inflate, ROW_LAYOUT).unwrap();
        let payloads = payloads(&["new", "newer"]);

        adapter.bind_with_payloads(&mut slot, 0, &payloads).unwrap();

        assert_eq!(log.events(), vec!["row.create", "row.partial:3:new,newer"]);
        assert_eq!(log.payload_addrs(), vec![payloads.as_ptr() as usize]);
        assert_eq!(slot.holder::<RowHolder>().unwrap().view.text, "3: newer");
        assert_eq!(adapter.counts().partial_binds, 1);
    }

    #[test]
    fn empty_payloads_use_full_bind_even_when_incremental() {
        let log = EventLog::default();
        let adapter = adapter(vec![row(3, "old")], &log);
        let mut slot = adapter.create_slot(&mut inflate, ROW_LAYOUT).unwrap();

        adapter.bind_with_payloads(&mut slot, 0, &[]).unwrap();

        assert_eq!(log.events(), vec!["row.create", "row.bind:3"]);
    }

    #[rstest]
    #[case::header(HEADER_LAYOUT, vec!["header.create"])]
    #[case::row(ROW_LAYOUT, vec!["row.create", "row.attach", "row.detach", "row.recycle"])]
    fn lifecycle_hooks_follow_capabilities(
        #[case] layout_id: LayoutId,
        #[case] expected: Vec<&str>,
    ) {
        let log = EventLog::default();
        let adapter = adapter(vec![], &log);
        let mut slot = adapter.create_slot(&mut inflate, layout_id).unwrap();

        adapter.on_slot_attached(&mut slot).unwrap();
        adapter.on_slot_detached(&mut slot).unwrap();
        adapter.on_slot_recycled(&mut slot).unwrap();

        assert_eq!(log.events(), expected);
    }

    #[test]
    fn recycle_resolves_by_slot_layout_not_current_items() {
        let log = EventLog::default();
        let mut adapter = adapter(vec![row(1, "a")], &log);
        let mut slot = adapter.create_slot(&mut inflate, ROW_LAYOUT).unwrap();
        adapter.bind(&mut slot, 0).unwrap();

        adapter.source_mut().items.clear();
        adapter.on_slot_recycled(&mut slot).unwrap();

        assert_eq!(slot.bound_position(), None);
        assert_eq!(log.events().last().map(String::as_str), Some("row.recycle"));
        assert_eq!(adapter.counts().recycles, 1);
    }

    #[test]
    fn sealed_adapter_rejects_late_delegates() {
        let log = EventLog::default();
        let mut adapter = PolyAdapter::with_config(
            TestSource::new(vec![header("Inbox")]),
            AdapterConfig {
                seal_on_first_lookup: true,
                ..AdapterConfig::default()
            },
        );
        adapter.add_delegate(HeaderDelegate::new(&log)).unwrap();
        adapter.view_type(0).unwrap();

        let err = adapter.add_delegate(RowDelegate::new(&log)).unwrap_err();
        assert!(matches!(err, RegisterError::Sealed { .. }));
    }
}
