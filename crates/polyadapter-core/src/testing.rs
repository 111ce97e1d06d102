//! Shared test fixtures: Header/Row items, recording delegates, a counting
//! item source and a text view.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{Item, LayoutId, Payload};
use crate::ports::ItemSource;
use crate::typed::delegate::{
    BindingDelegate, IncrementalBinding, ItemCallback, OnViewAttached, OnViewDetached,
    OnViewRecycled,
};

pub const HEADER_LAYOUT: LayoutId = LayoutId::new(1);
pub const ROW_LAYOUT: LayoutId = LayoutId::new(2);

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: u32,
    pub label: String,
}

/// Never registered by any fixture delegate.
#[derive(Debug, Clone, PartialEq)]
pub struct Footer;

pub fn header(title: &str) -> Box<dyn Item> {
    Box::new(Header {
        title: title.to_string(),
    })
}

pub fn row(id: u32, label: &str) -> Box<dyn Item> {
    Box::new(Row {
        id,
        label: label.to_string(),
    })
}

/// Raw view produced by [`inflate`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextView {
    pub layout_id: LayoutId,
    pub text: String,
}

pub fn inflate(layout_id: LayoutId) -> TextView {
    TextView {
        layout_id,
        text: String::new(),
    }
}

#[derive(Debug)]
pub struct HeaderHolder {
    pub view: TextView,
}

#[derive(Debug)]
pub struct RowHolder {
    pub view: TextView,
}

/// Records which delegate hooks ran, in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<String>>>,
    payload_addrs: Rc<RefCell<Vec<usize>>>,
}

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn payload_addrs(&self) -> Vec<usize> {
        self.payload_addrs.borrow().clone()
    }
}

pub struct HeaderCallback;

impl ItemCallback<Header> for HeaderCallback {
    fn are_items_the_same(&self, old: &Header, new: &Header) -> bool {
        old.title == new.title
    }

    fn are_contents_the_same(&self, old: &Header, new: &Header) -> bool {
        old == new
    }
}

/// Full bind only; no optional capabilities.
pub struct HeaderDelegate {
    pub layout_id: LayoutId,
    pub log: EventLog,
}

impl HeaderDelegate {
    pub fn new(log: &EventLog) -> Self {
        Self {
            layout_id: HEADER_LAYOUT,
            log: log.clone(),
        }
    }

    pub fn with_layout(mut self, layout_id: LayoutId) -> Self {
        self.layout_id = layout_id;
        self
    }
}

impl BindingDelegate<TextView> for HeaderDelegate {
    type Item = Header;
    type Holder = HeaderHolder;

    fn layout_id(&self) -> LayoutId {
        self.layout_id
    }

    fn item_callback(&self) -> &dyn ItemCallback<Header> {
        &HeaderCallback
    }

    fn create_view_holder(&self, item_view: TextView) -> HeaderHolder {
        self.log.push("header.create");
        HeaderHolder { view: item_view }
    }

    fn bind_view(&self, holder: &mut HeaderHolder, item: &Header) {
        self.log.push(format!("header.bind:{}", item.title));
        holder.view.text = item.title.clone();
    }
}

pub struct RowCallback;

impl ItemCallback<Row> for RowCallback {
    fn are_items_the_same(&self, old: &Row, new: &Row) -> bool {
        old.id == new.id
    }

    fn are_contents_the_same(&self, old: &Row, new: &Row) -> bool {
        old.label == new.label
    }

    fn change_payload(&self, old: &Row, new: &Row) -> Option<Payload> {
        (old.label != new.label).then(|| Box::new(new.label.clone()) as Payload)
    }
}

/// Opts into every capability.
pub struct RowDelegate {
    pub layout_id: LayoutId,
    pub log: EventLog,
}

impl RowDelegate {
    pub fn new(log: &EventLog) -> Self {
        Self {
            layout_id: ROW_LAYOUT,
            log: log.clone(),
        }
    }

    pub fn with_layout(mut self, layout_id: LayoutId) -> Self {
        self.layout_id = layout_id;
        self
    }
}

impl BindingDelegate<TextView> for RowDelegate {
    type Item = Row;
    type Holder = RowHolder;

    fn layout_id(&self) -> LayoutId {
        self.layout_id
    }

    fn item_callback(&self) -> &dyn ItemCallback<Row> {
        &RowCallback
    }

    fn create_view_holder(&self, item_view: TextView) -> RowHolder {
        self.log.push("row.create");
        RowHolder { view: item_view }
    }

    fn bind_view(&self, holder: &mut RowHolder, item: &Row) {
        self.log.push(format!("row.bind:{}", item.id));
        holder.view.text = format!("{}: {}", item.id, item.label);
    }

    fn as_incremental(&self) -> Option<&dyn IncrementalBinding<Row, RowHolder>> {
        Some(self)
    }

    fn as_recycled(&self) -> Option<&dyn OnViewRecycled<RowHolder>> {
        Some(self)
    }

    fn as_attached(&self) -> Option<&dyn OnViewAttached<RowHolder>> {
        Some(self)
    }

    fn as_detached(&self) -> Option<&dyn OnViewDetached<RowHolder>> {
        Some(self)
    }
}

impl IncrementalBinding<Row, RowHolder> for RowDelegate {
    fn bind_view_with_payloads(&self, holder: &mut RowHolder, item: &Row, payloads: &[Payload]) {
        let labels: Vec<&str> = payloads
            .iter()
            .filter_map(|payload| payload.downcast_ref::<String>())
            .map(String::as_str)
            .collect();
        self.log
            .push(format!("row.partial:{}:{}", item.id, labels.join(",")));
        self.log.payload_addrs.borrow_mut().push(payloads.as_ptr() as usize);
        if let Some(label) = labels.last() {
            holder.view.text = format!("{}: {}", item.id, label);
        }
    }
}

impl OnViewRecycled<RowHolder> for RowDelegate {
    fn on_recycle(&self, holder: &mut RowHolder) {
        self.log.push("row.recycle");
        holder.view.text.clear();
    }
}

impl OnViewAttached<RowHolder> for RowDelegate {
    fn on_attach(&self, _holder: &mut RowHolder) {
        self.log.push("row.attach");
    }
}

impl OnViewDetached<RowHolder> for RowDelegate {
    fn on_detach(&self, _holder: &mut RowHolder) {
        self.log.push("row.detach");
    }
}

/// Item source that counts `on_attach` calls.
#[derive(Default)]
pub struct TestSource {
    pub items: Vec<Box<dyn Item>>,
    pub attached: u32,
}

impl TestSource {
    pub fn new(items: Vec<Box<dyn Item>>) -> Self {
        Self { items, attached: 0 }
    }
}

impl ItemSource for TestSource {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, position: usize) -> Option<&dyn Item> {
        self.items.get(position).map(|item| &**item)
    }

    fn on_attach(&mut self) {
        self.attached += 1;
    }
}
