use std::error::Error;

use polyadapter_core::{
    AdapterBuilder, AdapterConfig, BindingDelegate, IncrementalBinding, Item, ItemCallback,
    ItemSource, ItemType, LayoutId, OnViewAttached, OnViewDetached, OnViewRecycled, Payload,
    PolyAdapter, ViewSlot,
};
use tracing_subscriber::EnvFilter;

const SECTION_LAYOUT: LayoutId = LayoutId::new(1);
const MESSAGE_LAYOUT: LayoutId = LayoutId::new(2);

#[derive(Debug, Clone)]
struct Section {
    title: String,
}

#[derive(Debug, Clone)]
struct Message {
    id: u32,
    from: String,
    body: String,
    unread: bool,
}

/// 端末 1 行ぶんの view
#[derive(Debug, Default)]
struct Line {
    text: String,
    attached: bool,
}

struct SectionHolder {
    line: Line,
}

struct MessageHolder {
    line: Line,
    id: u32,
}

/// MessageCallback が返す部分更新の中身
#[derive(Debug)]
struct MessageChange {
    body: Option<String>,
    unread: Option<bool>,
}

struct SectionCallback;

impl ItemCallback<Section> for SectionCallback {
    fn are_items_the_same(&self, old: &Section, new: &Section) -> bool {
        old.title == new.title
    }

    fn are_contents_the_same(&self, old: &Section, new: &Section) -> bool {
        old.title == new.title
    }
}

struct SectionDelegate;

impl BindingDelegate<Line> for SectionDelegate {
    type Item = Section;
    type Holder = SectionHolder;

    fn layout_id(&self) -> LayoutId {
        SECTION_LAYOUT
    }

    fn item_callback(&self) -> &dyn ItemCallback<Section> {
        &SectionCallback
    }

    fn create_view_holder(&self, line: Line) -> SectionHolder {
        SectionHolder { line }
    }

    fn bind_view(&self, holder: &mut SectionHolder, item: &Section) {
        holder.line.text = format!("== {} ==", item.title);
    }
}

struct MessageCallback;

impl ItemCallback<Message> for MessageCallback {
    fn are_items_the_same(&self, old: &Message, new: &Message) -> bool {
        old.id == new.id
    }

    fn are_contents_the_same(&self, old: &Message, new: &Message) -> bool {
        old.body == new.body && old.unread == new.unread && old.from == new.from
    }

    fn change_payload(&self, old: &Message, new: &Message) -> Option<Payload> {
        if old.from != new.from {
            return None;
        }
        let change = MessageChange {
            body: (old.body != new.body).then(|| new.body.clone()),
            unread: (old.unread != new.unread).then_some(new.unread),
        };
        Some(Box::new(change))
    }
}

struct MessageDelegate;

impl MessageDelegate {
    fn render(item: &Message) -> String {
        let marker = if item.unread { "*" } else { " " };
        format!("{marker} #{} {}: {}", item.id, item.from, item.body)
    }
}

impl BindingDelegate<Line> for MessageDelegate {
    type Item = Message;
    type Holder = MessageHolder;

    fn layout_id(&self) -> LayoutId {
        MESSAGE_LAYOUT
    }

    fn item_callback(&self) -> &dyn ItemCallback<Message> {
        &MessageCallback
    }

    fn create_view_holder(&self, line: Line) -> MessageHolder {
        MessageHolder { line, id: 0 }
    }

    fn bind_view(&self, holder: &mut MessageHolder, item: &Message) {
        holder.id = item.id;
        holder.line.text = Self::render(item);
    }

    fn as_incremental(&self) -> Option<&dyn IncrementalBinding<Message, MessageHolder>> {
        Some(self)
    }

    fn as_recycled(&self) -> Option<&dyn OnViewRecycled<MessageHolder>> {
        Some(self)
    }

    fn as_attached(&self) -> Option<&dyn OnViewAttached<MessageHolder>> {
        Some(self)
    }

    fn as_detached(&self) -> Option<&dyn OnViewDetached<MessageHolder>> {
        Some(self)
    }
}

impl IncrementalBinding<Message, MessageHolder> for MessageDelegate {
    fn bind_view_with_payloads(&self, holder: &mut MessageHolder, item: &Message, payloads: &[Payload]) {
        for change in payloads.iter().filter_map(|p| p.downcast_ref::<MessageChange>()) {
            if let Some(body) = &change.body {
                tracing::info!(id = item.id, body = body.as_str(), "body changed");
            }
            if let Some(unread) = change.unread {
                tracing::info!(id = item.id, unread, "unread flag changed");
            }
        }
        holder.id = item.id;
        holder.line.text = Self::render(item);
    }
}

impl OnViewRecycled<MessageHolder> for MessageDelegate {
    fn on_recycle(&self, holder: &mut MessageHolder) {
        tracing::debug!(id = holder.id, "recycle message slot");
        holder.id = 0;
        holder.line.text.clear();
    }
}

impl OnViewAttached<MessageHolder> for MessageDelegate {
    fn on_attach(&self, holder: &mut MessageHolder) {
        holder.line.attached = true;
    }
}

impl OnViewDetached<MessageHolder> for MessageDelegate {
    fn on_detach(&self, holder: &mut MessageHolder) {
        holder.line.attached = false;
    }
}

/// 受信箱の item 列（ItemSource）
struct Inbox {
    items: Vec<Box<dyn Item>>,
}

impl ItemSource for Inbox {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, position: usize) -> Option<&dyn Item> {
        self.items.get(position).map(|item| &**item)
    }

    fn on_attach(&mut self) {
        tracing::info!(items = self.items.len(), "inbox attached");
    }
}

fn inflate(layout_id: LayoutId) -> Line {
    tracing::debug!(layout_id = layout_id.raw(), "inflate");
    Line::default()
}

fn line(slot: &ViewSlot) -> Option<&Line> {
    slot.holder::<SectionHolder>()
        .map(|holder| &holder.line)
        .or_else(|| slot.holder::<MessageHolder>().map(|holder| &holder.line))
}

/// 端末ホスト：1 位置に 1 slot を持つだけの素朴な実装
struct TerminalHost {
    slots: Vec<ViewSlot>,
}

impl TerminalHost {
    fn render_all(&mut self, adapter: &PolyAdapter<Inbox, Line>) -> Result<(), Box<dyn Error>> {
        for position in 0..adapter.item_count() {
            let layout_id = adapter.view_type(position)?;
            let mut slot = adapter.create_slot(&mut inflate, layout_id)?;
            adapter.bind(&mut slot, position)?;
            adapter.on_slot_attached(&mut slot)?;
            self.slots.push(slot);
        }
        Ok(())
    }

    /// Positional update: same item → partial rebind, otherwise replace the slot.
    fn apply(
        &mut self,
        adapter: &PolyAdapter<Inbox, Line>,
        old_items: &[Box<dyn Item>],
    ) -> Result<(), Box<dyn Error>> {
        let callback = adapter.item_callback();
        let new_count = adapter.item_count();

        for position in 0..new_count {
            let Some(new) = adapter.source().item_at(position) else {
                break;
            };
            let old = old_items.get(position).map(|item| &**item);

            if let (Some(old), Some(slot)) = (old, self.slots.get_mut(position)) {
                if callback.are_items_the_same(old, new)? {
                    if !callback.are_contents_the_same(old, new)? {
                        let payloads: Vec<Payload> =
                            callback.change_payload(old, new)?.into_iter().collect();
                        adapter.bind_with_payloads(slot, position, &payloads)?;
                    }
                    continue;
                }
                adapter.on_slot_detached(slot)?;
                adapter.on_slot_recycled(slot)?;
            }

            let layout_id = adapter.view_type(position)?;
            let mut slot = adapter.create_slot(&mut inflate, layout_id)?;
            adapter.bind(&mut slot, position)?;
            adapter.on_slot_attached(&mut slot)?;
            if position < self.slots.len() {
                self.slots[position] = slot;
            } else {
                self.slots.push(slot);
            }
        }

        for mut slot in self.slots.drain(new_count..) {
            adapter.on_slot_detached(&mut slot)?;
            adapter.on_slot_recycled(&mut slot)?;
        }
        Ok(())
    }

    fn print(&self, heading: &str) {
        println!("--- {heading} ---");
        for slot in &self.slots {
            if let Some(line) = line(slot) {
                let state = if line.attached { "" } else { " (detached)" };
                println!("{}{state}", line.text);
            }
        }
    }
}

fn message(id: u32, from: &str, body: &str, unread: bool) -> Box<dyn Item> {
    Box::new(Message {
        id,
        from: from.to_string(),
        body: body.to_string(),
        unread,
    })
}

fn section(title: &str) -> Box<dyn Item> {
    Box::new(Section {
        title: title.to_string(),
    })
}

fn load_config() -> Result<AdapterConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(AdapterConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(AdapterConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;

    // (A) delegate を登録して adapter を組み立てる
    let inbox = Inbox {
        items: vec![
            section("Today"),
            message(1, "ana", "lunch?", true),
            message(2, "bo", "build is green", false),
            section("Earlier"),
            message(3, "cy", "draft attached", false),
        ],
    };
    let mut adapter = AdapterBuilder::new()
        .delegate(SectionDelegate)?
        .delegate(MessageDelegate)?
        .config(config)
        .expect_types(&[ItemType::of::<Section>(), ItemType::of::<Message>()])
        .build(inbox)?;

    // (B) 初回描画
    let mut host = TerminalHost { slots: Vec::new() };
    host.render_all(&adapter)?;
    host.print("initial");

    // (C) 新しいスナップショットに差し替えて差分を反映
    let old_items = std::mem::replace(
        &mut adapter.source_mut().items,
        vec![
            section("Today"),
            message(1, "ana", "lunch at noon?", false),
            message(2, "bo", "build is green", false),
            section("Earlier"),
        ],
    );
    host.apply(&adapter, &old_items)?;
    host.print("updated");

    println!("counts: {}", serde_json::to_string(&adapter.counts())?);
    println!(
        "registry: {}",
        serde_json::to_string_pretty(&adapter.registry().status())?
    );
    Ok(())
}
