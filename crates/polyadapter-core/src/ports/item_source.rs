//! ItemSource port - 表示する item 列の持ち主
//!
//! コレクションの所有・変更・変更通知は外部の責務。core は位置で item を借りるだけ。

use crate::domain::Item;

/// Owner of the backing collection.
///
/// Positions are in `[0, item_count())`; `item_at` returns `None` outside that
/// range.
pub trait ItemSource {
    fn item_count(&self) -> usize;

    /// Hand out the boxed item's contents (`&**boxed`), never the box itself.
    /// A `&Box<dyn Item>` coerces to `&dyn Item` too, but then reports
    /// `Box<dyn Item>` as its type and no delegate matches it.
    fn item_at(&self, position: usize) -> Option<&dyn Item>;

    /// Called once when the adapter that owns this source is constructed.
    ///
    /// No adapter handle is passed. Telling the rendering host that items
    /// changed is the host's job, not something the source does through
    /// the adapter.
    fn on_attach(&mut self) {}
}

impl ItemSource for Vec<Box<dyn Item>> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, position: usize) -> Option<&dyn Item> {
        self.get(position).map(|item| &**item)
    }
}
