//! ViewSlot - ホストが所有する再利用可能な描画ハンドル
//!
//! 生成時の layout id に一生固定される。中身の holder は delegate ごとの型を
//! `Box<dyn Any>` で型消去して持つ。

use std::any::{Any, type_name};
use std::fmt;

use super::ids::LayoutId;

pub struct ViewSlot {
    layout_id: LayoutId,
    holder: Box<dyn Any>,
    holder_type: &'static str,
    bound_position: Option<usize>,
}

impl ViewSlot {
    pub(crate) fn new<H: Any>(layout_id: LayoutId, holder: H) -> Self {
        Self {
            layout_id,
            holder: Box::new(holder),
            holder_type: type_name::<H>(),
            bound_position: None,
        }
    }

    /// Layout the slot was created for; never changes across rebinds.
    pub fn layout_id(&self) -> LayoutId {
        self.layout_id
    }

    /// Position of the last bind, cleared when the slot is recycled.
    pub fn bound_position(&self) -> Option<usize> {
        self.bound_position
    }

    pub fn holder<H: Any>(&self) -> Option<&H> {
        self.holder.downcast_ref::<H>()
    }

    pub fn holder_mut<H: Any>(&mut self) -> Option<&mut H> {
        self.holder.downcast_mut::<H>()
    }

    pub(crate) fn set_bound_position(&mut self, position: Option<usize>) {
        self.bound_position = position;
    }
}

impl fmt::Debug for ViewSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSlot")
            .field("layout_id", &self.layout_id)
            .field("holder", &self.holder_type)
            .field("bound_position", &self.bound_position)
            .finish()
    }
}
