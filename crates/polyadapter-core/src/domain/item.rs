//! Type-erased items and change payloads.

use std::any::Any;

use super::ids::ItemType;

/// An item as the dispatcher sees it.
///
/// Implemented for every `'static` type, so item sources just hand out
/// `&dyn Item`. Call `item_type()` on the `&dyn Item` itself: on a
/// `Box<dyn Item>` the method resolves to the box, not its contents.
pub trait Item: Any + 'static {
    fn item_type(&self) -> ItemType;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> Item for T {
    fn item_type(&self) -> ItemType {
        ItemType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Item {
    /// Downcast to the concrete item type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Delegate-defined description of a partial content change.
pub type Payload = Box<dyn Any>;
