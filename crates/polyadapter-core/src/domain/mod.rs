//! Domain model (identifiers, erased items, slots, capabilities, errors).

pub mod capability;
pub mod errors;
pub mod ids;
pub mod item;
pub mod slot;

pub use self::capability::{Capabilities, DelegateInfo};
pub use self::errors::{CollisionError, CollisionKind, DispatchError, NotFoundError, RegisterError};
pub use self::ids::{ItemType, LayoutId};
pub use self::item::{Item, Payload};
pub use self::slot::ViewSlot;
