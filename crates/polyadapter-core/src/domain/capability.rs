//! Optional delegate capabilities and the delegate description used in
//! errors and status views.

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use std::fmt;

use super::ids::{ItemType, LayoutId};

bitflags! {
    /// Optional behaviors a delegate opted into, probed once at registration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct Capabilities: u8 {
        const INCREMENTAL_BIND = 1 << 0;
        const ON_RECYCLE = 1 << 1;
        const ON_ATTACH = 1 << 2;
        const ON_DETACH = 1 << 3;
    }
}

/// Snapshot of a registered (or rejected) delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelegateInfo {
    pub layout_id: LayoutId,
    #[serde(serialize_with = "serialize_item_type")]
    pub item_type: ItemType,
    /// Type name of the delegate implementation.
    pub delegate: &'static str,
    pub capabilities: Capabilities,
}

fn serialize_item_type<S: Serializer>(item_type: &ItemType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(item_type.name())
}

impl fmt::Display for DelegateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' (item type: {}, {})",
            self.delegate, self.item_type, self.layout_id
        )
    }
}
