//! Ports - 外部コラボレータとの境界
//!
//! - **ItemSource**: item 列の所有者（件数と位置ごとの item を提供）
//! - **Inflater**: layout id から生の view を構築するホスト側の処理

pub mod inflater;
pub mod item_source;

pub use self::inflater::Inflater;
pub use self::item_source::ItemSource;
