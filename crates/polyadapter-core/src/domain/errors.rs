//! Errors - エラー型と分類
//!
//! - 登録時: `CollisionError`（LayoutOnly / TypeOnly / Total）, `RegisterError`
//! - 参照時: `NotFoundError`
//! - ディスパッチ時: `DispatchError`
//!
//! どれも設定ミス・プログラミングミスを表すので、リトライはせず呼び出し元へそのまま返す。

use thiserror::Error;

use super::capability::DelegateInfo;
use super::ids::{ItemType, LayoutId};

/// Which of the two registry keys collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    LayoutOnly,
    TypeOnly,
    Total,
}

/// A registration that would overwrite an existing delegate.
#[derive(Debug, Clone, Error)]
pub enum CollisionError {
    #[error(
        "partial delegate overwrite: layout id {layout_id} collides between {existing} and {incoming}; \
         register an alias layout id to share one template between item types"
    )]
    LayoutOnly {
        layout_id: LayoutId,
        existing: DelegateInfo,
        incoming: DelegateInfo,
    },

    #[error("partial delegate overwrite: item type {item_type} collides between {existing} and {incoming}")]
    TypeOnly {
        item_type: ItemType,
        existing: DelegateInfo,
        incoming: DelegateInfo,
    },

    /// `existing` owns the layout id; `type_owner` is set when a different
    /// delegate owns the item type.
    #[error(
        "total delegate overwrite: layout id {layout_id} and item type {item_type} collide between {existing} and {incoming}"
    )]
    Total {
        layout_id: LayoutId,
        item_type: ItemType,
        existing: DelegateInfo,
        type_owner: Option<DelegateInfo>,
        incoming: DelegateInfo,
    },
}

impl CollisionError {
    pub fn kind(&self) -> CollisionKind {
        match self {
            CollisionError::LayoutOnly { .. } => CollisionKind::LayoutOnly,
            CollisionError::TypeOnly { .. } => CollisionKind::TypeOnly,
            CollisionError::Total { .. } => CollisionKind::Total,
        }
    }

    pub fn existing(&self) -> &DelegateInfo {
        match self {
            CollisionError::LayoutOnly { existing, .. }
            | CollisionError::TypeOnly { existing, .. }
            | CollisionError::Total { existing, .. } => existing,
        }
    }

    pub fn incoming(&self) -> &DelegateInfo {
        match self {
            CollisionError::LayoutOnly { incoming, .. }
            | CollisionError::TypeOnly { incoming, .. }
            | CollisionError::Total { incoming, .. } => incoming,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Collision(#[from] CollisionError),

    #[error("registry is sealed after the first lookup; cannot register {incoming}")]
    Sealed { incoming: DelegateInfo },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("no delegate registered for layout id {0}")]
    Layout(LayoutId),

    #[error("no delegate registered for item type {0}")]
    Type(ItemType),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("position {position} out of bounds for item count {count}")]
    PositionOutOfBounds { position: usize, count: usize },

    /// The slot was created for a layout whose holder type differs from what
    /// the resolved delegate expects.
    #[error("slot holder for {layout_id} is not a {expected}")]
    HolderMismatch {
        layout_id: LayoutId,
        expected: &'static str,
    },

    /// The slot was created for a different layout than the item's delegate.
    #[error("slot created for {slot} cannot show an item laid out with {item}")]
    SlotLayoutMismatch { slot: LayoutId, item: LayoutId },

    #[error("item of type {actual} handed to delegate for {expected}")]
    ItemMismatch { expected: ItemType, actual: ItemType },

    #[error("difference callback compared {old} with {new}")]
    TypeMismatch { old: ItemType, new: ItemType },
}
