//! polyadapter-core
//!
//! Polymorphic list-rendering dispatcher: routes each item of a heterogeneous
//! list to the delegate registered for its runtime type, and compares items
//! across snapshots for an external diff engine.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（LayoutId, ItemType, Item, ViewSlot, Capabilities, errors）
//! - **ports**: 外部コラボレータ（ItemSource, Inflater）
//! - **typed**: 型付き Delegate API（BindingDelegate, DynDelegate, DelegateRegistry）
//! - **app**: ホスト向けの面（PolyAdapter, PolyItemCallback, AdapterBuilder, AdapterConfig）

pub mod app;
pub mod domain;
pub mod ports;
pub mod typed;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::app::{
    AdapterBuilder, AdapterConfig, BuildError, DispatchCounts, PolyAdapter, PolyItemCallback,
    RegistryStatus,
};
pub use crate::domain::{
    Capabilities, CollisionError, CollisionKind, DelegateInfo, DispatchError, Item, ItemType,
    LayoutId, NotFoundError, Payload, RegisterError, ViewSlot,
};
pub use crate::ports::{Inflater, ItemSource};
pub use crate::typed::{
    BindingDelegate, DelegateRegistry, IncrementalBinding, ItemCallback, OnViewAttached,
    OnViewDetached, OnViewRecycled,
};
