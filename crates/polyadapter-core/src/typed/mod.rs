//! Typed - 型付き Delegate API
//!
//! item 型と delegate の対応を型で保証し、登録時に型消去して registry に格納します。
//!
//! # 二層構造
//! - **表層（Typed）**: `BindingDelegate<V>`, `ItemCallback<T>`, capability traits - 型安全
//! - **内部（Dyn）**: `DynDelegate<V>` - object-safe, type erasure

pub mod delegate;
pub mod erased;
pub mod registry;

// 主要な trait/型 を再エクスポート
pub use self::delegate::{
    BindingDelegate, IncrementalBinding, ItemCallback, OnViewAttached, OnViewDetached,
    OnViewRecycled,
};
pub use self::erased::{DynDelegate, TypedDelegate};
pub use self::registry::DelegateRegistry;
