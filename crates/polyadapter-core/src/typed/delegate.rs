//! BindingDelegate trait - item 型ごとの描画・比較ロジック
//!
//! # 学習ポイント
//! - Associated Types (`type Item`, `type Holder`)
//! - 任意機能は継承ではなく `as_*()` による capability probe
//!
//! # 使用例
//! ```ignore
//! struct HeaderDelegate;
//!
//! impl BindingDelegate<TextView> for HeaderDelegate {
//!     type Item = Header;
//!     type Holder = HeaderHolder;
//!
//!     fn layout_id(&self) -> LayoutId { LayoutId::new(1) }
//!     fn item_callback(&self) -> &dyn ItemCallback<Header> { &HEADER_CALLBACK }
//!     fn create_view_holder(&self, view: TextView) -> HeaderHolder { HeaderHolder { view } }
//!     fn bind_view(&self, holder: &mut HeaderHolder, item: &Header) { holder.view.set(&item.title) }
//! }
//! ```

use std::any::Any;

use crate::domain::{LayoutId, Payload};

/// Identity, content and payload comparison for one item type.
pub trait ItemCallback<T: ?Sized> {
    fn are_items_the_same(&self, old: &T, new: &T) -> bool;

    fn are_contents_the_same(&self, old: &T, new: &T) -> bool;

    /// Describe what changed between two items already known to be the same.
    fn change_payload(&self, _old: &T, _new: &T) -> Option<Payload> {
        None
    }
}

/// Rendering strategy bound to exactly one item type and one layout id.
///
/// `V` is the raw view type produced by the host's [`Inflater`].
///
/// [`Inflater`]: crate::ports::Inflater
pub trait BindingDelegate<V>: 'static {
    type Item: Any;
    type Holder: Any;

    fn layout_id(&self) -> LayoutId;

    fn item_callback(&self) -> &dyn ItemCallback<Self::Item>;

    fn create_view_holder(&self, item_view: V) -> Self::Holder;

    fn bind_view(&self, holder: &mut Self::Holder, item: &Self::Item);

    /// Partial rebind from change payloads.
    fn as_incremental(&self) -> Option<&dyn IncrementalBinding<Self::Item, Self::Holder>> {
        None
    }

    fn as_recycled(&self) -> Option<&dyn OnViewRecycled<Self::Holder>> {
        None
    }

    fn as_attached(&self) -> Option<&dyn OnViewAttached<Self::Holder>> {
        None
    }

    fn as_detached(&self) -> Option<&dyn OnViewDetached<Self::Holder>> {
        None
    }
}

pub trait IncrementalBinding<I, H> {
    fn bind_view_with_payloads(&self, holder: &mut H, item: &I, payloads: &[Payload]);
}

pub trait OnViewRecycled<H> {
    fn on_recycle(&self, holder: &mut H);
}

pub trait OnViewAttached<H> {
    fn on_attach(&self, holder: &mut H);
}

pub trait OnViewDetached<H> {
    fn on_detach(&self, holder: &mut H);
}
