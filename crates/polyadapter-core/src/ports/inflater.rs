//! Inflater port - layout id から生の view を作る
//!
//! レイアウトの展開（ウィジェット構築）はホスト側の責務。

use crate::domain::LayoutId;

/// Builds the raw view for a layout template; delegates wrap it into a holder.
pub trait Inflater {
    type View;

    fn inflate(&mut self, layout_id: LayoutId) -> Self::View;
}

impl<V, F> Inflater for F
where
    F: FnMut(LayoutId) -> V,
{
    type View = V;

    fn inflate(&mut self, layout_id: LayoutId) -> V {
        self(layout_id)
    }
}
