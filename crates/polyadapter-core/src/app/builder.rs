//! AdapterBuilder - delegate 登録と起動時検証
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use crate::domain::{ItemType, RegisterError};
use crate::ports::ItemSource;
use crate::typed::delegate::BindingDelegate;
use crate::typed::registry::DelegateRegistry;

use super::adapter::PolyAdapter;
use super::config::AdapterConfig;

/// AdapterBuilder は PolyAdapter を構築
///
/// # 使用例
/// ```ignore
/// let adapter = AdapterBuilder::new()
///     .delegate(HeaderDelegate)?
///     .delegate(RowDelegate)?
///     .expect_types(&[ItemType::of::<Header>(), ItemType::of::<Row>()])
///     .build(source)?;
/// ```
///
/// # Fail-fast 設計
/// - `delegate()` は衝突したその場で `RegisterError` を返す
/// - `build()` 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば `BuildError::MissingItemTypes` を返す
pub struct AdapterBuilder<V> {
    registry: DelegateRegistry<V>,
    config: AdapterConfig,
    expected_types: Option<Vec<ItemType>>,
}

/// BuildError はアダプタ構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing item types: {0:?}. These types were expected but have no delegate.")]
    MissingItemTypes(Vec<String>),

    #[error(transparent)]
    Register(#[from] RegisterError),
}

impl<V: 'static> AdapterBuilder<V> {
    pub fn new() -> Self {
        Self {
            registry: DelegateRegistry::new(),
            config: AdapterConfig::default(),
            expected_types: None,
        }
    }

    /// Delegate を登録
    pub fn delegate<D: BindingDelegate<V>>(mut self, delegate: D) -> Result<Self, RegisterError> {
        self.registry.register(delegate)?;
        Ok(self)
    }

    /// Sealing takes effect on the built adapter's first lookup.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// 期待される item 型のリストを設定
    pub fn expect_types(mut self, item_types: &[ItemType]) -> Self {
        self.expected_types = Some(item_types.to_vec());
        self
    }

    /// 検証してから PolyAdapter を生成（ItemSource の on_attach はここで一度だけ呼ばれる）
    pub fn build<S: ItemSource>(self, source: S) -> Result<PolyAdapter<S, V>, BuildError> {
        if let Some(expected_types) = &self.expected_types {
            let missing: Vec<String> = expected_types
                .iter()
                .filter(|item_type| !self.registry.contains_type(**item_type))
                .map(|item_type| item_type.name().to_string())
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingItemTypes(missing));
            }
        }

        let registry = if self.config.seal_on_first_lookup {
            self.registry.sealing_on_first_lookup()
        } else {
            self.registry
        };
        Ok(PolyAdapter::from_parts(source, registry, self.config))
    }
}

impl<V: 'static> Default for AdapterBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
