//! App - アプリケーション層
//!
//! registry と ports を組み合わせて、ホストから見えるコールバック面を作ります。
//!
//! # 主要コンポーネント
//! - **AdapterBuilder**: delegate 登録と起動時検証
//! - **PolyAdapter**: count / view type / create / bind / lifecycle のルーティング
//! - **PolyItemCallback**: diff エンジン向けの型消去された比較
//! - **AdapterConfig**: 封印・厳格比較の設定
//! - **Status**: 登録状況とディスパッチ回数

pub mod adapter;
pub mod builder;
pub mod config;
pub mod diff;
pub mod status;

// 主要な型を再エクスポート
pub use self::adapter::PolyAdapter;
pub use self::builder::{AdapterBuilder, BuildError};
pub use self::config::AdapterConfig;
pub use self::diff::PolyItemCallback;
pub use self::status::{DispatchCounts, RegistryStatus};
