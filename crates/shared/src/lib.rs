//! # AFS Notifier 共有ユーティリティ
//!
//! ドメイン・インフラ・アプリケーションから共通で使用するユーティリティ。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - トレーシング初期化は `observability` feature の背後に置き、
//!   ライブラリクレートに subscriber 依存を持ち込まない

pub mod event_log;
pub mod observability;
