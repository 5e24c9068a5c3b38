//! # AFS Notifier ライブラリ
//!
//! 設定・顧客入力の読み込みと通知パイプラインを公開する。
//! バイナリ（`main.rs`）と統合テストの両方から使用する。

pub mod config;
pub mod customer_source;
pub mod error;
pub mod pipeline;
