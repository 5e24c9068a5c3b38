//! # 通知送信
//!
//! 購入体験メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailTransport` trait でメッセージの配送方法を抽象化
//! - **2 つの実装**: SMTP（本番・Mailpit）、Noop（送信せずログのみ）
//! - **診断の分離**: ログ出力は `DispatchObserver` 経由で行い、テストから検証可能にする
//! - **再試行なし**: 送信は 1 回のみ。失敗はそのまま呼び出し元へ返す

mod config;
mod dispatcher;
mod noop;
mod observer;
mod smtp;

use afs_notifier_domain::notification::DeliveryError;
use async_trait::async_trait;
pub use config::TransportConfig;
pub use dispatcher::MailDispatcher;
use lettre::Message;
pub use noop::NoopMailTransport;
pub use observer::{DispatchObserver, TracingDispatchObserver};
pub use smtp::SmtpMailTransport;

/// メール配送トレイト
///
/// 組み立て済みのメッセージをメールサーバーへ渡す。
/// 成功時はサーバーの応答（受領確認）を文字列で返す。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// メッセージを 1 回だけ送信する
    async fn deliver(&self, message: Message) -> Result<String, DeliveryError>;
}
