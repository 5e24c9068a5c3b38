//! # AFS Notifier インフラ層
//!
//! メールサーバーとの接続・送信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **メール配送**: [`notification::MailDispatcher`] がペイロードからメッセージを組み立て、
//!   送信元と AFS の BCC アドレスを付与して 1 回だけ送信する
//! - **トランスポート**: SMTP（lettre）と Noop の 2 実装を [`notification::MailTransport`]
//!   trait で差し替え可能にする
//! - **診断**: 送信試行・成功・失敗を [`notification::DispatchObserver`] に通知する
//!
//! ## 依存関係
//!
//! ```text
//! apps/notifier → infra → domain
//!                   ↓
//!                 shared
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use afs_notifier_infra::notification::{MailDispatcher, TransportConfig};
//!
//! async fn deliver(config: TransportConfig, payload: &NotificationPayload) -> Result<(), DeliveryError> {
//!     let dispatcher = MailDispatcher::new(config)?;
//!     let receipt = dispatcher.send(payload).await?;
//!     println!("{}", receipt.response);
//!     Ok(())
//! }
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
