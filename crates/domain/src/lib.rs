//! # AFS Notifier ドメイン層
//!
//! 購入体験メール通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 顧客レコード・メールペイロードは生成後に変更しない
//! - **純粋関数**: ペイロードの導出は同じ入力に対して常に同じ出力を返す
//! - **ドメインエラー**: バリデーション失敗と配送失敗を型で区別する
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps/notifier → infra → domain
//!        ↘          ↓
//!          shared ←─┘
//! ```
//!
//! ドメイン層はインフラ層（SMTP、ファイル、環境変数）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`customer`] - 顧客レコードとその入力表現
//! - [`notification`] - メールペイロード、配送結果、配送エラー
//! - [`error`] - バリデーションエラー
//!
//! ## 使用例
//!
//! ```rust
//! use afs_notifier_domain::{customer::CustomerRecord, notification::NotificationPayload};
//!
//! let customer = CustomerRecord::new("Jane Doe", "jane@example.com", "A123").unwrap();
//! let payload = NotificationPayload::from_customer(&customer);
//!
//! assert_eq!(payload.subject(), "Your Purchase Experience - ORDER#A123");
//! ```

#[macro_use]
mod macros;

pub mod customer;
pub mod error;
pub mod notification;

pub use error::ValidationError;
