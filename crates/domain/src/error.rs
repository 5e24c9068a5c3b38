//! # ドメイン層エラー定義
//!
//! 顧客レコード生成時の入力値検証エラーを表現する。
//!
//! 配送時のエラーは [`crate::notification::DeliveryError`] に分離している。
//! 検証エラーは送信前に必ず検出され、配送処理には到達しない。
//!
//! ## 使用例
//!
//! ```rust
//! use afs_notifier_domain::{ValidationError, customer::CustomerRecord};
//!
//! let result = CustomerRecord::new("", "jane@example.com", "A123");
//! assert_eq!(
//!     result.unwrap_err(),
//!     ValidationError::MissingRequiredField { field: "name" }
//! );
//! ```

use thiserror::Error;

/// 顧客レコードの検証エラー
///
/// 呼び出し元（エントリーポイント）はこのエラーを報告して終了する。
/// ドメイン層内で回復することはない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が未入力（空文字列または欠落）
    ///
    /// `field` には入力ファイル上のキー名（`name`, `email`, `orderId`）を格納する。
    #[error("必須項目が未入力です: {field}")]
    MissingRequiredField {
        /// 未入力だった項目のキー名
        field: &'static str,
    },
}
