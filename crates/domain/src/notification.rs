//! # 通知
//!
//! 購入体験メールに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`NotificationPayload`] | メールペイロード | 宛先ヘッダ・件名・本文 |
//! | [`DeliveryReceipt`] | 配送結果 | SMTP サーバーの応答と送信時刻 |
//! | [`DispatchId`] | 送信試行 ID | 試行・成功・失敗ログの相関 |
//! | [`DeliveryError`] | 配送エラー | メッセージ構築・送信の失敗 |
//!
//! ## 本文フォーマット
//!
//! 本文は AFS（レビュー収集サービス）が BCC で受け取りパースする。
//! ラベル・順序・`label: value` 形式は互換性契約であり、変更してはならない。
//!
//! ```text
//! Email: jane@example.com
//! Name: Jane Doe
//! Reference: A123
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::customer::CustomerRecord;

define_uuid_id! {
    /// 送信試行 ID（一意識別子）
    ///
    /// `send` 呼び出しごとに UUID v7 で採番し、診断ログの相関に使う。
    pub struct DispatchId;
}

/// 件名の接頭辞。AFS はこの後ろの注文 ID を参照として扱う。
const SUBJECT_PREFIX: &str = "Your Purchase Experience - ORDER#";

/// メールペイロード
///
/// [`CustomerRecord`] から導出される宛先ヘッダ・件名・本文。
/// 同じレコードからは常にバイト単位で同一のペイロードが得られる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    recipient_header: String,
    subject:          String,
    body:             String,
}

impl NotificationPayload {
    /// 顧客レコードからペイロードを導出する
    ///
    /// レコードは生成時に検証済みのため、ここでは再検証しない。
    pub fn from_customer(customer: &CustomerRecord) -> Self {
        let recipient_header = format!("{} <{}>", customer.name(), customer.email());
        let subject = format!("{SUBJECT_PREFIX}{}", customer.order_id());
        let body = [
            format!("Email: {}", customer.email()),
            format!("Name: {}", customer.name()),
            format!("Reference: {}", customer.order_id()),
        ]
        .join("\n");

        Self {
            recipient_header,
            subject,
            body,
        }
    }

    /// 宛先ヘッダ（`Name <email>` 形式）
    pub fn recipient_header(&self) -> &str {
        &self.recipient_header
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// プレーンテキスト本文
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl From<&CustomerRecord> for NotificationPayload {
    fn from(customer: &CustomerRecord) -> Self {
        Self::from_customer(customer)
    }
}

/// 配送結果
///
/// 送信成功時に返される受領確認。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// 送信試行 ID
    pub dispatch_id: DispatchId,
    /// メールサーバーの応答（例: `250 2.0.0 Ok: queued`）
    pub response:    String,
    /// 送信完了時刻
    pub sent_at:     DateTime<Utc>,
}

/// 配送エラー
///
/// いずれのバリアントも再試行されず、そのまま呼び出し元へ伝播する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// メール送信に失敗（下位トランスポートのエラーメッセージを保持）
    #[error("メール送信に失敗: {0}")]
    TransportFailure(String),

    /// アドレスをメールボックスとして解釈できずメッセージを構築できない
    #[error("メッセージ構築に失敗: {0}")]
    InvalidAddress(String),

    /// トランスポートの初期化に失敗
    #[error("トランスポートの初期化に失敗: {0}")]
    TransportSetup(String),
}

impl DeliveryError {
    /// 下位層から受け取った元のエラーメッセージを返す
    pub fn message(&self) -> &str {
        match self {
            Self::TransportFailure(message)
            | Self::InvalidAddress(message)
            | Self::TransportSetup(message) => message,
        }
    }
}
