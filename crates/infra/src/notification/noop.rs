//! Noop 配送実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 手元での動作確認や送信を止めたい運用時に `NOTIFICATION_BACKEND=noop` で選択する。

use afs_notifier_domain::notification::DeliveryError;
use async_trait::async_trait;
use lettre::Message;

use super::MailTransport;

/// Noop 配送の受領確認文字列
const NOOP_ACKNOWLEDGEMENT: &str = "noop";

/// Noop 配送（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMailTransport;

#[async_trait]
impl MailTransport for NoopMailTransport {
    async fn deliver(&self, message: Message) -> Result<String, DeliveryError> {
        let recipients = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        tracing::info!(
            recipients = %recipients,
            "Noop: メール送信をスキップ"
        );
        Ok(NOOP_ACKNOWLEDGEMENT.to_string())
    }
}
