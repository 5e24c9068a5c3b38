//! SMTP 配送実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 平文で接続し、サーバーが STARTTLS を広告した場合のみ TLS に昇格する。

use afs_notifier_domain::notification::DeliveryError;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
    },
};

use super::{MailTransport, TransportConfig};

/// SMTP 配送
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続とハンドシェイクは最初の送信時まで行われない。
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// 新しい SMTP 配送インスタンスを作成
    ///
    /// ネットワーク I/O は行わない。失敗するのは TLS パラメータを
    /// ホスト名から構築できない場合のみ。
    pub fn new(config: &TransportConfig) -> Result<Self, DeliveryError> {
        let tls_parameters = TlsParameters::new(config.host.clone()).map_err(|e| {
            DeliveryError::TransportSetup(format!("TLS パラメータ構築失敗: {e}"))
        })?;

        // builder_dangerous: TLS を必須にせず、Opportunistic で STARTTLS を試みる
        let transport =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
                .port(config.port)
                .tls(Tls::Opportunistic(tls_parameters))
                .credentials(Credentials::new(
                    config.username.clone(),
                    config.password.clone(),
                ))
                .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn deliver(&self, message: Message) -> Result<String, DeliveryError> {
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::TransportFailure(e.to_string()))?;

        Ok(acknowledgement(&response))
    }
}

/// SMTP 応答を `250 2.0.0 Ok: queued` 形式の 1 行に整形する
fn acknowledgement(response: &Response) -> String {
    let lines: Vec<&str> = response.message().collect();
    format!("{} {}", response.code(), lines.join(" "))
}
