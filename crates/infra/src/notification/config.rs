//! トランスポート設定
//!
//! 設定ローダーが検証済みの値を詰めて渡す。プロセス終了まで読み取り専用。

use std::fmt;

/// SMTP トランスポートと送信者情報の設定
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// SMTP サーバーのホスト名（例: "smtp.sendgrid.net"）
    pub host:           String,
    /// SMTP サーバーのポート番号（例: 587）
    pub port:           u16,
    /// SMTP 認証ユーザー名
    pub username:       String,
    /// SMTP 認証パスワード（またはトークン）
    pub password:       String,
    /// From ヘッダの表示名
    pub sender_name:    String,
    /// From ヘッダのアドレス
    pub sender_address: String,
    /// AFS が本文を受け取る BCC アドレス
    pub observer_bcc:   String,
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender_name", &self.sender_name)
            .field("sender_address", &self.sender_address)
            .field("observer_bcc", &self.observer_bcc)
            .finish()
    }
}
