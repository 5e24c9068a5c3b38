//! # Notifier 設定
//!
//! 環境変数から送信設定を読み込む。
//!
//! 必須変数が欠けていてもプロセスを終了せず、欠けている変数をすべて列挙した
//! [`ConfigError::MissingVariables`] を返す。終了判断はエントリーポイントが行う。

use std::{env, fmt, path::PathBuf};

use afs_notifier_infra::notification::TransportConfig;
use thiserror::Error;

const SMTP_HOST: &str = "SMTP_HOST";
const SMTP_PORT: &str = "SMTP_PORT";
const SMTP_USER: &str = "SMTP_USER";
const SMTP_PASSWORD: &str = "SMTP_PASSWORD";
const SENDER_NAME: &str = "SENDER_NAME";
const SENDER_EMAIL: &str = "SENDER_EMAIL";
const TRUSTPILOT_AFS_EMAIL: &str = "TRUSTPILOT_AFS_EMAIL";
const NOTIFICATION_BACKEND: &str = "NOTIFICATION_BACKEND";
const CUSTOMER_FILE: &str = "CUSTOMER_FILE";

const DEFAULT_CUSTOMER_FILE: &str = "customer.json";

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定または空
    #[error("必須の環境変数が設定されていません: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    /// `SMTP_PORT` がポート番号として解釈できない
    #[error("SMTP_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),

    /// `NOTIFICATION_BACKEND` が未知の値
    #[error("NOTIFICATION_BACKEND は smtp または noop である必要があります: {0:?}")]
    UnknownBackend(String),
}

/// 送信バックエンド
///
/// - `smtp`: SMTP サーバー経由で送信（デフォルト）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    #[default]
    Smtp,
    Noop,
}

impl NotificationBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "smtp" => Ok(Self::Smtp),
            "noop" => Ok(Self::Noop),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Noop => "noop",
        }
    }
}

impl fmt::Display for NotificationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifier の設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// SMTP トランスポートと送信者情報
    pub transport:     TransportConfig,
    /// 送信バックエンド
    pub backend:       NotificationBackend,
    /// 顧客レコード（JSON）のパス
    pub customer_file: PathBuf,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            lookup(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };

        let host = require(SMTP_HOST);
        let port = require(SMTP_PORT);
        let username = require(SMTP_USER);
        let password = require(SMTP_PASSWORD);
        let sender_name = require(SENDER_NAME);
        let sender_address = require(SENDER_EMAIL);
        let observer_bcc = require(TRUSTPILOT_AFS_EMAIL);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;

        let backend = match lookup(NOTIFICATION_BACKEND) {
            Some(value) => NotificationBackend::parse(&value)?,
            None => NotificationBackend::default(),
        };

        let customer_file: PathBuf = lookup(CUSTOMER_FILE)
            .unwrap_or_else(|| DEFAULT_CUSTOMER_FILE.to_string())
            .into();

        Ok(Self {
            transport: TransportConfig {
                host,
                port,
                username,
                password,
                sender_name,
                sender_address,
                observer_bcc,
            },
            backend,
            customer_file,
        })
    }
}
