//! # Notifier エラー定義
//!
//! 各層のエラーを集約し、ログ出力用の分類を提供する。
//! いずれのエラーも今回の起動では回復せず、プロセスは失敗ステータスで終了する。

use afs_notifier_domain::{ValidationError, notification::DeliveryError};
use afs_notifier_shared::event_log::error::{category, kind};
use thiserror::Error;

use crate::{config::ConfigError, customer_source::CustomerSourceError};

/// Notifier で発生するエラー
#[derive(Debug, Error)]
pub enum AppError {
    /// 設定の読み込みに失敗
    #[error("設定エラー: {0}")]
    Config(#[from] ConfigError),

    /// 顧客ファイルの読み込みに失敗
    #[error("{0}")]
    CustomerSource(#[from] CustomerSourceError),

    /// 顧客レコードの検証に失敗（送信は行われない）
    #[error("顧客レコードが不正です: {0}")]
    Validation(#[from] ValidationError),

    /// メール配送に失敗
    #[error("{0}")]
    Delivery(#[from] DeliveryError),
}

impl AppError {
    /// ログの `error.category` に出力する値
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::CustomerSource(_) | Self::Validation(_) => category::INPUT,
            Self::Delivery(_) => category::EXTERNAL_SERVICE,
        }
    }

    /// ログの `error.kind` に出力する値
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => kind::CONFIGURATION,
            Self::CustomerSource(_) => kind::CUSTOMER_SOURCE,
            Self::Validation(_) => kind::VALIDATION,
            Self::Delivery(_) => kind::DELIVERY,
        }
    }
}
