//! # 顧客レコードの読み込み
//!
//! JSON ファイル（`{ "name", "email", "orderId" }`）から顧客入力を読み込む。
//! 項目の欠落はここではエラーにせず、レコード生成時の検証に委ねる。

use std::path::{Path, PathBuf};

use afs_notifier_domain::customer::CustomerInput;
use thiserror::Error;

/// 顧客ファイルの読み込みエラー
#[derive(Debug, Error)]
pub enum CustomerSourceError {
    /// ファイルを読み込めない
    #[error("顧客ファイルを読み込めません: {}: {source}", .path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON として解釈できない
    #[error("顧客ファイルの JSON が不正です: {}: {source}", .path.display())]
    Parse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 顧客ファイルを読み込む
pub async fn load_customer(path: &Path) -> Result<CustomerInput, CustomerSourceError> {
    let contents =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CustomerSourceError::Read {
                path: path.to_path_buf(),
                source,
            })?;

    parse_customer(&contents).map_err(|source| CustomerSourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON 文字列から顧客入力を取り出す
pub fn parse_customer(json: &str) -> Result<CustomerInput, serde_json::Error> {
    serde_json::from_str(json)
}
