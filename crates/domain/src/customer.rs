//! # 顧客レコード
//!
//! 購入者とその注文を表す値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`CustomerRecord`] | 顧客レコード | 検証済みの氏名・メールアドレス・注文 ID |
//! | [`CustomerInput`] | 顧客入力 | 読み込み直後の未検証レコード |
//!
//! ## 設計方針
//!
//! - **生成時バリデーション**: 3 項目すべてが空でないことを `new()` で保証する
//! - **無加工**: trim・大文字小文字変換などの正規化は一切行わない。
//!   値はそのままメール本文に埋め込まれ、AFS 側でパースされる
//! - **メール形式は検証しない**: 空でない任意の文字列を受け入れる

use serde::{Deserialize, Deserializer};

use crate::ValidationError;

/// 検証済みの顧客レコード
///
/// # 不変条件
///
/// - `name`, `email`, `order_id` はいずれも空文字列ではない
/// - 生成後は変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    name:     String,
    email:    String,
    order_id: String,
}

impl CustomerRecord {
    /// 顧客レコードを作成する
    ///
    /// 項目は `name` → `email` → `orderId` の順に検査し、
    /// 最初に見つかった未入力項目を報告する。
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = require("name", name.into())?;
        let email = require("email", email.into())?;
        let order_id = require("orderId", order_id.into())?;

        Ok(Self {
            name,
            email,
            order_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }
}

fn require(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingRequiredField { field });
    }
    Ok(value)
}

/// 読み込み直後の顧客入力
///
/// 入力ファイル（JSON）のキー名に合わせて `orderId` を camelCase で受け取る。
/// キーの欠落は空文字列と同じく未入力として扱う。
/// `orderId` は数値でも受け付け、10 進表記の文字列として保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default)]
    pub name:     Option<String>,
    #[serde(default)]
    pub email:    Option<String>,
    #[serde(default, deserialize_with = "deserialize_order_id")]
    pub order_id: Option<String>,
}

/// 注文 ID の入力表現（文字列または数値）
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderIdValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl From<OrderIdValue> for String {
    fn from(value: OrderIdValue) -> Self {
        match value {
            OrderIdValue::Text(text) => text,
            OrderIdValue::Integer(n) => n.to_string(),
            OrderIdValue::Decimal(n) => n.to_string(),
        }
    }
}

fn deserialize_order_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OrderIdValue>::deserialize(deserializer)?.map(String::from))
}

impl TryFrom<CustomerInput> for CustomerRecord {
    type Error = ValidationError;

    fn try_from(input: CustomerInput) -> Result<Self, Self::Error> {
        Self::new(
            input.name.unwrap_or_default(),
            input.email.unwrap_or_default(),
            input.order_id.unwrap_or_default(),
        )
    }
}
