//! エラー型の定義

use thiserror::Error;

/// クッキー操作のエラー型
///
/// 検証関数（`valid_name` 等）と `deep_delete` は失敗しないため、
/// このエラーはクッキーの生成・ヘッダー化でのみ使われる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 無効なクッキー（名前・値・属性）
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),

    /// 無効なヘッダー値
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::InvalidCookie("cookie name contains invalid characters".into());
        assert_eq!(e.to_string(), "Invalid cookie: cookie name contains invalid characters");

        let e = Error::InvalidHeader("bad".into());
        assert_eq!(e.to_string(), "Invalid header: bad");
    }
}
