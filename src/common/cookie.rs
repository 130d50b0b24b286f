//! HTTPクッキー（Set-Cookie指示）関連の実装

use std::fmt;
use std::time::Duration;
use chrono::{DateTime, Utc};
use crate::error::Error;
use super::utils::{validate_cookie_name_value, is_cookie_value_valid};
use super::validation::{valid_domain, valid_name, valid_path};

/// Expires属性の書式（IMF-fixdate）
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// Max-Age属性
///
/// `Delete` はブラウザに即時削除を指示する番兵値。`Seconds(0)` とは区別される
/// （0秒を「セッションクッキー」と解釈するクライアントがあるため）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    /// 指定秒数だけ保持
    Seconds(u64),
    /// 即時削除
    Delete,
}

impl From<Duration> for MaxAge {
    fn from(d: Duration) -> Self {
        MaxAge::Seconds(d.as_secs())
    }
}

/// HTTPクッキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<MaxAge>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl Cookie {
    /// 新しいクッキーをResultで作成（名前・値が無効ならエラー）
    pub fn try_new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, Error> {
        let n = name.into();
        let v = value.into();
        validate_cookie_name_value(&n, &v)?;
        Ok(Self::unchecked(n, v))
    }

    /// 削除指示用のクッキーを作成
    ///
    /// 名前は検証しない（検証はヘッダー化の時点で行う）。値は空、Max-Ageは削除番兵。
    pub fn removal(name: impl Into<String>) -> Self {
        Self::unchecked(name.into(), String::new()).with_max_age(MaxAge::Delete)
    }

    fn unchecked(name: String, value: String) -> Self {
        Self {
            name,
            value,
            path: None,
            domain: None,
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
            same_site: None,
        }
    }

    /// パスを設定（空文字列は属性省略）
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// ドメインを設定（空文字列は属性省略）
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain = if domain.is_empty() { None } else { Some(domain) };
        self
    }

    /// 有効期限を設定
    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// 最大年齢を設定
    pub fn with_max_age(mut self, max_age: impl Into<MaxAge>) -> Self {
        self.max_age = Some(max_age.into());
        self
    }

    /// セキュアフラグを設定
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// HttpOnlyフラグを設定
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// SameSite属性を設定
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// 削除指示かどうか
    pub fn is_removal(&self) -> bool {
        self.max_age == Some(MaxAge::Delete)
    }

    /// 名前・値・Domain・Pathを全て検証する
    pub fn validate(&self) -> Result<(), Error> {
        validate_cookie_name_value(&self.name, &self.value)?;
        if let Some(domain) = &self.domain {
            if !valid_domain(domain) {
                return Err(Error::InvalidCookie(format!("invalid Domain attribute: {:?}", domain)));
            }
        }
        if let Some(path) = &self.path {
            if !valid_path(path) {
                return Err(Error::InvalidCookie(format!("invalid Path attribute: {:?}", path)));
            }
        }
        Ok(())
    }

    /// Set-Cookieヘッダー値を生成
    ///
    /// 名前・値が無効な場合はエラー。無効なDomain/Pathは警告を出して属性ごと省略する。
    pub fn to_header_value(&self) -> Result<String, Error> {
        if !valid_name(&self.name) {
            return Err(Error::InvalidCookie(format!("invalid cookie name: {:?}", self.name)));
        }
        if !is_cookie_value_valid(&self.value) {
            return Err(Error::InvalidCookie("cookie value contains invalid characters".into()));
        }

        let mut cookie_str = format!("{}={}", self.name, self.value);

        if let Some(path) = &self.path {
            if valid_path(path) {
                cookie_str.push_str(&format!("; Path={}", path));
            } else {
                log::warn!("Cookie::to_header_value skipped invalid Path value: {:?}", path);
            }
        }

        if let Some(domain) = &self.domain {
            if valid_domain(domain) {
                cookie_str.push_str(&format!("; Domain={}", domain));
            } else {
                log::warn!("Cookie::to_header_value skipped invalid Domain value: {:?}", domain);
            }
        }

        match self.max_age {
            Some(MaxAge::Delete) => {
                // 古いクライアント向けにExpiresも過去日時にする
                let epoch = DateTime::<Utc>::UNIX_EPOCH;
                cookie_str.push_str(&format!("; Expires={}", epoch.format(EXPIRES_FORMAT)));
                cookie_str.push_str("; Max-Age=0");
            }
            Some(MaxAge::Seconds(secs)) => {
                if let Some(expires) = &self.expires {
                    cookie_str.push_str(&format!("; Expires={}", expires.format(EXPIRES_FORMAT)));
                }
                cookie_str.push_str(&format!("; Max-Age={}", secs));
            }
            None => {
                if let Some(expires) = &self.expires {
                    cookie_str.push_str(&format!("; Expires={}", expires.format(EXPIRES_FORMAT)));
                }
            }
        }

        if self.secure {
            cookie_str.push_str("; Secure");
        }

        if self.http_only {
            cookie_str.push_str("; HttpOnly");
        }

        if let Some(same_site) = &self.same_site {
            cookie_str.push_str(&format!("; SameSite={}", same_site));
        }

        Ok(cookie_str)
    }
}
