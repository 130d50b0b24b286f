//! HTTPリクエスト・レスポンスの最小限の型
//!
//! 本クレートが必要とするのはリクエストのHostとパス、レスポンスへのクッキー設定のみ。

use std::collections::HashMap;
use ::http::header::{HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use super::cookie::Cookie;
use super::traits::{CookieSink, RequestInfo};
use super::utils::is_header_value_valid;

/// HTTPリクエスト
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// リクエストパス
    pub path: String,
    /// HTTPヘッダー（小文字キー）
    pub headers: HashMap<String, String>,
}

impl Request {
    /// 新しいリクエストを作成
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    /// ヘッダーを追加（キーは小文字化、CRLF等を含む値は拒否）
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into().to_ascii_lowercase();
        let value = value.into();
        if is_header_value_valid(&value) {
            self.headers.insert(key, value);
        } else {
            log::warn!("Request::with_header rejected invalid value for {:?}", key);
        }
        self
    }

    /// Hostヘッダーを設定
    pub fn with_host(self, host: impl Into<String>) -> Self {
        self.with_header("host", host)
    }

    /// ヘッダー値を取得（大文字小文字を区別しない）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_ascii_lowercase()).map(String::as_str)
    }
}

impl RequestInfo for Request {
    fn host(&self) -> &str {
        self.header("host").unwrap_or("")
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// HTTPレスポンス（ヘッダーとクッキーのみ保持）
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// HTTPヘッダー（Set-Cookie以外）
    pub headers: HashMap<String, String>,
    /// 設定するクッキー（Set-Cookieは複数になるためヘッダーとは別に保持）
    cookies: Vec<Cookie>,
}

impl Response {
    /// 新しいレスポンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダーを追加（CRLF等を含む値は拒否）
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if is_header_value_valid(&value) {
            self.headers.insert(key, value);
        } else {
            log::warn!("Response::with_header rejected invalid value for {:?}", key);
        }
        self
    }

    /// クッキーを追加したレスポンスを返す
    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// 設定済みのクッキー一覧
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Set-Cookieヘッダー値の一覧を生成（無効なクッキーは警告を出して除外）
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.cookies
            .iter()
            .filter_map(|cookie| match cookie.to_header_value() {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Response dropped cookie {:?}: {}", cookie.name, e);
                    None
                }
            })
            .collect()
    }

    /// 全ヘッダーを `http::HeaderMap` に変換（Set-Cookieは複数値として追加）
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (key, value) in &self.headers {
            match (HeaderName::from_bytes(key.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => log::warn!("Response::to_header_map skipped invalid header {:?}", key),
            }
        }
        for value in self.set_cookie_headers() {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    map.append(SET_COOKIE, value);
                }
                Err(e) => log::warn!("Response::to_header_map skipped Set-Cookie {:?}: {}", value, e),
            }
        }
        map
    }
}

impl CookieSink for Response {
    fn set_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }
}
