//! コアトレイト定義（RequestInfo、CookieSink）

use ::http::header::{HeaderMap, HeaderValue, HOST, SET_COOKIE};
use super::cookie::Cookie;

/// 読み取り専用のリクエスト情報
pub trait RequestInfo {
    /// リクエストのHost（ポート等を含む生の値でもよい）
    fn host(&self) -> &str;

    /// リクエストのURLパス
    fn path(&self) -> &str;
}

/// クッキー設定指示の受け口
///
/// Set-Cookieヘッダーの書式化は実装側の責務。
pub trait CookieSink {
    /// クッキー設定指示を受け取る
    fn set_cookie(&mut self, cookie: Cookie);
}

impl<T: CookieSink + ?Sized> CookieSink for &mut T {
    fn set_cookie(&mut self, cookie: Cookie) {
        (**self).set_cookie(cookie);
    }
}

/// 指示をそのまま記録する
impl CookieSink for Vec<Cookie> {
    fn set_cookie(&mut self, cookie: Cookie) {
        self.push(cookie);
    }
}

/// Set-Cookieヘッダーとして追加する（書式化できないクッキーは警告を出して除外）
impl CookieSink for HeaderMap {
    fn set_cookie(&mut self, cookie: Cookie) {
        let rendered = match cookie.to_header_value() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("HeaderMap sink dropped cookie {:?}: {}", cookie.name, e);
                return;
            }
        };
        match HeaderValue::from_str(&rendered) {
            Ok(value) => {
                self.append(SET_COOKIE, value);
            }
            Err(e) => log::warn!("HeaderMap sink dropped cookie {:?}: {}", cookie.name, e),
        }
    }
}

/// HostヘッダーがなければURIのホスト部を使う
impl<B> RequestInfo for ::http::Request<B> {
    fn host(&self) -> &str {
        self.headers()
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.uri().host())
            .unwrap_or("")
    }

    fn path(&self) -> &str {
        self.uri().path()
    }
}
