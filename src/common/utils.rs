//! 共通ユーティリティ関数群（ヘッダー値検証、ホスト正規化、パス操作 等）

use ::http::uri::Authority;
use crate::error::Error;
use super::validation::valid_name;

/// ヘッダー値に使用可能な文字かを判定（CRLF・制御文字を拒否）
pub fn is_header_value_valid(value: &str) -> bool {
    // RFC的にはobs-text等もありうるが、ここでは保守的に制御文字(0x00-0x1F, 0x7F)とCR/LFを拒否する
    if value.is_empty() {
        return true; // 空は許容（ヘッダー仕様上も可）
    }
    value.chars().all(|c| {
        let code = c as u32;
        code >= 0x20 && code != 0x7F && c != '\r' && c != '\n'
    })
}

/// Cookie値が安全か（RFC6265 cookie-octetの簡易版）
/// 許容: 0x21, 0x23-0x2B, 0x2D-0x3A, 0x3C-0x5B, 0x5D-0x7E
pub fn is_cookie_value_valid(value: &str) -> bool {
    value.chars().all(|c| {
        let b = c as u32;
        matches!(b,
            0x21 |
            0x23..=0x2B |
            0x2D..=0x3A |
            0x3C..=0x5B |
            0x5D..=0x7E
        )
    })
}

/// ヘルパー: 無効なヘッダー値ならErrorを返す
pub fn validate_header_value(value: &str) -> Result<(), Error> {
    if is_header_value_valid(value) { Ok(()) } else { Err(Error::InvalidHeader("header value contains control/CRLF or invalid chars".into())) }
}

/// ヘルパー: 無効なCookie名/値ならErrorを返す
pub fn validate_cookie_name_value(name: &str, value: &str) -> Result<(), Error> {
    if !valid_name(name) {
        return Err(Error::InvalidCookie("cookie name contains invalid characters".into()));
    }
    if !is_cookie_value_valid(value) {
        return Err(Error::InvalidCookie("cookie value contains invalid characters".into()));
    }
    Ok(())
}

/// Hostヘッダー値からユーザー情報・ポート番号・末尾ドットを取り除く
///
/// `example.com:8080` -> `example.com`、`user@example.com` -> `example.com`、
/// `example.com.` -> `example.com`、`[::1]:443` -> `[::1]`。
/// authorityとして解釈できない値は前後の空白と末尾ドットのみ除去する。
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let parsed = host.parse::<Authority>().ok();
    let host = parsed.as_ref().map_or(host, |authority| authority.host());
    host.trim_end_matches('.').to_string()
}

/// パスを字句的に正規化する（`//`、`.`、`..` の解決と末尾スラッシュの除去）
///
/// 空文字列は `"."` になる。ルート外への `..` はルートで止まる。
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().map_or(false, |s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// 親ディレクトリを返す（最後の要素を除去して正規化）
///
/// `/a/b` -> `/a`、`/a` -> `/`、`a` -> `.`、`/a/b/` -> `/a/b`
pub fn parent_dir(path: &str) -> String {
    let dir = match path.rfind('/') {
        Some(i) => &path[..=i],
        None => "",
    };
    clean_path(dir)
}


#[cfg(test)]
mod sec_tests {
    use super::*;

    #[test]
    fn header_value_rejects_crlf_and_ctl() {
        assert!(is_header_value_valid("normal-Value_123"));
        assert!(!is_header_value_valid("bad\rvalue"));
        assert!(!is_header_value_valid("bad\nvalue"));
        assert!(!is_header_value_valid("bad\x07bell"));
        assert!(validate_header_value("ok").is_ok());
        assert!(validate_header_value("bad\r\nX-Injected: 1").is_err());
    }

    #[test]
    fn cookie_name_and_value_validation() {
        assert!(validate_cookie_name_value("SESSIONID", "abcDEF123-_.:~").is_ok());
        assert!(validate_cookie_name_value("SESSIONID", "").is_ok());
        assert!(validate_cookie_name_value("", "v").is_err());
        assert!(validate_cookie_name_value("bad name", "v").is_err());
        assert!(validate_cookie_name_value("bad;name", "v").is_err());

        assert!(is_cookie_value_valid("abcDEF123-_.:~"));
        assert!(!is_cookie_value_valid("bad;value"));
        assert!(!is_cookie_value_valid("bad,value"));
        assert!(!is_cookie_value_valid("bad\nvalue"));
    }
}
