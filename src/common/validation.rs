//! クッキー属性（名前・ドメイン・パス）の文法検証
//!
//! いずれも純粋な述語関数で、どんな入力に対しても `true` / `false` を返す（パニックしない）。

use std::net::IpAddr;

/// HTTPトークン文字の許可表（コードポイント 0..127）
///
/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
///         "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
static TOKEN_TABLE: [bool; 127] = build_token_table();

const fn build_token_table() -> [bool; 127] {
    let mut table = [false; 127];
    let mut c = 0;
    while c < 127 {
        let b = c as u8;
        table[c] = b.is_ascii_alphanumeric()
            || matches!(
                b,
                b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                    | b'`' | b'|' | b'~'
            );
        c += 1;
    }
    table
}

/// ドメインの最大長
const MAX_DOMAIN_LEN: usize = 255;
/// ラベルの最大長
const MAX_LABEL_LEN: usize = 63;

/// トークン文字かどうか（127以上は常に不許可）
pub fn is_token_char(c: char) -> bool {
    TOKEN_TABLE.get(c as usize).copied().unwrap_or(false)
}

/// クッキー名として有効か
///
/// 空文字列、またはトークン外の文字（制御文字・空白・セパレータ・非ASCII）を含む場合は無効。
pub fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_token_char)
}

/// クッキーの `Domain` 属性として有効か
///
/// `:` を含まないIPアドレス（つまりIPv4）、または先頭ドットと2つ以上のラベルを持つドメイン名のみ許可。
/// IPv6はブラウザのクッキードメイン制約に合わせて拒否する。
pub fn valid_domain(domain: &str) -> bool {
    if is_cookie_domain_name(domain) {
        return true;
    }
    !domain.contains(':') && domain.parse::<IpAddr>().is_ok()
}

/// クッキーの `Path` 属性として有効か
///
/// 全バイトが 0x20..=0x7E かつ `;` 以外であること。空文字列は「属性省略」として有効。
pub fn valid_path(path: &str) -> bool {
    path.bytes().all(|b| (0x20..0x7f).contains(&b) && b != b';')
}

/// 先頭ドット付きのドメイン名文法を満たすか
///
/// ルートドメイン（`.com` など）にはブラウザがクッキーを保存しないため、
/// 先頭ドットの後ろに2つ以上のラベルを要求する。
fn is_cookie_domain_name(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_DOMAIN_LEN || bytes[0] != b'.' {
        return false;
    }

    let mut last = b'.';
    let mut has_letter = false;
    let mut label_len = 0;
    for &c in &bytes[1..] {
        match c {
            // '_' は不可
            b'a'..=b'z' | b'A'..=b'Z' => {
                has_letter = true;
                label_len += 1;
            }
            b'0'..=b'9' => label_len += 1,
            b'-' => {
                // ドット直後のダッシュは不可
                if last == b'.' {
                    return false;
                }
                label_len += 1;
            }
            b'.' => {
                // ドット・ダッシュ直後のドットは不可
                if last == b'.' || last == b'-' {
                    return false;
                }
                if label_len > MAX_LABEL_LEN || label_len == 0 {
                    return false;
                }
                label_len = 0;
            }
            _ => return false,
        }
        last = c;
    }

    if last == b'-' || label_len > MAX_LABEL_LEN || !has_letter {
        return false;
    }

    bytes.iter().filter(|&&b| b == b'.').count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_table_membership() {
        for c in "!#$%&'*+-.^_`|~".chars() {
            assert!(is_token_char(c), "{:?} should be a token char", c);
        }
        for c in "\"(),/:;<=>?@[\\]{} \t".chars() {
            assert!(!is_token_char(c), "{:?} should not be a token char", c);
        }
        assert!(is_token_char('a'));
        assert!(is_token_char('Z'));
        assert!(is_token_char('0'));
        assert!(!is_token_char('\x00'));
        assert!(!is_token_char('\x1f'));
        assert!(!is_token_char('\x7f'));
        assert!(!is_token_char('é'));
        assert!(!is_token_char('あ'));
    }

    #[test]
    fn test_valid_name() {
        assert!(valid_name("sessionId"));
        assert!(valid_name("__Host-sid"));
        assert!(valid_name("a.b|c~d"));

        assert!(!valid_name(""));
        assert!(!valid_name("a b"));
        assert!(!valid_name("a;b"));
        assert!(!valid_name("a=b"));
        assert!(!valid_name("naïve"));
        assert!(!valid_name("tab\tname"));
    }

    #[test]
    fn test_valid_domain_names() {
        assert!(valid_domain(".example.com"));
        assert!(valid_domain(".www.example.com"));
        assert!(valid_domain(".EXAMPLE.com"));
        assert!(valid_domain(".a-b.example.com"));
        assert!(valid_domain(".123.example"));
        // 末尾ドット（FQDN表記）は許容
        assert!(valid_domain(".example.com."));

        assert!(!valid_domain(""));
        assert!(!valid_domain("."));
        assert!(!valid_domain(".com"));
        assert!(!valid_domain("example.com"));
        assert!(!valid_domain(".-bad.com"));
        assert!(!valid_domain(".bad-.com"));
        assert!(!valid_domain(".bad.com-"));
        assert!(!valid_domain(".bad..com"));
        assert!(!valid_domain(".under_score.com"));
        assert!(!valid_domain(".123.456"));
    }

    #[test]
    fn test_valid_domain_label_length() {
        let ok = format!(".{}.com", "a".repeat(63));
        let too_long = format!(".{}.com", "a".repeat(64));
        let last_too_long = format!(".example.{}", "a".repeat(64));
        assert!(valid_domain(&ok));
        assert!(!valid_domain(&too_long));
        assert!(!valid_domain(&last_too_long));
    }

    #[test]
    fn test_valid_domain_total_length() {
        // ".aaa...a.bbb...b" を255バイトちょうど・256バイトで作る
        let label = "a".repeat(63);
        let mut s = String::new();
        while s.len() + 1 + label.len() <= 255 {
            s.push('.');
            s.push_str(&label);
        }
        let rest = 255 - s.len() - 1;
        s.push('.');
        s.push_str(&"b".repeat(rest));
        assert_eq!(s.len(), 255);
        assert!(valid_domain(&s));

        s.push('b');
        assert!(!valid_domain(&s));
    }

    #[test]
    fn test_valid_domain_ip() {
        assert!(valid_domain("192.168.1.1"));
        assert!(valid_domain("127.0.0.1"));

        assert!(!valid_domain("::1"));
        assert!(!valid_domain("[::1]"));
        assert!(!valid_domain("2001:db8::1"));
        assert!(!valid_domain("192.168.1.1:8080"));
        assert!(!valid_domain("256.1.1.1"));
        assert!(!valid_domain(".192.168.1.1"));
    }

    #[test]
    fn test_valid_path() {
        assert!(valid_path(""));
        assert!(valid_path("/"));
        assert!(valid_path("/a/b"));
        assert!(valid_path("/with space/~x"));

        assert!(!valid_path("/a;b"));
        assert!(!valid_path(";"));
        assert!(!valid_path("/a\nb"));
        assert!(!valid_path("/a\x7fb"));
        assert!(!valid_path("/パス"));
    }

    #[test]
    fn test_validators_are_total() {
        let long = "x".repeat(10_000);
        let separators = ";;;...///---";
        for input in ["", ".", "..", ";", "\0", separators, long.as_str()] {
            let _ = valid_name(input);
            let _ = valid_domain(input);
            let _ = valid_path(input);
        }
        assert!(!valid_domain(&format!(".{}", long)));
    }
}
