//! クッキーの完全削除（Deep Delete）
//!
//! ブラウザは重複したクッキーがどのDomain/Pathで設定されたかを送ってこないため、
//! リクエストのHostとパスから考えられる全ての組み合わせで削除指示を送る。
//! Domain/Pathが一致しない削除指示は元のクッキーを上書きしない。

use super::cookie::{Cookie, SameSite};
use super::traits::{CookieSink, RequestInfo};
use super::utils::{normalize_host, parent_dir};

/// Domain属性の候補を列挙する
///
/// 先頭は属性なし（`""`）、続いてホスト全体から左端のラベルを1つずつ削り、
/// 2ラベル未満になる手前（TLDのみ）で止める。
///
/// `www.example.com` -> `["", ".www.example.com", ".example.com"]`
pub fn domain_variants(host: &str) -> Vec<String> {
    let host = normalize_host(host);
    let mut domains = vec![String::new()];
    if host.is_empty() {
        return domains;
    }

    let mut current = format!(".{}", host);
    loop {
        domains.push(current.clone());
        let next = {
            // 先頭の空要素と左端のラベルを捨てる
            let rest: Vec<&str> = current.split('.').skip(2).collect();
            if rest.len() < 2 {
                break;
            }
            format!(".{}", rest.join("."))
        };
        current = next;
    }
    domains
}

/// Path属性の候補を列挙する
///
/// 先頭は属性なし（`""`）と `"/"`、続いてリクエストパスから親ディレクトリへ順に遡る。
///
/// `/account/settings` -> `["", "/", "/account/settings", "/account"]`
pub fn path_variants(path: &str) -> Vec<String> {
    let mut paths = vec![String::new(), "/".to_string()];
    let mut current = path.to_string();
    while !matches!(current.as_str(), "" | "." | "/") {
        let parent = parent_dir(&current);
        if !paths.contains(&current) {
            paths.push(current);
        }
        current = parent;
    }
    paths
}

/// Deep Deleteの設定
///
/// デフォルトは `Secure` と `HttpOnly` を付与し、SameSiteは付けない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepDelete {
    name: String,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
}

impl DeepDelete {
    /// 削除対象のクッキー名を指定して作成
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            name: cookie_name.into(),
            secure: true,
            http_only: true,
            same_site: None,
        }
    }

    /// Secureフラグを設定
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
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// 削除対象のクッキー名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host・パスから削除指示の一覧を生成する（Domainが外側、Pathが内側の順）
    pub fn directives(&self, host: &str, path: &str) -> Vec<Cookie> {
        let domains = domain_variants(host);
        let paths = path_variants(path);

        let mut cookies = Vec::with_capacity(domains.len() * paths.len());
        for domain in &domains {
            for path in &paths {
                let mut cookie = Cookie::removal(self.name.as_str())
                    .with_domain(domain.as_str())
                    .with_path(path.as_str())
                    .secure(self.secure)
                    .http_only(self.http_only);
                if let Some(same_site) = self.same_site {
                    cookie = cookie.with_same_site(same_site);
                }
                cookies.push(cookie);
            }
        }

        log::debug!(
            "deep delete {:?}: {} domain(s) x {} path(s) = {} directive(s)",
            self.name,
            domains.len(),
            paths.len(),
            cookies.len()
        );
        cookies
    }

    /// リクエストに対する全ての削除指示をsinkへ送る
    pub fn apply<S, R>(&self, sink: &mut S, request: &R)
    where
        S: CookieSink + ?Sized,
        R: RequestInfo + ?Sized,
    {
        for cookie in self.directives(request.host(), request.path()) {
            sink.set_cookie(cookie);
        }
    }
}

/// クッキーを考えられる全てのDomain/Pathの組み合わせで削除する
///
/// 各指示は値が空、Max-Ageが削除番兵、`Secure` と `HttpOnly` 付き。失敗しない。
pub fn deep_delete<S, R>(cookie_name: &str, sink: &mut S, request: &R)
where
    S: CookieSink + ?Sized,
    R: RequestInfo + ?Sized,
{
    DeepDelete::new(cookie_name).apply(sink, request);
}
