//! 共通の型・トレイト・検証関数

pub mod cookie;
pub mod deep_delete;
pub mod http;
pub mod traits;
pub mod utils;
pub mod validation;

pub use cookie::{Cookie, MaxAge, SameSite};
pub use deep_delete::{deep_delete, domain_variants, path_variants, DeepDelete};
pub use self::http::{Request, Response};
pub use traits::{CookieSink, RequestInfo};
pub use utils::{is_cookie_value_valid, is_header_value_valid, validate_cookie_name_value, validate_header_value};
pub use validation::{is_token_char, valid_domain, valid_name, valid_path};
