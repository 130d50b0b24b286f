//! deepcookie: クッキー属性（名前・Domain・Path）の検証と、考えられる全てのスコープでのクッキー削除
//!
//! ログアウトやリセット時に、過去に異なるDomain/Pathで設定された同名クッキーが
//! ブラウザに残らないことを保証するためのライブラリ。
//!
//! ```
//! use deepcookie::{deep_delete, Request, Response};
//!
//! let req = Request::new("/account/settings").with_host("www.example.com");
//! let mut res = Response::new();
//! deep_delete("sid", &mut res, &req);
//! assert_eq!(res.cookies().len(), 12);
//! ```

pub mod common;
pub mod error;

pub use common::*;
pub use error::*;
