//! 一次性提示消息
//!
//! 重定向时写入签名的短期 Cookie，下一次渲染页面时读出并清除。

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

pub const FLASH_COOKIE: &str = "oes_flash";

const FLASH_TTL_MINUTES: i64 = 10;

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    msgs: Vec<String>,
    exp: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashMessages {
    messages: Vec<String>,
}

impl FlashMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }

    /// 编码为 Cookie
    pub fn to_cookie(&self, config: &AppConfig) -> Option<Cookie<'static>> {
        let claims = FlashClaims {
            msgs: self.messages.clone(),
            exp: (chrono::Utc::now() + chrono::Duration::minutes(FLASH_TTL_MINUTES)).timestamp()
                as usize,
        };
        let key = EncodingKey::from_secret(config.session.secret.as_bytes());
        let token = match encode(&Header::default(), &claims, &key) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Failed to encode flash messages: {}", e);
                return None;
            }
        };

        Some(
            Cookie::build(FLASH_COOKIE, token)
                .path("/")
                .max_age(actix_web::cookie::time::Duration::minutes(FLASH_TTL_MINUTES))
                .same_site(SameSite::Lax)
                .http_only(true)
                .finish(),
        )
    }

    /// 读取请求携带的提示消息，签名无效或过期时忽略
    pub fn from_request(req: &HttpRequest, config: &AppConfig) -> Self {
        let Some(cookie) = req.cookie(FLASH_COOKIE) else {
            return Self::default();
        };
        let key = DecodingKey::from_secret(config.session.secret.as_bytes());
        match decode::<FlashClaims>(cookie.value(), &key, &Validation::default()) {
            Ok(data) => Self {
                messages: data.claims.msgs,
            },
            Err(e) => {
                tracing::debug!("Ignoring invalid flash cookie: {}", e);
                Self::default()
            }
        }
    }

    /// 请求是否携带提示 Cookie（需要在响应中清除）
    pub fn present_in(req: &HttpRequest) -> bool {
        req.cookie(FLASH_COOKIE).is_some()
    }

    /// 用于清除的空 Cookie
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .finish()
    }
}

impl From<&str> for FlashMessages {
    fn from(message: &str) -> Self {
        Self {
            messages: vec![message.to_string()],
        }
    }
}

impl From<String> for FlashMessages {
    fn from(message: String) -> Self {
        Self {
            messages: vec![message],
        }
    }
}
