//! 会话凭证
//!
//! 登录成功后签发 HS256 令牌写入 HttpOnly Cookie，路径参数中的 ID
//! 必须与令牌中的身份一致。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "oes_session";

const ROLE_TEACHER: &str = "teacher";
const ROLE_STUDENT: &str = "student";

// 会话 Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,           // Subject（教师 user_id 或学生 student_id）
    pub role: String,          // teacher 或 student
    pub class_id: Option<i64>, // 学生所在班级
    pub exp: usize,            // Expiration time (时间戳)
    pub iat: usize,            // Issued at (签发时间)
}

/// 会话身份
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIdentity {
    Teacher { user_id: i64 },
    Student { student_id: i64, class_id: i64 },
}

impl SessionIdentity {
    pub fn is_teacher(&self, user_id: i64) -> bool {
        matches!(self, SessionIdentity::Teacher { user_id: id } if *id == user_id)
    }

    pub fn is_student(&self, student_id: i64, class_id: i64) -> bool {
        matches!(
            self,
            SessionIdentity::Student { student_id: sid, class_id: cid }
                if *sid == student_id && *cid == class_id
        )
    }

    fn into_claims(self, now: chrono::DateTime<chrono::Utc>, expiry: chrono::Duration) -> SessionClaims {
        let (sub, role, class_id) = match self {
            SessionIdentity::Teacher { user_id } => (user_id, ROLE_TEACHER, None),
            SessionIdentity::Student {
                student_id,
                class_id,
            } => (student_id, ROLE_STUDENT, Some(class_id)),
        };

        SessionClaims {
            sub: sub.to_string(),
            role: role.to_string(),
            class_id,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    fn from_claims(claims: &SessionClaims) -> Option<Self> {
        let sub = claims.sub.parse::<i64>().ok()?;
        match (claims.role.as_str(), claims.class_id) {
            (ROLE_TEACHER, _) => Some(SessionIdentity::Teacher { user_id: sub }),
            (ROLE_STUDENT, Some(class_id)) => Some(SessionIdentity::Student {
                student_id: sub,
                class_id,
            }),
            _ => None,
        }
    }
}

pub struct SessionUtils;

impl SessionUtils {
    // 签发会话令牌
    pub fn issue(
        identity: SessionIdentity,
        config: &AppConfig,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = identity.into_claims(
            chrono::Utc::now(),
            chrono::Duration::minutes(config.session.expiry_minutes),
        );
        let encoding_key = EncodingKey::from_secret(config.session.secret.as_bytes());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌
    pub fn verify(
        token: &str,
        config: &AppConfig,
    ) -> Result<SessionIdentity, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(config.session.secret.as_bytes());
        let claims = decode::<SessionClaims>(token, &decoding_key, &Validation::default())?.claims;

        SessionIdentity::from_claims(&claims)
            .ok_or_else(|| jsonwebtoken::errors::ErrorKind::InvalidToken.into())
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str, config: &AppConfig) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::minutes(
                config.session.expiry_minutes,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie(config: &AppConfig) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话身份，无效令牌视为未登录
    pub fn extract_identity(
        req: &actix_web::HttpRequest,
        config: &AppConfig,
    ) -> Option<SessionIdentity> {
        let cookie = req.cookie(SESSION_COOKIE)?;
        Self::verify(cookie.value(), config).ok()
    }
}
