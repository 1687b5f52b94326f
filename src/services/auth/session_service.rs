//! 세션 토큰 관리 서비스 구현
//!
//! 서명된 세션 토큰의 발급과 검증, 세션 쿠키의 생성과 제거를 담당합니다.
//! 로그인 성공 시 사용자 id만을 담은 토큰을 발급하고, 요청마다 쿠키에서
//! 토큰을 복원하여 검증합니다.
//!
//! ## 세션 상태 기계
//!
//! ```text
//! Anonymous ──(로그인 성공 / 유효한 쿠키 복원)──► Authenticated
//! Authenticated ──(로그아웃 / 만료·위조 토큰 / 사용자 소멸)──► Anonymous
//! ```
//!
//! 만료되거나 위조된 토큰은 에러 페이지가 아니라 "세션 없음"으로
//! 취급됩니다 (로그아웃 상태로의 fail-open).

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::SessionConfig,
    core::AppError,
    domain::entities::users::user::User,
    domain::models::auth::SessionClaims,
};

/// 세션 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 세션 토큰을 생성하고 검증합니다.
/// 토큰 수명은 [`SessionConfig::max_age_secs`]로 설정되며 쿠키의
/// Max-Age와 항상 동일합니다.
#[service(name = "session")]
pub struct SessionService {
    // 외부 의존성 없음
}

impl SessionService {
    /// 사용자를 위한 세션 토큰 발급
    ///
    /// 직렬화되는 것은 사용자의 id뿐입니다. 프로필 정보는 요청마다
    /// 저장소에서 다시 조회되므로 토큰이 오래된 정보를 운반하지 않습니다.
    ///
    /// # Arguments
    ///
    /// * `user` - 토큰을 발급받을 사용자 (저장된 상태여야 함)
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 서명된 세션 토큰
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(SessionConfig::max_age_secs());

        let claims = SessionClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("사용자 ID가 없습니다".to_string())
            })?,
            auth_provider: user.auth_provider.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = SessionConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 세션 토큰 검증 및 클레임 추출
    ///
    /// # Arguments
    ///
    /// * `token` - 쿠키에서 추출한 세션 토큰 문자열
    ///
    /// # Returns
    ///
    /// * `Ok(SessionClaims)` - 검증된 토큰의 클레임 정보
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    /// * `AppError::InternalError` - 기타 시스템 오류
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        let secret = SessionConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<SessionClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("세션이 만료되었습니다".to_string())
                },
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::AuthenticationError("유효하지 않은 세션 토큰입니다".to_string())
                },
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::AuthenticationError("세션 토큰 서명이 올바르지 않습니다".to_string())
                },
                _ => AppError::InternalError(format!("세션 토큰 검증 실패: {}", e))
            })
    }

    /// 세션 토큰으로부터 사용자 ID 추출
    pub fn extract_user_id(&self, token: &str) -> Result<String, AppError> {
        let claims = self.verify(token)?;
        Ok(claims.sub)
    }

    /// 로그인 응답에 붙일 세션 쿠키 생성
    ///
    /// HttpOnly 쿠키로 발급되며 Secure 플래그는 설정을 따릅니다
    /// (프로덕션 기본값 true, HTTPS 필요).
    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SessionConfig::cookie_name(), token)
            .path("/")
            .http_only(true)
            .secure(SessionConfig::cookie_secure())
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(SessionConfig::max_age_secs()))
            .finish()
    }

    /// 로그아웃 응답에 붙일 세션 제거 쿠키 생성
    ///
    /// 빈 값과 과거 만료 시각을 가진 동일 이름의 쿠키를 내려보내
    /// 브라우저가 세션 쿠키를 삭제하도록 합니다.
    pub fn build_removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SessionConfig::cookie_name(), "")
            .path("/")
            .http_only(true)
            .secure(SessionConfig::cookie_secure())
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// HTTP 요청 헤더에서 세션 토큰 추출
///
/// `Cookie` 헤더를 직접 파싱하여 지정된 이름의 쿠키 값을 찾습니다.
/// 토큰이 없거나 빈 값이면 `None`을 반환하며, 호출부는 이를 익명
/// 요청으로 취급합니다.
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get("Cookie")?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie_pair in cookie_str.split(';') {
        let cookie_pair = cookie_pair.trim();
        if let Some((name, value)) = cookie_pair.split_once('=') {
            if name.trim() == cookie_name {
                let token = value.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
    use mongodb::bson::oid::ObjectId;
    use crate::config::AuthProvider;

    fn stored_user() -> User {
        let mut user = User::new_local("alice".to_string(), "hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let service = SessionService::instance();
        let user = stored_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.auth_provider, AuthProvider::Local);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_issue_requires_stored_user() {
        let service = SessionService::instance();
        // 저장 전(id 없음) 사용자는 토큰을 발급받을 수 없음
        let user = User::new_local("bob".to_string(), "hash".to_string());

        assert!(service.issue(&user).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let service = SessionService::instance();
        let token = service.issue(&stored_user()).unwrap();

        let mut tampered = token;
        tampered.push('x');

        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = SessionService::instance();
        let user = stored_user();

        // 검증기의 기본 leeway(60초)보다 충분히 과거로 만료시킨 토큰
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id_string().unwrap(),
            auth_provider: AuthProvider::Local,
            iat: (now - Duration::seconds(600)).timestamp(),
            exp: (now - Duration::seconds(300)).timestamp(),
        };
        let secret = SessionConfig::secret();
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        ).unwrap();

        let result = service.verify(&expired);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_session_token_finds_named_cookie() {
        let headers = cookie_headers("other=1; secrets_session=abc.def.ghi; theme=dark");

        assert_eq!(
            extract_session_token(&headers, "secrets_session").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_extract_session_token_ignores_empty_value() {
        let headers = cookie_headers("secrets_session=; theme=dark");

        assert!(extract_session_token(&headers, "secrets_session").is_none());
    }

    #[test]
    fn test_extract_session_token_missing_header() {
        let headers = HeaderMap::new();

        assert!(extract_session_token(&headers, "secrets_session").is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let service = SessionService::instance();
        let cookie = service.build_session_cookie("token-value".to_string());

        assert_eq!(cookie.name(), SessionConfig::cookie_name());
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(CookieDuration::seconds(SessionConfig::max_age_secs()))
        );
    }

    #[test]
    fn test_removal_cookie_clears_value() {
        let service = SessionService::instance();
        let cookie = service.build_removal_cookie();

        assert_eq!(cookie.name(), SessionConfig::cookie_name());
        assert_eq!(cookie.value(), "");
    }
}
