//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 세션 쿠키 등 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 OAuth2 설정과 유사한 역할을 수행합니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명/패스워드 기반 전통적인 인증
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **Facebook OAuth 2.0**: Facebook 계정을 통한 소셜 로그인
//! 4. **세션 쿠키**: 서명된 토큰을 담은 HttpOnly 쿠키
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="https://yourdomain.com/auth/google/secrets"
//!
//! export FACEBOOK_CLIENT_ID="your-facebook-app-id"
//! export FACEBOOK_CLIENT_SECRET="your-facebook-app-secret"
//! export FACEBOOK_REDIRECT_URI="https://yourdomain.com/auth/facebook/secrets"
//!
//! export SESSION_SECRET="your-session-signing-key"
//! export SESSION_MAX_AGE_SECS="60"
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! ```
//!
//! 필수 값이 누락된 경우 [`crate::config::validate_required_config`]가
//! 서버 기동 전에 패닉을 발생시켜 조용한 기능 저하를 방지합니다.

use std::env;

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 관리합니다.
/// Spring Security의 `spring.security.oauth2.client.registration.google`
/// 설정과 동일한 역할을 합니다.
///
/// ## 주의사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - `redirect_uri`는 Google Console의 승인된 리디렉션 URI 목록과
///   문자 단위로 정확히 일치해야 합니다
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("GOOGLE_CLIENT_ID")
            .expect("GOOGLE_CLIENT_ID must be set")
    }

    /// Google OAuth Client Secret을 반환합니다.
    ///
    /// 서버 사이드에서만 사용되며, 토큰 교환 시 사용됩니다.
    /// 로그에 출력하지 마세요.
    ///
    /// # Panics
    ///
    /// `GOOGLE_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 URI를 반환합니다.
    ///
    /// 배포 주소를 코드에 하드코딩하지 않고 설정으로만 관리합니다.
    ///
    /// # URI 형식
    ///
    /// - 개발: `http://localhost:8080/auth/google/secrets`
    /// - 프로덕션: `https://yourdomain.com/auth/google/secrets`
    ///
    /// # Panics
    ///
    /// `GOOGLE_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("GOOGLE_REDIRECT_URI")
            .expect("GOOGLE_REDIRECT_URI must be set")
    }

    /// Google OAuth 인증 서버의 인증 엔드포인트 URI를 반환합니다.
    ///
    /// 일반적으로 변경할 필요가 없으므로 기본값을 제공합니다.
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    /// Google OAuth 토큰 교환 엔드포인트 URI를 반환합니다.
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// Google 사용자 정보 조회 엔드포인트 URI를 반환합니다.
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }
}

/// Facebook OAuth 2.0 설정을 관리하는 구조체
///
/// Facebook for Developers 에서 생성한 앱의 클라이언트 정보를 관리합니다.
/// [`GoogleOAuthConfig`]와 동일한 구조로, 엔드포인트만 Graph API를 향합니다.
pub struct FacebookOAuthConfig;

impl FacebookOAuthConfig {
    /// Facebook App ID를 반환합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id() -> String {
        env::var("FACEBOOK_CLIENT_ID")
            .expect("FACEBOOK_CLIENT_ID must be set")
    }

    /// Facebook App Secret을 반환합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_CLIENT_SECRET` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_secret() -> String {
        env::var("FACEBOOK_CLIENT_SECRET")
            .expect("FACEBOOK_CLIENT_SECRET must be set")
    }

    /// OAuth 인증 완료 후 리디렉션될 URI를 반환합니다.
    ///
    /// Facebook 앱 설정의 유효한 OAuth 리디렉션 URI와 정확히 일치해야 합니다.
    ///
    /// # Panics
    ///
    /// `FACEBOOK_REDIRECT_URI` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn redirect_uri() -> String {
        env::var("FACEBOOK_REDIRECT_URI")
            .expect("FACEBOOK_REDIRECT_URI must be set")
    }

    /// Facebook 로그인 다이얼로그 엔드포인트 URI를 반환합니다.
    pub fn auth_uri() -> String {
        env::var("FACEBOOK_AUTH_URI")
            .unwrap_or_else(|_| "https://www.facebook.com/v19.0/dialog/oauth".to_string())
    }

    /// Facebook 토큰 교환 엔드포인트 URI를 반환합니다.
    pub fn token_uri() -> String {
        env::var("FACEBOOK_TOKEN_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/v19.0/oauth/access_token".to_string())
    }

    /// Facebook 사용자 정보 조회 엔드포인트 URI를 반환합니다.
    ///
    /// Graph API의 `/me` 엔드포인트이며, 호출 시 `fields` 매개변수로
    /// 필요한 필드(id, name, email)를 지정합니다.
    pub fn userinfo_uri() -> String {
        env::var("FACEBOOK_USERINFO_URI")
            .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string())
    }
}

/// 세션 쿠키 설정을 관리하는 구조체
///
/// 로그인 성공 시 발급되는 세션 토큰과 이를 담는 쿠키의 속성을 관리합니다.
/// Spring Session의 쿠키 설정과 유사한 역할을 수행합니다.
///
/// ## 세션 정책
///
/// - 세션 토큰에는 사용자 id만 담깁니다 (HMAC-SHA256 서명)
/// - 만료된 토큰은 없는 것으로 취급되어 익명 상태로 격하됩니다
/// - 쿠키는 HttpOnly이며 기본적으로 Secure 플래그가 설정됩니다
pub struct SessionConfig;

impl SessionConfig {
    /// 세션 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하지만,
    /// 프로덕션에서는 경고 로그가 출력됩니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("SESSION_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
                "session-secret-key".to_string()
            })
    }

    /// 세션 쿠키의 이름을 반환합니다.
    ///
    /// 기본값: `secrets_session`
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME")
            .unwrap_or_else(|_| "secrets_session".to_string())
    }

    /// 세션 최대 유효 시간을 초 단위로 반환합니다.
    ///
    /// 기본값은 관찰된 운영 설정과 동일한 60초입니다. 실사용에는 짧은
    /// 값이므로 배포 환경에서 `SESSION_MAX_AGE_SECS`로 재정의합니다.
    pub fn max_age_secs() -> i64 {
        env::var("SESSION_MAX_AGE_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60)
    }

    /// 세션 쿠키의 Secure 플래그 여부를 반환합니다.
    ///
    /// 기본값은 true이며, 프로덕션에서는 HTTPS가 필요합니다.
    /// 로컬 개발 시에만 `SESSION_COOKIE_SECURE=false`로 재정의합니다.
    pub fn cookie_secure() -> bool {
        env::var("SESSION_COOKIE_SECURE")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true)
    }
}

/// OAuth 일반 설정을 관리하는 구조체
///
/// 모든 OAuth 프로바이더에 공통으로 적용되는 보안 설정을 관리합니다.
/// CSRF 공격 방지를 위한 state 매개변수 생성에 사용됩니다.
pub struct OAuthConfig;

impl OAuthConfig {
    /// OAuth State 검증용 비밀키를 반환합니다.
    ///
    /// CSRF 공격 방지를 위한 state 매개변수 생성 및 검증에 사용됩니다.
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
                "oauth-state-secret".to_string()
            })
    }
}

/// 지원하는 인증 공급자를 나타내는 열거형
///
/// Spring Security의 OAuth2 Client Registration과 유사한 개념으로,
/// 계정이 어떤 경로로 생성되었는지를 나타냅니다. 계정은 정확히 하나의
/// 경로로만 생성되며, 같은 경로의 후속 로그인은 항상 동일한 레코드로
/// 해석됩니다.
///
/// ## 직렬화 지원
///
/// `serde`를 통해 JSON/BSON 직렬화를 지원하므로,
/// 세션 클레임과 데이터베이스 저장에 사용할 수 있습니다.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AuthProvider {
    /// 로컬 사용자명/패스워드 인증
    ///
    /// bcrypt를 사용한 패스워드 해싱을 지원합니다.
    Local,

    /// Google OAuth 2.0 인증
    ///
    /// Google 계정을 통한 소셜 로그인입니다.
    /// 프로바이더가 부여한 안정적인 사용자 id(`google_id`)로 계정을 식별합니다.
    Google,

    /// Facebook OAuth 인증
    ///
    /// Facebook 계정을 통한 소셜 로그인입니다.
    /// 프로바이더가 부여한 안정적인 사용자 id(`facebook_id`)로 계정을 식별합니다.
    Facebook,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다.
    ///
    /// # 인자
    ///
    /// * `s` - 인증 프로바이더 이름 (대소문자 무관)
    ///
    /// # 반환값
    ///
    /// * `Ok(AuthProvider)` - 유효한 프로바이더인 경우
    /// * `Err(String)` - 지원하지 않는 프로바이더인 경우
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "facebook" => Ok(AuthProvider::Facebook),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    /// AuthProvider를 문자열로 변환합니다.
    ///
    /// 로깅과 세션 클레임에 사용할 수 있는 소문자 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Facebook => "facebook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("facebook").unwrap(), AuthProvider::Facebook);

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Local").unwrap(), AuthProvider::Local);

        // 지원하지 않는 프로바이더 테스트
        assert!(AuthProvider::from_str("twitter").is_err());
        assert!(AuthProvider::from_str("github").is_err());
    }

    #[test]
    fn test_auth_provider_as_string() {
        assert_eq!(AuthProvider::Local.as_str(), "local");
        assert_eq!(AuthProvider::Google.as_str(), "google");
        assert_eq!(AuthProvider::Facebook.as_str(), "facebook");
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        // 문자열 → AuthProvider → 문자열 변환 테스트
        let providers = ["local", "google", "facebook"];

        for &provider_str in &providers {
            let provider = AuthProvider::from_str(provider_str).unwrap();
            assert_eq!(provider.as_str(), provider_str);
        }
    }

    #[test]
    fn test_auth_provider_serialization() {
        // JSON 직렬화/역직렬화 테스트
        let provider = AuthProvider::Facebook;
        let json = serde_json::to_string(&provider).unwrap();
        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, deserialized);
    }
}
