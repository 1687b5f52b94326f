//! # Configuration Module
//!
//! 시크릿 서비스의 설정 관리를 담당하는 모듈입니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행하며,
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경 관련 설정
//! - [`auth_config`] - OAuth, 세션 쿠키 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! Spring Profile과 유사한 방식으로 동작합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 필수 시크릿 누락 시 서버 기동 전에 패닉 (조용한 기능 저하 금지)
//! - 기본값은 개발 환경에서만 안전
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 세션 설정
//! export SESSION_SECRET="your-session-signing-key"
//! export SESSION_MAX_AGE_SECS="60"
//!
//! # OAuth 프로바이더
//! export GOOGLE_CLIENT_ID="your-client-id"
//! export GOOGLE_CLIENT_SECRET="your-client-secret"
//! export GOOGLE_REDIRECT_URI="https://yourdomain.com/auth/google/secrets"
//! export FACEBOOK_CLIENT_ID="your-app-id"
//! export FACEBOOK_CLIENT_SECRET="your-app-secret"
//! export FACEBOOK_REDIRECT_URI="https://yourdomain.com/auth/facebook/secrets"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

/// 필수 설정값을 서버 기동 전에 검증합니다.
///
/// OAuth 클라이언트 id/secret 쌍과 리디렉션 URI처럼 없으면 인증 기능이
/// 조용히 망가지는 값들을 미리 읽어 확인합니다. 각 getter는 누락 시
/// `expect`로 패닉을 발생시키므로, 이 함수가 반환되면 필수 설정이
/// 모두 존재한다는 것이 보장됩니다.
///
/// # Panics
///
/// 필수 환경 변수 중 하나라도 설정되지 않은 경우
pub fn validate_required_config() {
    let _ = GoogleOAuthConfig::client_id();
    let _ = GoogleOAuthConfig::client_secret();
    let _ = GoogleOAuthConfig::redirect_uri();
    let _ = FacebookOAuthConfig::client_id();
    let _ = FacebookOAuthConfig::client_secret();
    let _ = FacebookOAuthConfig::redirect_uri();

    // 세션/State 시크릿은 개발 기본값이 있지만, 미설정 시 경고가 출력됩니다
    let _ = SessionConfig::secret();
    let _ = OAuthConfig::state_secret();

    log::info!("✅ 필수 인증 설정 검증 완료");
}
