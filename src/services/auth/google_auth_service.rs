//! # Google OAuth 2.0 인증 서비스
//!
//! Google OAuth 2.0 프로토콜을 통한 소셜 로그인 기능을 제공합니다.
//! RFC 6749 OAuth 2.0 Authorization Code Grant 플로우를 준수합니다.
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. GET /auth/google        → 동의 화면으로 302 (scope: email profile)
//! 2. 사용자가 Google에서 인증
//! 3. GET /auth/google/secrets?code=...&state=...
//! 4. state 검증 → code를 액세스 토큰으로 교환
//! 5. UserInfo API로 프로필 조회 → 안정적인 사용자 id 획득
//! 6. google_id 키로 find-or-create → 세션 발급
//! ```
//!
//! ## 계정 해석 정책
//!
//! 계정은 Google이 부여한 불변 사용자 id(`google_id`)로만 식별됩니다.
//! 같은 id의 두 번째 로그인은 항상 같은 레코드로 해석되며, 저장소의
//! 유니크 인덱스와 원자적 find-or-create가 중복 생성을 차단합니다.
//!
//! ## 보안 특징
//!
//! - **CSRF 방지**: state 매개변수 생성 및 콜백 검증
//! - **Code 즉시 교환**: Authorization Code의 짧은 수명 활용
//! - **에러 정보 제한**: 프로바이더 실패는 일반화된 에러로 전파

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::{AuthProvider, GoogleOAuthConfig, OAuthConfig},
    core::AppError,
    domain::entities::users::user::User,
    domain::models::oauth::{GoogleTokenResponse, GoogleUserInfo},
    repositories::users::user_repo::UserRepository,
};

/// Google OAuth 2.0 인증 서비스
///
/// 동의 화면 URL 생성부터 콜백 처리, 계정 해석까지
/// Google 소셜 로그인의 전체 플로우를 관리합니다.
///
/// ## 설정 의존성
///
/// ```bash
/// GOOGLE_CLIENT_ID=your-client-id.googleusercontent.com
/// GOOGLE_CLIENT_SECRET=your-client-secret
/// GOOGLE_REDIRECT_URI=https://yourapp.com/auth/google/secrets
/// OAUTH_STATE_SECRET=your-state-secret
/// ```
#[service]
pub struct GoogleAuthService {
    /// 사용자 리포지토리
    ///
    /// 인증 성공 후 프로바이더 id 기반 find-or-create를 담당합니다.
    user_repo: Arc<UserRepository>,
}

impl GoogleAuthService {
    /// Google 동의 화면으로 리다이렉트할 Authorization URL 생성
    ///
    /// OAuth 2.0 Authorization Code Grant 플로우의 첫 번째 단계입니다.
    /// 스코프는 email과 profile을 요청합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - state가 포함된 동의 화면 URL
    /// * `Err(AppError::InternalError)` - state 생성 실패
    pub fn authorize_url(&self) -> Result<String, AppError> {
        let state = self.generate_oauth_state()?;

        Ok(build_authorize_url(
            &GoogleOAuthConfig::auth_uri(),
            &GoogleOAuthConfig::client_id(),
            &GoogleOAuthConfig::redirect_uri(),
            "email profile",
            &state,
        ))
    }

    /// Authorization Code를 사용하여 사용자 인증 및 계정 해석
    ///
    /// Google OAuth 콜백에서 받은 Authorization Code를 처리하여
    /// 인증을 완료하고 로컬 계정을 찾거나 생성합니다.
    ///
    /// # 인자
    ///
    /// * `auth_code` - Google에서 발급한 Authorization Code
    /// * `state` - CSRF 방지용 state 매개변수
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 기존 또는 방금 생성된 사용자 엔티티
    /// * `Err(AppError::AuthenticationError)` - state 검증 실패, 프로필에 id 없음
    /// * `Err(AppError::ExternalServiceError)` - Google API 통신 오류
    ///
    /// # 처리 단계
    ///
    /// 1. **State 검증**: CSRF 공격 방지
    /// 2. **토큰 교환**: Authorization Code → Access Token
    /// 3. **프로필 조회**: UserInfo API에서 안정적인 사용자 id 획득
    /// 4. **계정 해석**: `google_id` 키 find-or-create (멱등)
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> Result<User, AppError> {
        // 1. State 검증
        self.verify_oauth_state(state)?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(auth_code).await?;

        // 3. 액세스 토큰으로 사용자 정보 조회
        let google_user = self.get_user_info(&token_response.access_token).await?;

        // 4. 프로필 무결성 확인: 안정적인 id가 없으면 계정을 만들 수 없음
        if google_user.id.trim().is_empty() {
            return Err(AppError::AuthenticationError(
                "Google 프로필에 사용자 id가 없습니다".to_string()
            ));
        }

        // 5. 프로바이더 id 기반 find-or-create
        let candidate = User::new_oauth(AuthProvider::Google, google_user.id.clone());
        let user = self.user_repo
            .find_or_create("google_id", &google_user.id, candidate)
            .await?;

        log::info!("Google 로그인 성공: google_id={}", google_user.id);

        Ok(user)
    }

    /// Authorization Code를 Access Token으로 교환
    ///
    /// OAuth 2.0 토큰 엔드포인트에 form-encoded POST 요청을 보냅니다.
    ///
    /// # 에러 처리
    ///
    /// | 에러 코드 | 설명 |
    /// |-----------|------|
    /// | `invalid_grant` | 코드 만료/사용됨 |
    /// | `invalid_client` | 클라이언트 설정 오류 |
    /// | `invalid_request` | 잘못된 요청 형식 |
    async fn exchange_code_for_token(&self, auth_code: &str) -> Result<GoogleTokenResponse, AppError> {
        let client = reqwest::Client::new();

        let params = [
            ("code", auth_code),
            ("client_id", &GoogleOAuthConfig::client_id()),
            ("client_secret", &GoogleOAuthConfig::client_secret()),
            ("redirect_uri", &GoogleOAuthConfig::redirect_uri()),
            ("grant_type", "authorization_code"),
        ];

        let response = client
            .post(&GoogleOAuthConfig::token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패: {}", error_text
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    /// Access Token으로 Google 사용자 정보 조회
    ///
    /// UserInfo API를 호출하여 인증된 사용자의 프로필 정보를 가져옵니다.
    async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(&GoogleOAuthConfig::userinfo_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패: {}", error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }

    /// OAuth State 매개변수 생성
    ///
    /// CSRF 공격을 방지하기 위한 임의의 state 값을 생성합니다.
    /// 타임스탬프와 시크릿을 결합한 해시를 사용합니다.
    fn generate_oauth_state(&self) -> Result<String, AppError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_secs();

        let state_data = format!("{}:{}", timestamp, OAuthConfig::state_secret());

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        state_data.hash(&mut hasher);

        Ok(format!("{:x}", hasher.finish()))
    }

    /// OAuth State 매개변수 검증
    ///
    /// 콜백에서 받은 state 값이 유효한지 검증하여 CSRF 공격을 방지합니다.
    /// TODO: state를 Redis에 임시 저장하고 만료/일회성을 검증하는 방식으로 강화
    fn verify_oauth_state(&self, state: &str) -> Result<(), AppError> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 OAuth state".to_string()));
        }

        Ok(())
    }
}

/// OAuth Authorization URL 구성
///
/// 쿼리 매개변수를 URL 인코딩하여 동의 화면 URL을 만듭니다.
fn build_authorize_url(
    auth_uri: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
    state: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("scope", scope),
        ("response_type", "code"),
        ("state", state),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", auth_uri, query_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_authorize_url_encodes_params() {
        let url = build_authorize_url(
            "https://accounts.google.com/o/oauth2/auth",
            "client-123",
            "https://example.com/auth/google/secrets",
            "email profile",
            "abc123",
        );

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fauth%2Fgoogle%2Fsecrets"));
        assert!(url.contains("scope=email%20profile"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=abc123"));
    }
}
