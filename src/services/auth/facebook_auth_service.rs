//! # Facebook OAuth 2.0 인증 서비스
//!
//! Facebook 로그인 다이얼로그를 통한 소셜 로그인 기능을 제공합니다.
//! Google 플로우와 동일한 Authorization Code Grant 구조이며,
//! 토큰 교환과 프로필 조회만 Graph API 형식을 따릅니다.
//!
//! ## 계정 해석 정책
//!
//! 계정은 Facebook이 부여한 앱 범위 사용자 id(`facebook_id`)로만
//! 식별됩니다. 같은 id의 재로그인은 항상 같은 레코드로 해석됩니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    config::{AuthProvider, FacebookOAuthConfig, OAuthConfig},
    core::AppError,
    domain::entities::users::user::User,
    domain::models::oauth::{FacebookTokenResponse, FacebookUserInfo},
    repositories::users::user_repo::UserRepository,
};

/// Facebook OAuth 2.0 인증 서비스
///
/// 로그인 다이얼로그 URL 생성부터 콜백 처리, 계정 해석까지
/// Facebook 소셜 로그인의 전체 플로우를 관리합니다.
///
/// ## 설정 의존성
///
/// ```bash
/// FACEBOOK_CLIENT_ID=your-app-id
/// FACEBOOK_CLIENT_SECRET=your-app-secret
/// FACEBOOK_REDIRECT_URI=https://yourapp.com/auth/facebook/secrets
/// OAUTH_STATE_SECRET=your-state-secret
/// ```
#[service]
pub struct FacebookAuthService {
    /// 사용자 리포지토리
    ///
    /// 인증 성공 후 프로바이더 id 기반 find-or-create를 담당합니다.
    user_repo: Arc<UserRepository>,
}

impl FacebookAuthService {
    /// Facebook 로그인 다이얼로그로 리다이렉트할 Authorization URL 생성
    ///
    /// # 반환값
    ///
    /// * `Ok(String)` - state가 포함된 로그인 다이얼로그 URL
    /// * `Err(AppError::InternalError)` - state 생성 실패
    pub fn authorize_url(&self) -> Result<String, AppError> {
        let state = self.generate_oauth_state()?;

        Ok(build_authorize_url(
            &FacebookOAuthConfig::auth_uri(),
            &FacebookOAuthConfig::client_id(),
            &FacebookOAuthConfig::redirect_uri(),
            &state,
        ))
    }

    /// Authorization Code를 사용하여 사용자 인증 및 계정 해석
    ///
    /// # 인자
    ///
    /// * `auth_code` - Facebook에서 발급한 Authorization Code
    /// * `state` - CSRF 방지용 state 매개변수
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 기존 또는 방금 생성된 사용자 엔티티
    /// * `Err(AppError::AuthenticationError)` - state 검증 실패, 프로필에 id 없음
    /// * `Err(AppError::ExternalServiceError)` - Graph API 통신 오류
    pub async fn authenticate_with_code(&self, auth_code: &str, state: &str) -> Result<User, AppError> {
        // 1. State 검증
        self.verify_oauth_state(state)?;

        // 2. Authorization code로 액세스 토큰 교환
        let token_response = self.exchange_code_for_token(auth_code).await?;

        // 3. 액세스 토큰으로 사용자 정보 조회
        let facebook_user = self.get_user_info(&token_response.access_token).await?;

        // 4. 프로필 무결성 확인
        if facebook_user.id.trim().is_empty() {
            return Err(AppError::AuthenticationError(
                "Facebook 프로필에 사용자 id가 없습니다".to_string()
            ));
        }

        // 5. 프로바이더 id 기반 find-or-create
        let candidate = User::new_oauth(AuthProvider::Facebook, facebook_user.id.clone());
        let user = self.user_repo
            .find_or_create("facebook_id", &facebook_user.id, candidate)
            .await?;

        log::info!("Facebook 로그인 성공: facebook_id={}", facebook_user.id);

        Ok(user)
    }

    /// Authorization Code를 Access Token으로 교환
    ///
    /// Graph API의 토큰 엔드포인트는 쿼리 매개변수 기반 GET 요청을 받습니다.
    async fn exchange_code_for_token(&self, auth_code: &str) -> Result<FacebookTokenResponse, AppError> {
        let client = reqwest::Client::new();

        let params = [
            ("code", auth_code),
            ("client_id", &FacebookOAuthConfig::client_id()),
            ("client_secret", &FacebookOAuthConfig::client_secret()),
            ("redirect_uri", &FacebookOAuthConfig::redirect_uri()),
        ];

        let response = client
            .get(&FacebookOAuthConfig::token_uri())
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 토큰 교환 실패: {}", error_text
            )));
        }

        response
            .json::<FacebookTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 토큰 응답 파싱 실패: {}", e)))
    }

    /// Access Token으로 Facebook 사용자 정보 조회
    ///
    /// Graph API `/me` 엔드포인트에서 id, name, email 필드를 조회합니다.
    async fn get_user_info(&self, access_token: &str) -> Result<FacebookUserInfo, AppError> {
        let client = reqwest::Client::new();

        let response = client
            .get(&FacebookOAuthConfig::userinfo_uri())
            .query(&[("fields", "id,name,email")])
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Facebook 사용자 정보 조회 실패: {}", error_text
            )));
        }

        response
            .json::<FacebookUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 사용자 정보 파싱 실패: {}", e)))
    }

    /// OAuth State 매개변수 생성
    ///
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
    fn verify_oauth_state(&self, state: &str) -> Result<(), AppError> {
        if state.is_empty() {
            return Err(AppError::AuthenticationError("유효하지 않은 OAuth state".to_string()));
        }

        Ok(())
    }
}

/// Facebook 로그인 다이얼로그 URL 구성
///
/// Facebook은 기본 공개 프로필 스코프를 사용하므로 scope 매개변수를
/// 명시하지 않습니다.
fn build_authorize_url(
    auth_uri: &str,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
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
            "https://www.facebook.com/v19.0/dialog/oauth",
            "app-456",
            "https://example.com/auth/facebook/secrets",
            "state789",
        );

        assert!(url.starts_with("https://www.facebook.com/v19.0/dialog/oauth?"));
        assert!(url.contains("client_id=app-456"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fauth%2Ffacebook%2Fsecrets"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=state789"));
    }
}
