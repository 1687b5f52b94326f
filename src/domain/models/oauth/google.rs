//! Google OAuth 2.0 와이어 모델
//!
//! Google 토큰 엔드포인트와 UserInfo API의 응답 구조를 정의합니다.

use serde::Deserialize;

/// Google OAuth 토큰 응답
///
/// Authorization Code를 액세스 토큰으로 교환할 때 받는 응답입니다.
///
/// ```json
/// {
///   "access_token": "ya29.a0AfH6SMC...",
///   "expires_in": 3599,
///   "scope": "openid email profile",
///   "token_type": "Bearer"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    /// Google OAuth 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: i32,
    /// 리프레시 토큰 (선택사항)
    pub refresh_token: Option<String>,
    /// 부여된 권한 범위
    pub scope: String,
}

/// Google 사용자 프로필 정보
///
/// UserInfo API(`/oauth2/v2/userinfo`)가 반환하는 프로필입니다.
/// `id`는 Google 전체에서 유일하고 변경되지 않는 사용자 식별자로,
/// 계정 레코드의 조회 키(`google_id`)로 사용됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 사용자 고유 식별자 (불변)
    pub id: String,
    /// 사용자 이메일 주소
    #[serde(default)]
    pub email: Option<String>,
    /// 사용자 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 프로필 사진 URL
    #[serde(default)]
    pub picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_deserializes_minimal_profile() {
        // 스코프에 따라 id 외의 필드는 생략될 수 있음
        let json = r#"{"id": "123456789"}"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.id, "123456789");
        assert!(info.email.is_none());
        assert!(info.name.is_none());
    }

    #[test]
    fn test_token_response_deserializes() {
        let json = r#"{
            "access_token": "ya29.token",
            "token_type": "Bearer",
            "expires_in": 3599,
            "scope": "openid email profile"
        }"#;
        let token: GoogleTokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(token.access_token, "ya29.token");
        assert_eq!(token.token_type, "Bearer");
        assert!(token.refresh_token.is_none());
    }
}
