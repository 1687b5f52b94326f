//! Facebook OAuth 2.0 와이어 모델
//!
//! Facebook Graph API의 토큰 교환과 `/me` 프로필 응답 구조를 정의합니다.

use serde::Deserialize;

/// Facebook OAuth 토큰 응답
///
/// Graph API의 `/oauth/access_token` 엔드포인트가 반환하는 응답입니다.
#[derive(Debug, Deserialize)]
pub struct FacebookTokenResponse {
    /// Facebook 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (bearer)
    pub token_type: String,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: Option<i64>,
}

/// Facebook 사용자 프로필 정보
///
/// Graph API `/me?fields=id,name,email` 응답입니다.
/// `id`는 앱 범위에서 유일하고 안정적인 사용자 식별자로,
/// 계정 레코드의 조회 키(`facebook_id`)로 사용됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookUserInfo {
    /// Facebook 앱 범위 사용자 고유 식별자
    pub id: String,
    /// 사용자 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 사용자 이메일 주소 (권한 승인 시에만 제공)
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_deserializes_without_email() {
        // 이메일 권한을 거부한 사용자는 id와 name만 제공됨
        let json = r#"{"id": "10158000000000000", "name": "Test User"}"#;
        let info: FacebookUserInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.id, "10158000000000000");
        assert_eq!(info.name.as_deref(), Some("Test User"));
        assert!(info.email.is_none());
    }

    #[test]
    fn test_token_response_deserializes() {
        let json = r#"{
            "access_token": "EAAB...",
            "token_type": "bearer",
            "expires_in": 5183944
        }"#;
        let token: FacebookTokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(token.access_token, "EAAB...");
        assert_eq!(token.expires_in, Some(5183944));
    }
}
