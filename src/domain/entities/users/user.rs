//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬 인증과 OAuth 인증을 모두 지원하는 통합된 사용자 모델과
//! 사용자가 제출한 시크릿 목록을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// 시스템의 유일한 영속 엔티티입니다. 계정은 로컬 회원가입,
/// Google 최초 로그인, Facebook 최초 로그인 중 정확히 하나의 경로로
/// 생성되며, 같은 경로의 후속 로그인은 유니크한 자격(사용자명 또는
/// 프로바이더 id)으로 기존 레코드를 찾아 재사용합니다.
///
/// `secrets`는 사용자 관점에서 append-only이며 계정 수명 동안 늘어나기만
/// 합니다. 이 시스템은 사용자 레코드를 삭제하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 사용자명 (로컬 계정 전용, 존재 시 unique)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// 해시된 비밀번호 (OAuth 사용자의 경우 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Google 프로바이더 사용자 ID (존재 시 unique)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    /// Facebook 프로바이더 사용자 ID (존재 시 unique)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,
    /// 계정 생성 경로
    pub auth_provider: AuthProvider,
    /// 사용자가 제출한 시크릿 목록 (제출 순서 유지)
    #[serde(default)]
    pub secrets: Vec<String>,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (사용자명/패스워드)
    ///
    /// 로컬 인증용 사용자를 생성합니다. 비밀번호는 호출 전에
    /// 해싱되어 있어야 하며 평문은 절대 저장되지 않습니다.
    pub fn new_local(username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: Some(username),
            password_hash: Some(password_hash),
            google_id: None,
            facebook_id: None,
            auth_provider: AuthProvider::Local,
            secrets: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 OAuth 사용자 생성
    ///
    /// OAuth 프로바이더를 통해 최초 로그인한 사용자를 생성합니다.
    /// 프로바이더가 부여한 안정적인 사용자 id가 해당 프로바이더 필드에
    /// 저장되어 이후 로그인의 조회 키가 됩니다.
    pub fn new_oauth(auth_provider: AuthProvider, provider_user_id: String) -> Self {
        let now = DateTime::now();

        let (google_id, facebook_id) = match auth_provider {
            AuthProvider::Google => (Some(provider_user_id), None),
            AuthProvider::Facebook => (None, Some(provider_user_id)),
            // 로컬 프로바이더로는 OAuth 사용자를 만들 수 없음
            AuthProvider::Local => (None, None),
        };

        Self {
            id: None,
            username: None,
            password_hash: None, // OAuth 사용자는 비밀번호 없음
            google_id,
            facebook_id,
            auth_provider,
            secrets: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 로컬 인증 사용자인지 확인
    pub fn is_local_auth(&self) -> bool {
        matches!(self.auth_provider, AuthProvider::Local)
    }

    /// OAuth 인증 사용자인지 확인
    pub fn is_oauth_auth(&self) -> bool {
        !self.is_local_auth()
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_local_auth() && self.password_hash.is_some()
    }

    /// OAuth 프로바이더에서의 사용자 ID 가져오기
    pub fn oauth_provider_id(&self) -> Option<&str> {
        self.google_id
            .as_deref()
            .or(self.facebook_id.as_deref())
    }

    /// 시크릿을 하나 이상 제출한 사용자인지 확인
    pub fn has_secrets(&self) -> bool {
        !self.secrets.is_empty()
    }

    /// 시크릿 목록 페이지에 표시할 작성자 이름
    ///
    /// OAuth 사용자는 사용자명이 없으므로 익명으로 표시됩니다.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("익명")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local("alice".to_string(), "$2b$04$hash".to_string());

        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.auth_provider, AuthProvider::Local);
        assert!(user.password_hash.is_some());
        assert!(user.google_id.is_none());
        assert!(user.facebook_id.is_none());
        assert!(user.secrets.is_empty());
        assert!(user.is_active);
        assert!(user.can_authenticate_with_password());
        assert!(!user.is_oauth_auth());
    }

    #[test]
    fn test_new_google_user() {
        let user = User::new_oauth(AuthProvider::Google, "1234567890".to_string());

        assert_eq!(user.google_id.as_deref(), Some("1234567890"));
        assert!(user.facebook_id.is_none());
        assert!(user.username.is_none());
        assert!(user.password_hash.is_none());
        assert!(user.is_oauth_auth());
        assert!(!user.can_authenticate_with_password());
        assert_eq!(user.oauth_provider_id(), Some("1234567890"));
    }

    #[test]
    fn test_new_facebook_user() {
        let user = User::new_oauth(AuthProvider::Facebook, "fb_998877".to_string());

        assert_eq!(user.facebook_id.as_deref(), Some("fb_998877"));
        assert!(user.google_id.is_none());
        assert_eq!(user.oauth_provider_id(), Some("fb_998877"));
    }

    #[test]
    fn test_display_name_falls_back_to_anonymous() {
        let local = User::new_local("bob".to_string(), "hash".to_string());
        let oauth = User::new_oauth(AuthProvider::Google, "42".to_string());

        assert_eq!(local.display_name(), "bob");
        assert_eq!(oauth.display_name(), "익명");
    }

    #[test]
    fn test_has_secrets() {
        let mut user = User::new_local("carol".to_string(), "hash".to_string());
        assert!(!user.has_secrets());

        user.secrets.push("첫 번째 시크릿".to_string());
        assert!(user.has_secrets());
    }

    #[test]
    fn test_bson_roundtrip_skips_absent_fields() {
        // OAuth 사용자 문서에는 username/password_hash 필드 자체가 없어야
        // sparse unique 인덱스가 올바르게 동작합니다
        let user = User::new_oauth(AuthProvider::Google, "g-1".to_string());
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert!(!doc.contains_key("username"));
        assert!(!doc.contains_key("password_hash"));
        assert!(!doc.contains_key("facebook_id"));
        assert!(doc.contains_key("google_id"));
        assert!(!doc.contains_key("_id"));
    }
}
