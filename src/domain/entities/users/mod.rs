//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//! 로컬 인증과 OAuth 인증을 모두 지원하는 User 엔티티를 포함합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//! use crate::config::AuthProvider;
//!
//! // 로컬 사용자 생성
//! let user = User::new_local("username".to_string(), hashed_password);
//!
//! // OAuth 사용자 생성
//! let oauth_user = User::new_oauth(AuthProvider::Google, "google_user_id_123".to_string());
//! ```

pub mod user;
