//! 인증 및 보안 서비스 모듈
//!
//! 세션 토큰 기반 인증과 OAuth 2.0 소셜 로그인을 담당하는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - 세션 토큰 발급/검증 및 세션 쿠키 관리
//! - Google OAuth 2.0 소셜 로그인
//! - Facebook OAuth 2.0 소셜 로그인
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - CSRF 방지 (OAuth State 매개변수)
//! - 세션 만료 시간 관리 (기본 60초, 설정으로 재정의)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{SessionService, GoogleAuthService};
//!
//! // 세션 토큰 발급
//! let session_service = SessionService::instance();
//! let token = session_service.issue(&user)?;
//!
//! // Google OAuth 인증
//! let google_auth = GoogleAuthService::instance();
//! let url = google_auth.authorize_url()?;
//! ```

pub mod session_service;
pub mod google_auth_service;
pub mod facebook_auth_service;

pub use session_service::*;
pub use google_auth_service::*;
pub use facebook_auth_service::*;
