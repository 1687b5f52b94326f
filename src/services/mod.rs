//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//! 도메인별로 모듈화되어 사용자 관리, 인증, 시크릿 기능을 담당합니다.
//!
//! # Features
//!
//! - 로컬 회원가입 및 자격 증명 검증
//! - 세션 토큰 기반 인증 시스템
//! - OAuth 2.0 소셜 로그인 (Google, Facebook)
//! - 시크릿 제출 및 공개 목록 조회
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::user_service::UserService, auth::SessionService};
//!
//! let user_service = UserService::instance();
//! let session_service = SessionService::instance();
//! ```

pub mod users;
pub mod auth;
pub mod secrets;
