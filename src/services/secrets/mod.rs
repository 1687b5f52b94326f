//! 시크릿 관리 서비스 모듈
//!
//! 사용자가 제출한 시크릿의 저장과 공개 목록 조회를 담당하는
//! 서비스를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::secrets::secret_service::SecretService;
//!
//! let secret_service = SecretService::instance();
//! secret_service.submit(&user_id, "나만 아는 이야기").await?;
//! ```

pub mod secret_service;

pub use secret_service::*;
