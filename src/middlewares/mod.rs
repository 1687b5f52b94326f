//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//! Spring Boot의 Filter/Interceptor와 유사한 역할을 수행합니다.
//!
//! # 제공 미들웨어
//!
//! ### 세션 인증 미들웨어 (AuthMiddleware)
//! - 세션 쿠키에서 토큰 추출 및 검증
//! - 저장소 재조회를 통한 사용자 존재 확인
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드 지원 (강제 모드는 `/login` 리다이렉트)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     // 모든 라우트에서 세션 복원 (익명 허용)
//!     .wrap(AuthMiddleware::optional())
//!     .service(
//!         web::scope("/submit")
//!             // 보호된 라우트: 익명이면 /login으로 리다이렉트
//!             .wrap(AuthMiddleware::required())
//!             .service(submit_form)
//!     )
//! ```

pub mod auth_middleware;
pub mod auth_inner;

pub use auth_middleware::AuthMiddleware;
