//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행하며,
//! ActixWeb 프레임워크를 기반으로 구현되었습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - 페이지/리다이렉트 응답      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리 정책
//!
//! REST API와 달리 이 애플리케이션의 응답은 HTML 페이지 또는 302
//! 리다이렉트입니다. 핸들러는 예상 가능한 실패를 모두 요청 경계에서
//! 복구합니다: 원인을 로그에 남기고 사용자를 안전한 이전 페이지로
//! 돌려보내며, 실패 세부 정보는 응답에 노출하지 않습니다.
//!
//! ## 모듈 구성
//!
//! - **`pages`**: 서버 렌더링 페이지 (`GET /`, `/register`, `/login`, `/submit`, `/secrets`)
//! - **`auth`**: 인증 플로우 (`POST /register`, `POST /login`, `GET /logout`, OAuth)
//! - **`secrets`**: 시크릿 제출 (`POST /submit`)
//! - **`views`**: 페이지 HTML 빌더 (이스케이프 포함)

pub mod pages;
pub mod auth;
pub mod secrets;
pub mod views;

use actix_web::HttpResponse;

/// 302 리다이렉트 응답 생성
///
/// 이 애플리케이션의 핸들러들이 실패 복구와 플로우 전환에 공통으로
/// 사용하는 응답 형태입니다.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_sets_location_header() {
        let response = redirect("/login");

        assert_eq!(response.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            response.headers().get("Location").unwrap().to_str().unwrap(),
            "/login"
        );
    }
}
