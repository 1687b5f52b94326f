//! 라우트 설정 모듈
//!
//! 서버 렌더링 페이지와 인증 플로우의 엔드포인트들을 기능별로
//! 그룹화하여 등록합니다. 헬스체크 엔드포인트를 포함합니다.
//!
//! # Route Table
//!
//! | Method/Path | 인증 | 동작 |
//! |---|---|---|
//! | GET `/` | 불필요 | 랜딩 페이지 |
//! | GET/POST `/register` | 불필요 | 회원가입 폼 / 처리 |
//! | GET/POST `/login` | 불필요 | 로그인 폼 / 처리 |
//! | GET `/auth/google`, `/auth/facebook` | 불필요 | 동의 화면으로 302 |
//! | GET `/auth/google/secrets`, `/auth/facebook/secrets` | 불필요 | OAuth 콜백 |
//! | GET `/secrets` | 불필요 | 모든 사용자의 시크릿 목록 (공개) |
//! | GET/POST `/submit` | 필요 | 시크릿 제출 폼 / 처리 |
//! | GET `/logout` | 불필요 | 세션 제거 후 홈으로 |
//! | GET `/health` | 불필요 | 서비스 상태 JSON |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_page_routes(cfg);
    configure_auth_routes(cfg);
    configure_submit_routes(cfg);
}

/// 페이지 라우트를 설정합니다
///
/// 모든 페이지는 익명 접근이 가능합니다. `/secrets`가 인증 없이
/// 모든 사용자의 시크릿을 노출하는 것은 의도된 제품 동작이므로
/// 인증 스코프 바깥에 등록합니다.
fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::pages::home)
        .service(handlers::pages::register_form)
        .service(handlers::pages::login_form)
        .service(handlers::pages::secrets_page);
}

/// 인증 관련 라우트를 설정합니다
///
/// 로컬 회원가입/로그인과 OAuth 플로우, 로그아웃을 등록합니다.
/// 모든 인증 라우트는 Public 접근이 가능합니다 (인증을 위한 엔드포인트이므로).
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::register)
        .service(handlers::auth::login)
        .service(handlers::auth::logout)
        // Google OAuth
        .service(handlers::auth::google_login)
        .service(handlers::auth::google_callback)
        // Facebook OAuth
        .service(handlers::auth::facebook_login)
        .service(handlers::auth::facebook_callback);
}

/// 시크릿 제출 라우트를 설정합니다
///
/// `/submit` 스코프 전체에 강제 인증 미들웨어를 적용합니다.
/// 익명 요청은 핸들러에 도달하기 전에 `/login`으로 리다이렉트됩니다.
fn configure_submit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submit")
            .wrap(AuthMiddleware::required())
            .service(handlers::pages::submit_form)
            .service(handlers::secrets::submit_secret)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "secrets_service",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "secrets_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    // 저장소 연결 없이 동작하는 경로들만 라우터 수준에서 검증합니다.
    // 저장소가 필요한 속성(중복 가입, find-or-create 멱등성, 시크릿 순서)은
    // 리포지토리의 유니크 인덱스와 $push 계약으로 보장됩니다.

    #[actix_web::test]
    async fn test_public_pages_render_without_session() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for path in ["/", "/register", "/login"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success(), "{} should render anonymously", path);
        }
    }

    #[actix_web::test]
    async fn test_health_check_returns_healthy() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_anonymous_submit_form_redirects_to_login() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/submit").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/login"
        );
    }

    #[actix_web::test]
    async fn test_anonymous_submit_post_redirects_to_login() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/submit")
            .set_form(&[("secret", "몰래 쓴 글")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/login"
        );
    }

    #[actix_web::test]
    async fn test_submit_with_garbage_session_cookie_redirects_to_login() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        // 위조된 토큰은 "세션 없음"으로 취급 (익명으로 fail-open)
        let req = test::TestRequest::get()
            .uri("/submit")
            .insert_header(("Cookie", "secrets_session=not.a.token"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/login"
        );
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie_and_redirects_home() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/logout").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap().to_str().unwrap(),
            "/"
        );

        // 만료된 빈 세션 쿠키가 내려와야 브라우저가 세션을 삭제함
        let set_cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("secrets_session="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
