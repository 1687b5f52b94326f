//! 페이지 렌더링 핸들러
//!
//! 서버 렌더링 HTML 페이지를 반환하는 GET 엔드포인트들입니다.
//! 폼 페이지들은 상태를 읽지 않으며, 시크릿 목록 페이지만 저장소를 조회합니다.

use actix_web::{get, http::header::ContentType, HttpResponse};
use crate::handlers::redirect;
use crate::handlers::views;
use crate::services::secrets::secret_service::SecretService;

/// 랜딩 페이지 핸들러
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::home_page())
}

/// 회원가입 폼 핸들러
///
/// # Endpoint
/// `GET /register`
#[get("/register")]
pub async fn register_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::register_page())
}

/// 로그인 폼 핸들러
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::login_page())
}

/// 시크릿 제출 폼 핸들러
///
/// `/submit` 스코프의 강제 인증 미들웨어 뒤에 위치하므로
/// 익명 요청은 이 핸들러에 도달하기 전에 `/login`으로 리다이렉트됩니다.
///
/// # Endpoint
/// `GET /submit`
#[get("")]
pub async fn submit_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::submit_page())
}

/// 공개 시크릿 목록 핸들러
///
/// 인증 여부와 무관하게 시크릿을 제출한 모든 사용자의 시크릿을
/// 나열합니다. 모두에게 공개되는 것은 의도된 제품 동작입니다.
/// 저장소 장애 시에는 세부 정보 노출 없이 홈으로 리다이렉트됩니다.
///
/// # Endpoint
/// `GET /secrets`
#[get("/secrets")]
pub async fn secrets_page() -> HttpResponse {
    let secret_service = SecretService::instance();

    match secret_service.list_users_with_secrets().await {
        Ok(users) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(views::secrets_page(&users)),
        Err(e) => {
            log::error!("시크릿 목록 조회 실패: {}", e);
            redirect("/")
        }
    }
}
