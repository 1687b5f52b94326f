//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 로그아웃과 OAuth 2.0 인증 플로우를 처리하는
//! 핸들러 함수들입니다. 모든 예상 가능한 실패는 이 경계에서 복구됩니다:
//! 서버 측에 로그를 남기고 사용자는 안전한 이전 페이지로 리다이렉트되며,
//! 실패 원인의 세부 정보는 응답에 담기지 않습니다.
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 사용자명/패스워드 방식 (`POST /register`, `POST /login`)
//! - **Google OAuth**: `GET /auth/google` → `GET /auth/google/secrets`
//! - **Facebook OAuth**: `GET /auth/facebook` → `GET /auth/facebook/secrets`
use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::AppError,
    domain::{entities::users::user::User, LoginForm, OAuthCallbackQuery, RegisterForm},
    handlers::redirect,
    services::{
        auth::{FacebookAuthService, GoogleAuthService, SessionService},
        users::user_service::UserService,
    },
};

/// 로그인/가입 성공 공통 처리: 세션 확립 후 시크릿 페이지로 이동
///
/// 토큰 발급에 실패하면 세션 없이 로그인 페이지로 돌려보냅니다.
fn establish_session_and_redirect(user: &User) -> HttpResponse {
    let session_service = SessionService::instance();

    match session_service.issue(user) {
        Ok(token) => {
            let cookie = session_service.build_session_cookie(token);
            HttpResponse::Found()
                .append_header(("Location", "/secrets"))
                .cookie(cookie)
                .finish()
        }
        Err(e) => {
            log::error!("세션 토큰 발급 실패: {}", e);
            redirect("/login")
        }
    }
}

/// 회원가입 핸들러
///
/// 사용자명/비밀번호로 로컬 계정을 생성합니다. 성공 시 즉시 세션을
/// 확립하고 시크릿 페이지로 이동하며, 사용자명 중복을 포함한 모든
/// 실패는 가입 폼으로 돌려보냅니다.
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(payload: web::Form<RegisterForm>) -> HttpResponse {
    // 유효성 검사
    if let Err(e) = payload.validate() {
        log::debug!("회원가입 입력값 검증 실패: {}", e);
        return redirect("/register");
    }

    let user_service = UserService::instance();

    match user_service.register(&payload.username, &payload.password).await {
        Ok(user) => {
            log::info!("회원가입 성공: {}", payload.username);
            establish_session_and_redirect(&user)
        }
        Err(AppError::ConflictError(msg)) => {
            log::warn!("회원가입 실패 (중복): {} - {}", payload.username, msg);
            redirect("/register")
        }
        Err(e) => {
            log::error!("회원가입 실패: {} - {}", payload.username, e);
            redirect("/register")
        }
    }
}

/// 로컬 로그인 핸들러
///
/// 사용자명과 패스워드를 사용한 전통적인 로그인을 처리합니다.
/// 실패 사유는 로그에만 기록되고 사용자에게는 구분 없이
/// 로그인 폼으로의 리다이렉트만 보입니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(payload: web::Form<LoginForm>) -> HttpResponse {
    // 유효성 검사
    if let Err(e) = payload.validate() {
        log::debug!("로그인 입력값 검증 실패: {}", e);
        return redirect("/login");
    }

    let user_service = UserService::instance();

    match user_service.verify_password(&payload.username, &payload.password).await {
        Ok(user) => {
            log::info!("로컬 로그인 성공: {}", payload.username);
            establish_session_and_redirect(&user)
        }
        Err(e) => {
            log::warn!("로컬 로그인 실패: {} - {}", payload.username, e);
            redirect("/login")
        }
    }
}

/// 로그아웃 핸들러
///
/// 세션 쿠키를 제거하고 랜딩 페이지로 이동합니다.
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout() -> HttpResponse {
    let session_service = SessionService::instance();

    HttpResponse::Found()
        .append_header(("Location", "/"))
        .cookie(session_service.build_removal_cookie())
        .finish()
}

/// Google OAuth 로그인 시작 핸들러
///
/// 사용자를 Google 동의 화면으로 리다이렉트합니다 (scope: email profile).
///
/// # Endpoint
/// `GET /auth/google`
#[get("/auth/google")]
pub async fn google_login() -> HttpResponse {
    let google_service = GoogleAuthService::instance();

    match google_service.authorize_url() {
        Ok(url) => redirect(&url),
        Err(e) => {
            log::error!("Google 인증 URL 생성 실패: {}", e);
            redirect("/login")
        }
    }
}

/// Google OAuth 콜백 처리 핸들러
///
/// Google 인증 완료 후 리다이렉트되는 콜백을 처리합니다.
/// 성공 시 세션을 확립하고 시크릿 페이지로, 실패 시 로그인 페이지로
/// 이동합니다.
///
/// # Endpoint
/// `GET /auth/google/secrets?code={code}&state={state}`
#[get("/auth/google/secrets")]
pub async fn google_callback(query: web::Query<OAuthCallbackQuery>) -> HttpResponse {
    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Google OAuth 에러: {} - {}", error, error_msg);
        return redirect("/login");
    }

    // 유효성 검사
    if let Err(e) = query.validate() {
        log::warn!("Google OAuth 콜백 검증 실패: {}", e);
        return redirect("/login");
    }

    let google_service = GoogleAuthService::instance();

    match google_service.authenticate_with_code(&query.code, &query.state).await {
        Ok(user) => {
            log::info!("Google OAuth 로그인 성공: 사용자 ID {}", user.id_string().unwrap_or_default());
            establish_session_and_redirect(&user)
        }
        Err(e) => {
            log::warn!("Google OAuth 인증 실패: {}", e);
            redirect("/login")
        }
    }
}

/// Facebook OAuth 로그인 시작 핸들러
///
/// 사용자를 Facebook 로그인 다이얼로그로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /auth/facebook`
#[get("/auth/facebook")]
pub async fn facebook_login() -> HttpResponse {
    let facebook_service = FacebookAuthService::instance();

    match facebook_service.authorize_url() {
        Ok(url) => redirect(&url),
        Err(e) => {
            log::error!("Facebook 인증 URL 생성 실패: {}", e);
            redirect("/login")
        }
    }
}

/// Facebook OAuth 콜백 처리 핸들러
///
/// Google 플로우와 동일한 구조입니다.
///
/// # Endpoint
/// `GET /auth/facebook/secrets?code={code}&state={state}`
#[get("/auth/facebook/secrets")]
pub async fn facebook_callback(query: web::Query<OAuthCallbackQuery>) -> HttpResponse {
    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("Facebook OAuth 에러: {} - {}", error, error_msg);
        return redirect("/login");
    }

    // 유효성 검사
    if let Err(e) = query.validate() {
        log::warn!("Facebook OAuth 콜백 검증 실패: {}", e);
        return redirect("/login");
    }

    let facebook_service = FacebookAuthService::instance();

    match facebook_service.authenticate_with_code(&query.code, &query.state).await {
        Ok(user) => {
            log::info!("Facebook OAuth 로그인 성공: 사용자 ID {}", user.id_string().unwrap_or_default());
            establish_session_and_redirect(&user)
        }
        Err(e) => {
            log::warn!("Facebook OAuth 인증 실패: {}", e);
            redirect("/login")
        }
    }
}
