//! 시크릿 제출 핸들러
//!
//! 인증된 사용자의 시크릿 제출을 처리합니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::AppError,
    domain::{AuthenticatedUser, SecretForm},
    handlers::redirect,
    services::secrets::secret_service::SecretService,
};

/// 시크릿 제출 핸들러
///
/// 현재 세션 사용자의 시크릿 목록에 제출된 텍스트를 추가합니다.
/// `/submit` 스코프의 강제 인증 미들웨어가 익명 요청을 미리 차단하므로
/// [`AuthenticatedUser`] 추출은 항상 성공합니다.
///
/// # Endpoint
/// `POST /submit`
#[post("")]
pub async fn submit_secret(
    user: AuthenticatedUser,
    payload: web::Form<SecretForm>,
) -> HttpResponse {
    // 유효성 검사
    if let Err(e) = payload.validate() {
        log::debug!("시크릿 입력값 검증 실패: {}", e);
        return redirect("/submit");
    }

    let secret_service = SecretService::instance();

    match secret_service.submit(&user.user_id, &payload.secret).await {
        Ok(_) => redirect("/secrets"),
        Err(AppError::NotFound(msg)) => {
            // 세션이 가리키는 사용자가 사라진 경우: 세션을 익명으로 취급
            log::warn!("시크릿 제출 실패 (사용자 소멸): {} - {}", user.user_id, msg);
            redirect("/login")
        }
        Err(e) => {
            log::error!("시크릿 제출 실패: {} - {}", user.user_id, e);
            redirect("/submit")
        }
    }
}
