//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::core::AppError;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser};
use crate::repositories::users::user_repo::UserRepository;
use crate::services::auth::{extract_session_token, SessionService};
use crate::config::SessionConfig;

/// 실제 세션 복원 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            // 세션 쿠키에서 사용자 복원 시도
            let auth_result = restore_user_from_request(&req).await;

            match (&mode, auth_result) {
                // Required 모드에서 복원 실패: 로그인 페이지로 리다이렉트
                (AuthMode::Required, Err(err)) => {
                    log::debug!("세션 복원 실패, 로그인 페이지로 이동: {}", err);
                    let response = HttpResponse::Found()
                        .append_header(("Location", "/login"))
                        .finish();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                },
                // Required 모드에서 복원 성공
                (AuthMode::Required, Ok(user)) => {
                    req.extensions_mut().insert(user.clone());
                    log::debug!("세션 복원 성공: 사용자 ID {}", user.user_id);
                },
                // Optional 모드에서 복원 성공
                (AuthMode::Optional, Ok(user)) => {
                    req.extensions_mut().insert(user.clone());
                    log::debug!("선택적 세션 복원 성공: 사용자 ID {}", user.user_id);
                },
                // Optional 모드에서 복원 실패: 익명으로 진행 (로그아웃 상태로 fail-open)
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 세션 복원: 세션 없음, 익명으로 진행");
                },
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 세션 쿠키에서 사용자를 복원
///
/// 쿠키 추출 → 토큰 검증 → 저장소 재조회 순서로 진행합니다.
/// 토큰이 유효해도 사용자가 저장소에 더 이상 없으면 실패로 처리되어
/// 오래된 신원으로 인증되는 일이 없습니다.
async fn restore_user_from_request(
    req: &ServiceRequest,
) -> Result<AuthenticatedUser, AppError> {
    // 세션 쿠키 추출
    let cookie_name = SessionConfig::cookie_name();
    let token = extract_session_token(req.headers(), &cookie_name)
        .ok_or_else(|| AppError::AuthenticationError("세션 쿠키가 없습니다".to_string()))?;

    // 토큰 검증 및 클레임 추출
    let session_service = SessionService::instance();
    let claims = session_service.verify(&token)?;

    // 세션이 가리키는 사용자를 저장소에서 재조회
    let user_repo = UserRepository::instance();
    let user = user_repo
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("세션 사용자가 존재하지 않습니다".to_string()))?;

    if !user.is_active {
        return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
    }

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        auth_provider: user.auth_provider,
    })
}
