//! # 시크릿 관리 서비스 구현
//!
//! 사용자가 제출한 시크릿의 저장과 공개 목록 조회를 담당하는
//! 비즈니스 로직을 구현합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::AppError,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
    utils::string_utils::validate_required_string,
};

/// 시크릿 관리 비즈니스 로직 서비스
///
/// 시크릿 제출과 공개 목록 조회를 담당합니다.
/// `#[service]` 매크로를 통해 싱글톤으로 관리되며,
/// UserRepository가 자동으로 주입됩니다.
///
/// ## 도메인 규칙
///
/// - 시크릿은 현재 세션 사용자의 레코드에만 추가됩니다
/// - 목록은 사용자 관점에서 append-only이며 제출 순서가 유지됩니다
/// - 공개 목록은 인증 여부와 무관하게 모든 사용자의 시크릿을 노출합니다
///   (의도된 제품 동작)
#[service(name = "secret")]
pub struct SecretService {
    /// 사용자 데이터 액세스 리포지토리
    ///
    /// 자동 의존성 주입을 통해 UserRepository 싱글톤이 주입됩니다.
    user_repo: Arc<UserRepository>,
}

impl SecretService {
    /// 현재 사용자의 시크릿 목록에 새 항목 제출
    ///
    /// # 인자
    ///
    /// * `user_id` - 세션에서 복원된 사용자 ID
    /// * `secret` - 제출된 시크릿 텍스트
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 갱신된 사용자 (추가된 시크릿 포함)
    /// * `Err(AppError::ValidationError)` - 빈 시크릿
    /// * `Err(AppError::NotFound)` - 세션이 가리키는 사용자가 더 이상 없음
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn submit(&self, user_id: &str, secret: &str) -> Result<User, AppError> {
        let secret = validate_required_string(secret, "시크릿")?;

        let updated = self.user_repo
            .push_secret(user_id, &secret)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!(
            "시크릿 제출: 사용자 ID {}, 누적 {}개",
            user_id,
            updated.secrets.len()
        );

        Ok(updated)
    }

    /// 시크릿을 제출한 모든 사용자 조회
    ///
    /// 공개 시크릿 목록 페이지가 사용합니다. 시크릿이 하나도 없는
    /// 사용자는 결과에 포함되지 않습니다.
    pub async fn list_users_with_secrets(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.find_with_secrets().await
    }
}
