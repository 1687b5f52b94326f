//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기를 관리하는 핵심 비즈니스 로직을 구현합니다.
//! Spring Framework의 UserService와 UserDetailsService 패턴을 참고하여
//! 설계되었으며, 로컬 회원가입과 자격 증명 검증을 담당합니다.
//!
//! ## 보안 설계 원칙
//!
//! ### 1. 비밀번호 보안 (Password Security)
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **환경별 Cost**: 개발(4) vs 운영(12) 환경별 보안 강도
//! - **솔트 자동 생성**: 레인보우 테이블 공격 방지
//! - **평문 미저장**: 저장소에는 해시만 기록
//!
//! ### 2. 인증 보안 (Authentication Security)
//!
//! - **타이밍 균일화**: 사용자명이 존재하지 않아도 더미 해시 검증을
//!   수행하여 응답 시간으로 계정 존재 여부를 유추할 수 없도록 함
//! - **일반화된 실패 메시지**: 모든 실패 경로가 같은 문구를 반환
//! - **계정 상태 검증**: 비활성 계정 거부

use std::sync::Arc;
use bcrypt::hash;
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::AppError,
    domain::entities::users::user::User,
    repositories::users::user_repo::UserRepository,
};

/// 알 수 없는 사용자명에 대해서도 해시 검증 비용을 지불하기 위한 고정 해시.
/// 실제 어떤 비밀번호와도 일치할 필요가 없으며 형식만 유효하면 됩니다.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// 로그인 실패 시 공통으로 사용하는 메시지.
/// 사용자명 존재 여부가 메시지로 드러나지 않도록 모든 경로에서 동일합니다.
const GENERIC_LOGIN_FAILURE: &str = "사용자명 또는 비밀번호가 올바르지 않습니다";

/// 사용자 관리 비즈니스 로직 서비스
///
/// 로컬 계정의 회원가입과 자격 증명 검증을 담당합니다.
/// `#[service]` 매크로를 통해 자동으로 싱글톤으로 관리되며,
/// UserRepository가 자동으로 주입됩니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::services::users::user_service::UserService;
///
/// let user_service = UserService::instance();
///
/// // 회원가입
/// let user = user_service.register("alice", "password123").await?;
///
/// // 인증
/// let user = user_service.verify_password("alice", "password123").await?;
/// ```
#[service(name = "user")]
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    ///
    /// 자동 의존성 주입을 통해 UserRepository 싱글톤이 주입됩니다.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 로컬 사용자 계정 생성
    ///
    /// 사용자명과 평문 비밀번호를 받아 해싱 후 저장합니다.
    ///
    /// # 인자
    ///
    /// * `username` - 로그인 사용자명 (시스템 전체 unique)
    /// * `password` - 평문 비밀번호 (저장 전 bcrypt 해싱)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ValidationError)` - 빈 사용자명/비밀번호
    /// * `Err(AppError::ConflictError)` - 사용자명 중복 (기존 레코드는 변경되지 않음)
    /// * `Err(AppError::InternalError)` - 비밀번호 해싱 실패
    ///
    /// # 처리 과정
    ///
    /// 1. 입력값 정리 및 검증
    /// 2. bcrypt 해싱 (환경별 cost)
    /// 3. `User::new_local()` 엔티티 생성
    /// 4. 리포지토리 저장 (유니크 인덱스가 최종 중복 차단)
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = crate::utils::string_utils::validate_required_string(username, "사용자명")?;

        if password.is_empty() {
            return Err(AppError::ValidationError("비밀번호는 필수입니다".to_string()));
        }

        // 환경별 bcrypt cost 사용
        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        // 비밀번호 해싱
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        // 사용자 엔티티 생성 (로컬 인증)
        let user = User::new_local(username, password_hash);

        // 저장
        let created_user = self.user_repo.create(user).await?;

        log::info!("새 로컬 사용자 등록: {}", created_user.display_name());

        Ok(created_user)
    }

    /// 사용자명/비밀번호 자격 증명 검증
    ///
    /// 로그인 요청의 자격 증명을 검증하고 성공 시 사용자 엔티티를 반환합니다.
    ///
    /// # 인자
    ///
    /// * `username` - 로그인 사용자명
    /// * `password` - 평문 비밀번호
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자
    /// * `Err(AppError::AuthenticationError)` - 인증 실패 (모든 실패 경로 공통 메시지)
    ///
    /// # 타이밍 공격 방지
    ///
    /// 사용자명이 존재하지 않거나 OAuth 전용 계정이어서 비밀번호 해시가
    /// 없는 경우에도 고정 더미 해시에 대한 bcrypt 검증을 수행합니다.
    /// 존재하는 계정과 존재하지 않는 계정의 응답 시간 차이로
    /// 사용자명을 열거하는 공격을 차단하기 위한 조치입니다.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<User, AppError> {
        let start_time = std::time::Instant::now();

        let user = match self.user_repo.find_by_username(username).await? {
            Some(user) if user.can_authenticate_with_password() => user,
            _ => {
                // 사용자 없음 또는 OAuth 전용 계정: 더미 검증으로 시간 균일화
                let _ = bcrypt::verify(password, DUMMY_PASSWORD_HASH);
                log::warn!("로그인 실패 (계정 없음 또는 비밀번호 미설정): {}", username);
                return Err(AppError::AuthenticationError(GENERIC_LOGIN_FAILURE.to_string()));
            }
        };

        let password_hash = user.password_hash.as_deref().unwrap_or_default();

        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        log::debug!("Password verification took: {:?}", start_time.elapsed());

        if !is_valid {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", username);
            return Err(AppError::AuthenticationError(GENERIC_LOGIN_FAILURE.to_string()));
        }

        if !user.is_active {
            log::warn!("비활성화된 계정의 로그인 시도: {}", username);
            return Err(AppError::AuthenticationError(GENERIC_LOGIN_FAILURE.to_string()));
        }

        Ok(user)
    }

    /// ID로 사용자 조회
    ///
    /// 세션이 가리키는 사용자를 저장소에서 다시 조회합니다.
    /// 캐시 우선 조회는 리포지토리 계층에서 처리됩니다.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.user_repo.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_well_formed() {
        // 더미 해시가 유효한 bcrypt 형식이어야 실제 검증과 동일한
        // 비용이 지불됩니다
        let result = bcrypt::verify("any-password", DUMMY_PASSWORD_HASH);
        assert!(result.is_ok());
        assert!(!result.unwrap());
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hashed = hash("correct-horse", 4).unwrap();

        assert!(bcrypt::verify("correct-horse", &hashed).unwrap());
        assert!(!bcrypt::verify("wrong-horse", &hashed).unwrap());
    }
}
