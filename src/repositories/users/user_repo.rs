//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 유니크 제약 조건 및 인덱스 관리
//! - **원자적 find-or-create**: 동시 로그인 경쟁에서도 프로바이더 id당
//!   최대 하나의 레코드만 생성

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{bson::{doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    core::registry::Repository,
    core::{AppError, ErrorContext},
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 엔티티의 모든 저장소 연산을 담당하며,
/// MongoDB 컬렉션과 Redis 캐시를 통합하여 제공합니다.
///
/// ## 캐싱 전략
///
/// ### L1 Cache (Redis)
/// - **TTL**: 10분 (600초)
/// - **키 패턴**: 개별 사용자 `user:{user_id}`
///
/// ### L2 Storage (MongoDB)
/// - **컬렉션명**: `users`
/// - **인덱스**: username(unique, sparse), google_id(unique, sparse),
///   facebook_id(unique, sparse), created_at(desc)
///
/// ## 무결성 보장
///
/// 계정 정체성(사용자명, 프로바이더 id)당 최대 하나의 레코드 불변식은
/// 이 계층에서만 보장됩니다:
///
/// 1. 저장소의 sparse unique 인덱스
/// 2. upsert 기반의 원자적 [`find_or_create`](UserRepository::find_or_create)
/// 3. 인덱스 충돌 시 create-or-fetch 재시도
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    ///
    /// 자동 주입되는 Redis 클라이언트입니다.
    /// 세션 복원 시 반복되는 id 조회의 성능을 보조합니다.
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// ID로 사용자 조회
    ///
    /// 세션 복원 경로에서 요청마다 호출되는 가장 빈번한 조회이므로
    /// 캐시 우선 조회를 적용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:{id}`
    /// - **TTL**: 600초 (10분)
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    /// 로그인 검증 경로에서 사용되며 캐싱하지 않습니다.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 프로바이더 id로 사용자를 찾고, 없으면 원자적으로 생성
    ///
    /// OAuth 최초 로그인과 재로그인을 하나의 연산으로 처리합니다.
    /// MongoDB의 `findOneAndUpdate` + `$setOnInsert` + `upsert` 조합으로
    /// 동시에 동일한 호출이 들어와도 레코드가 중복 생성되지 않습니다.
    ///
    /// # 인자
    ///
    /// * `provider_field` - 조회 키 필드명 (`"google_id"` 또는 `"facebook_id"`)
    /// * `provider_id` - 프로바이더가 부여한 사용자 id
    /// * `new_user` - 레코드가 없을 때 삽입할 사용자 엔티티
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 기존 레코드 또는 방금 생성된 레코드 (id 포함)
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    ///
    /// # 동시성
    ///
    /// upsert 경쟁에서 한쪽이 유니크 인덱스 충돌(E11000)로 실패할 수
    /// 있습니다. 이 경우 상대편이 이미 레코드를 만들었다는 뜻이므로
    /// 일반 조회로 한 번 재시도합니다 (create-or-fetch).
    pub async fn find_or_create(
        &self,
        provider_field: &str,
        provider_id: &str,
        new_user: User,
    ) -> Result<User, AppError> {
        let insert_doc = mongodb::bson::to_document(&new_user)
            .context("사용자 문서 직렬화 실패")?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let result = self.collection::<User>()
            .find_one_and_update(
                doc! { provider_field: provider_id },
                doc! { "$setOnInsert": insert_doc },
            )
            .with_options(options)
            .await;

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::DatabaseError(
                "upsert 결과 문서가 반환되지 않았습니다".to_string()
            )),
            Err(e) if e.to_string().contains("E11000") => {
                // 동시 upsert 경쟁에서 패배한 쪽: 상대가 만든 레코드를 조회
                log::debug!("find_or_create 인덱스 충돌, 재조회: {}={}", provider_field, provider_id);
                self.collection::<User>()
                    .find_one(doc! { provider_field: provider_id })
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?
                    .ok_or_else(|| AppError::DatabaseError(
                        "인덱스 충돌 후 재조회에 실패했습니다".to_string()
                    ))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    /// 새 사용자 생성
    ///
    /// 로컬 회원가입 경로에서 사용됩니다. 사용자명 중복을 사전에 검증하고,
    /// 경쟁 상황에서 사전 검증을 통과하더라도 유니크 인덱스가 최종
    /// 중복을 차단합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if let Some(ref username) = user.username {
            if self.find_by_username(username).await?.is_some() {
                return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
            }
        }

        // DB에 저장 (인덱스 충돌은 사전 검증을 뚫은 경쟁 생성)
        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if e.to_string().contains("E11000") {
                    AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 사용자의 시크릿 목록에 항목 추가
    ///
    /// MongoDB `$push` 연산자로 `secrets` 배열 끝에 원자적으로 추가하므로
    /// 제출 순서가 유지됩니다. 수정 시간도 함께 갱신합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 갱신된 사용자 (추가된 시크릿 포함)
    /// * `Ok(None)` - 해당 ID의 사용자가 존재하지 않음
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn push_secret(&self, id: &str, secret: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! {
                    "$push": { "secrets": secret },
                    "$set": { "updated_at": mongodb::bson::DateTime::now() },
                },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        if updated_user.is_some() {
            let _ = self.invalidate_cache(id).await;
        }

        Ok(updated_user)
    }

    /// 시크릿을 하나 이상 제출한 모든 사용자 조회
    ///
    /// 공개 시크릿 목록 페이지에서 사용됩니다. 인증 여부와 무관하게
    /// 모든 사용자의 시크릿이 노출되는 것은 의도된 제품 동작입니다.
    pub async fn find_with_secrets(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection::<User>()
            .find(doc! { "secrets.0": { "$exists": true } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect::<Vec<User>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    /// 정체성 필드들은 선택적이므로 sparse unique 인덱스를 사용하여
    /// 필드가 없는 문서는 제약에서 제외합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `username` - UNIQUE, SPARSE (로컬 계정 로그인 식별자)
    /// 2. `google_id` - UNIQUE, SPARSE (Google 계정 조회 키)
    /// 3. `facebook_id` - UNIQUE, SPARSE (Facebook 계정 조회 키)
    /// 4. `created_at` - 내림차순 일반 인덱스
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // Google 프로바이더 id 유니크 인덱스
        let google_id_index = IndexModel::builder()
            .keys(doc! { "google_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("google_id_unique".to_string())
                .build())
            .build();

        // Facebook 프로바이더 id 유니크 인덱스
        let facebook_id_index = IndexModel::builder()
            .keys(doc! { "facebook_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("facebook_id_unique".to_string())
                .build())
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([username_index, google_id_index, facebook_id_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
