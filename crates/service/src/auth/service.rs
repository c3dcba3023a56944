use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{info, debug, warn, instrument};
use uuid::Uuid;

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession, NewUser};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::profile_picture::ProfilePictureProvider;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    pictures: Arc<dyn ProfilePictureProvider>,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, pictures: Arc<dyn ProfilePictureProvider>) -> Self { Self { repo, pictures } }

    /// Register a new user with a hashed password and a random profile picture.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, domain::RegisterInput};
    /// use service::mock::MockStore;
    /// use service::profile_picture::NoPictures;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockStore::default()), Arc::new(NoPictures));
    /// let input = RegisterInput { username: "ada".into(), name: "Ada".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.username, "ada");
    /// assert_eq!(session.token, session.user.id.to_string());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        models::user::validate_username(&input.username)?;
        models::user::validate_name(&input.name)?;
        if input.password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        if let Some(existing) = self.repo.find_credentials_by_username(input.username.trim()).await? {
            debug!("user exists: {}", existing.user.username);
            return Err(AuthError::Conflict);
        }

        // 头像获取失败不影响注册
        let profile_picture = match self.pictures.fetch().await {
            Ok(url) => url,
            Err(e) => {
                warn!(err = %e, "profile picture lookup failed");
                None
            }
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.create_user(NewUser {
            id: Uuid::new_v4(),
            username: input.username.trim().to_string(),
            name: input.name.trim().to_string(),
            password_hash,
            profile_picture,
        }).await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(AuthSession::for_user(user))
    }

    /// Check a username/password pair.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, domain::{RegisterInput, LoginInput}};
    /// use service::mock::MockStore;
    /// use service::profile_picture::NoPictures;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockStore::default()), Arc::new(NoPictures));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u1".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u1".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "u1");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let cred = self.repo
            .find_credentials_by_username(input.username.trim())
            .await?
            .ok_or(AuthError::InvalidUsername)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            debug!(user_id = %cred.user.id, "password mismatch");
            return Err(AuthError::InvalidPassword);
        }

        info!(user_id = %cred.user.id, "user_logged_in");
        Ok(AuthSession::for_user(cred.user))
    }

    /// Resolve the `Authorization` header to a user.
    ///
    /// Accepts the bare token or `Bearer <token>`.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<AuthUser, AuthError> {
        let raw = header.map(str::trim).unwrap_or_default();
        let token = raw.strip_prefix("Bearer ").map(str::trim).unwrap_or(raw);
        if token.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        let id = Uuid::parse_str(token).map_err(|_| AuthError::Unauthorized)?;
        self.repo.find_user_by_id(id).await?.ok_or(AuthError::Unauthorized)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.find_user_by_id(id).await?.ok_or(AuthError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStore;
    use crate::profile_picture::{FixedPicture, PictureError};

    struct BrokenPictures;

    #[async_trait::async_trait]
    impl ProfilePictureProvider for BrokenPictures {
        async fn fetch(&self) -> Result<Option<String>, PictureError> {
            Err(PictureError::Empty)
        }
    }

    fn svc(pictures: Arc<dyn ProfilePictureProvider>) -> AuthService<MockStore> {
        AuthService::new(Arc::new(MockStore::default()), pictures)
    }

    fn register_input(username: &str, password: &str) -> RegisterInput {
        RegisterInput { username: username.into(), name: "Some One".into(), password: password.into() }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = svc(Arc::new(FixedPicture("https://pics/1.jpg".into())));
        let created = svc.register(register_input("grace", "hopper")).await.unwrap();
        assert_eq!(created.user.profile_picture.as_deref(), Some("https://pics/1.jpg"));

        let session = svc.login(LoginInput { username: "grace".into(), password: "hopper".into() }).await.unwrap();
        assert_eq!(session.user.id, created.user.id);
        assert_eq!(session.token, created.token);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = svc(Arc::new(FixedPicture("p".into())));
        svc.register(register_input("dup", "pw")).await.unwrap();
        let err = svc.register(register_input("dup", "other")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn picture_failure_leaves_picture_empty() {
        let svc = svc(Arc::new(BrokenPictures));
        let session = svc.register(register_input("nopic", "pw")).await.unwrap();
        assert_eq!(session.user.profile_picture, None);
    }

    #[tokio::test]
    async fn register_validates_input() {
        let svc = svc(Arc::new(FixedPicture("p".into())));
        assert!(matches!(svc.register(register_input("", "pw")).await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.register(register_input("ok", "")).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn login_requires_exact_password() {
        let svc = svc(Arc::new(FixedPicture("p".into())));
        svc.register(register_input("eve", "mmm")).await.unwrap();

        let unknown = svc.login(LoginInput { username: "nobody".into(), password: "mmm".into() }).await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidUsername));

        // 字典序更大的密码也必须被拒绝
        let bigger = svc.login(LoginInput { username: "eve".into(), password: "zzz".into() }).await.unwrap_err();
        assert!(matches!(bigger, AuthError::InvalidPassword));
        let smaller = svc.login(LoginInput { username: "eve".into(), password: "aaa".into() }).await.unwrap_err();
        assert!(matches!(smaller, AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn authenticate_accepts_raw_and_bearer_tokens() {
        let svc = svc(Arc::new(FixedPicture("p".into())));
        let session = svc.register(register_input("tok", "pw")).await.unwrap();

        let raw = svc.authenticate(Some(&session.token)).await.unwrap();
        assert_eq!(raw.id, session.user.id);
        let bearer = svc.authenticate(Some(&format!("Bearer {}", session.token))).await.unwrap();
        assert_eq!(bearer.id, session.user.id);

        for bad in [None, Some(""), Some("not-a-uuid"), Some("Bearer ")] {
            assert!(matches!(svc.authenticate(bad).await, Err(AuthError::Unauthorized)));
        }
        let stranger = Uuid::new_v4().to_string();
        assert!(matches!(svc.authenticate(Some(&stranger)).await, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn get_user_reports_missing() {
        let svc = svc(Arc::new(FixedPicture("p".into())));
        assert!(matches!(svc.get_user(Uuid::new_v4()).await, Err(AuthError::NotFound)));
    }
}
