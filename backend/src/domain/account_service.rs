//! Signup and login implementing [`AccountService`].
//!
//! Signup writes the profile first and the credential second; when the
//! credential write fails the profile is removed again so no account exists
//! without a password. Login never reveals whether the e-mail or the
//! password was wrong.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info};

use crate::domain::directory_service::map_profile_error;
use crate::domain::ports::{
    AccountService, CredentialStore, CredentialStoreError, PasswordHasher, ProfileRepository,
};
use crate::domain::{
    LoginCredentials, Rating, Role, SignupRequest, StoreError, SwapError, UserId, UserProfile,
};

/// Experience line shown for members who did not describe themselves.
pub const DEFAULT_EXPERIENCE: &str = "New to platform";

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_credential_error(error: CredentialStoreError) -> SwapError {
    SwapError::Store(StoreError::from(error))
}

#[derive(Clone)]
pub struct AccountServiceImpl<P, C, H> {
    profiles: Arc<P>,
    credentials: Arc<C>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<P, C, H> AccountServiceImpl<P, C, H> {
    pub fn new(profiles: Arc<P>, credentials: Arc<C>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            credentials,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<P, C, H> AccountService for AccountServiceImpl<P, C, H>
where
    P: ProfileRepository,
    C: CredentialStore,
    H: PasswordHasher,
{
    async fn signup(&self, request: SignupRequest) -> Result<UserProfile, SwapError> {
        let SignupRequest {
            name,
            email,
            password,
            avatar,
            skills_offered,
            skills_wanted,
            availability,
            details,
        } = request;

        if self
            .profiles
            .find_by_email(&email)
            .await
            .map_err(map_profile_error)?
            .is_some()
        {
            debug!(email = %email, "signup refused: e-mail taken");
            return Err(SwapError::conflict(format!(
                "email {email} is already registered"
            )));
        }

        let digest = self
            .hasher
            .hash(password.expose())
            .map_err(|err| SwapError::Store(StoreError::from(err)))?;

        let mut details = details.normalised();
        if details.experience.is_none() {
            details.experience = Some(DEFAULT_EXPERIENCE.to_owned());
        }
        let profile = UserProfile {
            id: UserId::random(),
            name,
            email,
            avatar: avatar.filter(|url| !url.trim().is_empty()),
            skills_offered,
            skills_wanted,
            availability,
            rating: Rating::unrated(),
            is_public: true,
            join_date: self.clock.utc().date_naive(),
            role: Role::Member,
            details,
        };
        self.profiles
            .insert(&profile)
            .await
            .map_err(map_profile_error)?;

        if let Err(err) = self.credentials.save(&profile.id, &digest).await {
            error!(user_id = %profile.id, error = %err, "credential write failed; rolling back profile");
            if let Err(cleanup) = self.profiles.delete(&profile.id).await {
                error!(user_id = %profile.id, error = %cleanup, "profile rollback failed");
            }
            return Err(map_credential_error(err));
        }

        info!(user_id = %profile.id, "member signed up");
        Ok(profile)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<UserProfile, SwapError> {
        let Some(profile) = self
            .profiles
            .find_by_email(credentials.email())
            .await
            .map_err(map_profile_error)?
        else {
            debug!("login refused: unknown e-mail");
            return Err(SwapError::forbidden(INVALID_CREDENTIALS));
        };
        let Some(digest) = self
            .credentials
            .find(&profile.id)
            .await
            .map_err(map_credential_error)?
        else {
            debug!(user_id = %profile.id, "login refused: no credential on file");
            return Err(SwapError::forbidden(INVALID_CREDENTIALS));
        };
        let verified = self
            .hasher
            .verify(credentials.password(), &digest)
            .map_err(|err| SwapError::Store(StoreError::from(err)))?;
        if !verified {
            debug!(user_id = %profile.id, "login refused: wrong password");
            return Err(SwapError::forbidden(INVALID_CREDENTIALS));
        }
        info!(user_id = %profile.id, "member logged in");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCredentialStore, MockPasswordHasher, PasswordDigest, PasswordHasherError,
    };
    use crate::domain::{DisplayName, EmailAddress, NewPassword, ProfileDetails, SkillSet};
    use crate::outbound::memory::{InMemoryCredentialStore, InMemoryProfileRepository};
    use crate::outbound::password::Argon2PasswordHasher;
    use crate::test_support::{MutableClock, fixed_now};
    use rstest::{fixture, rstest};

    type Service =
        AccountServiceImpl<InMemoryProfileRepository, InMemoryCredentialStore, Argon2PasswordHasher>;

    #[fixture]
    fn service() -> Service {
        AccountServiceImpl::new(
            Arc::new(InMemoryProfileRepository::default()),
            Arc::new(InMemoryCredentialStore::default()),
            Arc::new(Argon2PasswordHasher::default()),
            Arc::new(MutableClock::new(fixed_now())),
        )
    }

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            name: DisplayName::new("Priya Patel").expect("name"),
            email: EmailAddress::new(email).expect("email"),
            password: NewPassword::confirm("correct horse", "correct horse").expect("password"),
            avatar: Some("   ".to_owned()),
            skills_offered: SkillSet::parse(["Pottery"]).expect("skills"),
            skills_wanted: SkillSet::parse(["Rust"]).expect("skills"),
            availability: Default::default(),
            details: ProfileDetails::default(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn signup_creates_a_public_unrated_member(service: Service) {
        let profile = service.signup(signup("priya@example.com")).await.expect("signup");
        assert!(profile.is_public);
        assert_eq!(profile.role, Role::Member);
        assert_eq!(profile.rating.average(), None);
        assert_eq!(profile.join_date, fixed_now().date_naive());
        assert_eq!(profile.avatar, None);
        assert_eq!(profile.details.experience.as_deref(), Some(DEFAULT_EXPERIENCE));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_conflict_regardless_of_case(service: Service) {
        service.signup(signup("priya@example.com")).await.expect("first");
        let err = service
            .signup(signup("PRIYA@example.com"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind(), "conflict");
    }

    #[rstest]
    #[case("priya@example.com", "correct horse", true)]
    #[case("Priya@Example.com", "correct horse", true)]
    #[case("priya@example.com", "wrong horse!", false)]
    #[case("nobody@example.com", "correct horse", false)]
    #[tokio::test]
    async fn login_checks_email_and_password(
        service: Service,
        #[case] email: &str,
        #[case] password: &str,
        #[case] accepted: bool,
    ) {
        let created = service.signup(signup("priya@example.com")).await.expect("signup");
        let creds = LoginCredentials::try_from_parts(email, password).expect("creds");
        match service.login(&creds).await {
            Ok(profile) => {
                assert!(accepted, "login should have been refused");
                assert_eq!(profile.id, created.id);
            }
            Err(err) => {
                assert!(!accepted, "login should have succeeded: {err}");
                assert_eq!(err, SwapError::forbidden(INVALID_CREDENTIALS));
            }
        }
    }

    #[tokio::test]
    async fn failed_credential_write_rolls_back_the_profile() {
        let profiles = Arc::new(InMemoryProfileRepository::default());
        let mut credentials = MockCredentialStore::new();
        credentials
            .expect_save()
            .times(1)
            .return_once(|_, _| Err(CredentialStoreError::connection("down")));
        let service = AccountServiceImpl::new(
            profiles.clone(),
            Arc::new(credentials),
            Arc::new(Argon2PasswordHasher::default()),
            Arc::new(MutableClock::new(fixed_now())),
        );

        let err = service
            .signup(signup("priya@example.com"))
            .await
            .expect_err("store down");
        assert_eq!(err.kind(), "store");
        assert!(profiles.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn malformed_digest_is_a_store_error() {
        let profiles = Arc::new(InMemoryProfileRepository::default());
        let credentials = Arc::new(InMemoryCredentialStore::default());
        let service = AccountServiceImpl::new(
            profiles,
            credentials.clone(),
            Arc::new(Argon2PasswordHasher::default()),
            Arc::new(MutableClock::new(fixed_now())),
        );
        let created = service.signup(signup("priya@example.com")).await.expect("signup");
        credentials
            .save(&created.id, &PasswordDigest::new("garbage"))
            .await
            .expect("overwrite");

        let creds =
            LoginCredentials::try_from_parts("priya@example.com", "correct horse").expect("creds");
        let err = service.login(&creds).await.expect_err("malformed");
        assert_eq!(err.kind(), "store");
    }

    #[tokio::test]
    async fn hashing_failure_stores_nothing() {
        let profiles = Arc::new(InMemoryProfileRepository::default());
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .return_once(|_| Err(PasswordHasherError::hashing("out of memory")));
        let service = AccountServiceImpl::new(
            profiles.clone(),
            Arc::new(InMemoryCredentialStore::default()),
            Arc::new(hasher),
            Arc::new(MutableClock::new(fixed_now())),
        );

        let err = service
            .signup(signup("priya@example.com"))
            .await
            .expect_err("hasher down");
        assert_eq!(err.kind(), "store");
        assert!(profiles.list_all().await.expect("list").is_empty());
    }
}
