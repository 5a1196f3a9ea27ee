//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    CredentialStore, CredentialStoreError, FeedbackRepository, FeedbackRepositoryError,
    PasswordHasher, PasswordHasherError, ProfileRepository, ProfileRepositoryError,
    SwapRequestRepository, SwapRequestRepositoryError,
};
use crate::example_data::dataset::{DatasetError, MarketplaceDataset};
use crate::server::{InMemoryMarketplace, ServerSettings};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Fixture file could not be read.
    #[error("failed to read fixture at {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fixture rejected: {0}")]
    Dataset(#[from] DatasetError),
    #[error("failed to store profile: {0}")]
    Profiles(#[from] ProfileRepositoryError),
    #[error("failed to store request: {0}")]
    Requests(#[from] SwapRequestRepositoryError),
    #[error("failed to store feedback: {0}")]
    Feedback(#[from] FeedbackRepositoryError),
    #[error("failed to store credentials: {0}")]
    Credentials(#[from] CredentialStoreError),
    #[error("failed to hash the demo password: {0}")]
    Hashing(#[from] PasswordHasherError),
}

/// Counts of what a seeding run stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    pub users: usize,
    pub requests: usize,
    pub feedback: usize,
}

/// Load the demo marketplace into `marketplace` when enabled.
///
/// Records are written straight to the stores, so fixture timestamps,
/// ratings and statuses are kept as-is. Every user gets a credential for
/// the fixture's demo password; the signup length rule does not apply.
///
/// # Examples
///
/// ```rust,no_run
/// use std::ffi::OsString;
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use ortho_config::OrthoConfig;
/// use skillswap::example_data::seed_example_data_on_startup;
/// use skillswap::server::{InMemoryMarketplace, ServerSettings};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ServerSettings::load_from_iter([OsString::from("skillswap")])?;
/// let marketplace = InMemoryMarketplace::new(Arc::new(DefaultClock));
/// let outcome = seed_example_data_on_startup(&settings, &marketplace).await?;
/// # let _ = outcome;
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup(
    settings: &ServerSettings,
    marketplace: &InMemoryMarketplace,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.seed_example_data {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let path = settings.seed_path();
    let dataset = load_dataset(&path)?;
    let outcome = apply(&dataset, marketplace).await?;
    info!(
        path = %path.display(),
        users = outcome.users,
        requests = outcome.requests,
        feedback = outcome.feedback,
        "example data seeding applied"
    );
    Ok(Some(outcome))
}

async fn apply(
    dataset: &MarketplaceDataset,
    marketplace: &InMemoryMarketplace,
) -> Result<SeedOutcome, StartupSeedingError> {
    for user in &dataset.users {
        let digest = marketplace.hasher.hash(&dataset.demo_password)?;
        marketplace.profiles.insert(user).await?;
        marketplace.credentials.save(&user.id, &digest).await?;
    }
    for request in &dataset.requests {
        marketplace.requests.insert(request).await?;
    }
    for feedback in &dataset.feedback {
        marketplace.feedback.insert(feedback).await?;
    }
    Ok(SeedOutcome {
        users: dataset.users.len(),
        requests: dataset.requests.len(),
        feedback: dataset.feedback.len(),
    })
}

fn load_dataset(path: &Path) -> Result<MarketplaceDataset, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::FixtureRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "fixture path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    let contents = String::from_utf8(payload)
        .map_err(|err| read_error(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    Ok(MarketplaceDataset::from_json(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::Arc;

    use crate::domain::ports::{AccountService, AdminQuery};
    use crate::domain::{EmailAddress, LoginCredentials};
    use crate::test_support::{MutableClock, fixed_now};
    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::{fixture, rstest};

    const VARS: [&str; 2] = ["SKILLSWAP_SEED_EXAMPLE_DATA", "SKILLSWAP_SEED_PATH"];

    fn settings(enabled: bool, path: Option<PathBuf>) -> ServerSettings {
        let _guard = lock_env(VARS.iter().map(|name| (*name, None::<String>)));
        let mut settings = ServerSettings::load_from_iter([OsString::from("skillswap")])
            .expect("config should load");
        settings.seed_example_data = enabled;
        settings.seed_path = path;
        settings
    }

    #[fixture]
    fn marketplace() -> InMemoryMarketplace {
        InMemoryMarketplace::new(Arc::new(MutableClock::new(fixed_now())))
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_leaves_stores_empty(marketplace: InMemoryMarketplace) {
        let outcome = seed_example_data_on_startup(&settings(false, None), &marketplace)
            .await
            .expect("skip");
        assert!(outcome.is_none());
        assert!(marketplace.profiles.list_all().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn bundled_fixture_populates_the_marketplace(marketplace: InMemoryMarketplace) {
        let outcome = seed_example_data_on_startup(&settings(true, None), &marketplace)
            .await
            .expect("seed")
            .expect("enabled");
        assert_eq!(
            outcome,
            SeedOutcome {
                users: 5,
                requests: 1,
                feedback: 1
            }
        );

        let admin = marketplace
            .profiles
            .find_by_email(&EmailAddress::new("admin@skillswap.com").expect("email"))
            .await
            .expect("lookup")
            .expect("admin seeded");
        let stats = marketplace.admin().stats(&admin.id).await.expect("stats");
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.pending_requests, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_accounts_accept_the_demo_password(marketplace: InMemoryMarketplace) {
        seed_example_data_on_startup(&settings(true, None), &marketplace)
            .await
            .expect("seed");

        let credentials =
            LoginCredentials::try_from_parts("sarah@example.com", "demo123").expect("creds");
        let profile = marketplace.accounts().login(&credentials).await.expect("login");
        assert_eq!(profile.name.as_ref(), "Sarah Chen");

        let wrong =
            LoginCredentials::try_from_parts("sarah@example.com", "demo1234").expect("creds");
        assert!(marketplace.accounts().login(&wrong).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_fixture_is_reported(marketplace: InMemoryMarketplace) {
        let path = PathBuf::from("/nonexistent/skillswap/marketplace.json");
        let err = seed_example_data_on_startup(&settings(true, Some(path.clone())), &marketplace)
            .await
            .expect_err("missing file");
        assert!(matches!(err, StartupSeedingError::FixtureRead { path: p, .. } if p == path));
    }

    #[rstest]
    #[tokio::test]
    async fn reseeding_the_same_stores_is_rejected(marketplace: InMemoryMarketplace) {
        seed_example_data_on_startup(&settings(true, None), &marketplace)
            .await
            .expect("first seed");
        let err = seed_example_data_on_startup(&settings(true, None), &marketplace)
            .await
            .expect_err("duplicate ids");
        assert!(matches!(err, StartupSeedingError::Profiles(_)));
    }
}
