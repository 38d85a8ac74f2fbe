//! Registration of the GitHub account behind an access token.

use crate::error::PickGitError;
use crate::github::{AccessToken, GithubUserProfile, ProfileGateway};
use crate::persistence::UserStore;

use super::{BasicProfile, GithubProfile, NewUser, User};

/// Creates or refreshes users from their GitHub profile.
pub struct UserRegistration<'a, Gateway>
where
    Gateway: ProfileGateway + ?Sized,
{
    gateway: &'a Gateway,
    users: &'a dyn UserStore,
}

impl<'a, Gateway> UserRegistration<'a, Gateway>
where
    Gateway: ProfileGateway + ?Sized,
{
    /// Create a registration flow over the given gateway and store.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, users: &'a dyn UserStore) -> Self {
        Self { gateway, users }
    }

    /// Reads the token owner's GitHub profile and upserts the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] for an absent token,
    /// [`PickGitError::Authentication`] when GitHub rejects it, and
    /// persistence failures.
    pub async fn register(&self, token: Option<&str>) -> Result<User, PickGitError> {
        let access_token = AccessToken::from_optional(token)?;
        let profile = self.gateway.authenticated_profile(&access_token).await?;
        let user = self.users.save_user(&NewUser::from(profile))?;

        tracing::info!(username = user.name(), user_id = user.id.get(), "user registered");
        Ok(user)
    }
}

impl From<GithubUserProfile> for NewUser {
    fn from(profile: GithubUserProfile) -> Self {
        Self {
            basic_profile: BasicProfile {
                name: profile.login,
                image: profile.avatar_url,
                description: profile.bio,
            },
            github_profile: GithubProfile {
                github_url: profile.html_url,
                company: profile.company,
                location: profile.location,
                website: profile.blog,
                twitter: profile.twitter_username,
            },
        }
    }
}
