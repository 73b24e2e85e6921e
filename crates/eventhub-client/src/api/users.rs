//! Registration, authentication, profile, and the user directory.

use crate::client::EventHubClient;
use crate::gateway::ApiCall;
use crate::signal::SessionEvent;
use eventhub_types::{
    LoginRequest, LoginResponse, RegisterRequest, ResourceId, Result, User, UserEnvelope,
};
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashSet;

impl EventHubClient {
    /// `POST users/register`. Returns the server's payload as-is.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value> {
        self.call(ApiCall::post("users/register").json(request)).await
    }

    /// `POST users/login`.
    ///
    /// When the response carries a token it is stored before this returns,
    /// replacing the previous session's cached profile and user directory.
    /// The returned user (if any) is cached as the session profile, and
    /// [`SessionEvent::LoggedIn`] is emitted.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response: LoginResponse =
            self.call(ApiCall::post("users/login").json(request)).await?;

        if let Some(token) = &response.token {
            self.session().set(Some(token.clone()));
            self.session().set_cached_user(response.user.clone());
            self.forget_users();
            if let Some(user) = response.profile() {
                self.remember_profile(user);
            }
            tracing::info!("Logged in as {}", request.email);
            self.signals().emit(SessionEvent::LoggedIn);
        } else {
            tracing::warn!("Login for {} succeeded without a token", request.email);
        }

        Ok(response)
    }

    /// `GET users/profile`, accepting either a bare or a wrapped user.
    pub async fn profile(&self) -> Result<User> {
        let envelope: UserEnvelope = self.call(ApiCall::get("users/profile")).await?;
        let user = envelope.into_user();
        self.remember_profile(user.clone());
        Ok(user)
    }

    /// Local-only logout: clears the credential, the cached profile and the
    /// user directory. No request is sent.
    pub fn logout(&self) {
        self.session().set(None);
        self.session().set_cached_user(None);
        self.forget_users();
        tracing::info!("Logged out");
        self.signals().emit(SessionEvent::LoggedOut);
    }

    /// `GET users/:id`, served from the directory cache when possible.
    /// A successful fetch is cached immediately.
    pub async fn user(&self, id: &ResourceId) -> Result<User> {
        if let Some(user) = self.cached_user(id) {
            return Ok(user);
        }

        let envelope: UserEnvelope = self.call(ApiCall::get(format!("users/{}", id))).await?;
        let user = envelope.into_user();
        self.remember_user(id.clone(), user.clone());
        Ok(user)
    }

    /// Fetches every distinct id concurrently.
    ///
    /// Waits for all fetches to settle. Each success lands in the directory
    /// cache on its own; if any fetch failed, the first failure in id order
    /// is returned and no sibling is cancelled.
    pub async fn users<I>(&self, ids: I) -> Result<Vec<User>>
    where
        I: IntoIterator<Item = ResourceId>,
    {
        Ok(self.users_by_id(ids).await?.into_iter().map(|(_, user)| user).collect())
    }

    /// Same as [`users`](Self::users), paired with the id each user was
    /// requested under.
    pub(crate) async fn users_by_id<I>(&self, ids: I) -> Result<Vec<(ResourceId, User)>>
    where
        I: IntoIterator<Item = ResourceId>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<ResourceId> =
            ids.into_iter().filter(|id| seen.insert(id.clone())).collect();

        join_all(
            unique
                .into_iter()
                .map(|id| async move { self.user(&id).await.map(|user| (id, user)) }),
        )
        .await
        .into_iter()
        .collect()
    }

    /// Adds a profile to the directory when it carries an id.
    fn remember_profile(&self, user: User) {
        if let Some(id) = user.id.clone() {
            self.remember_user(id, user);
        }
    }
}
