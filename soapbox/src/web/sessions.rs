use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{
    cookie::{Cookie, Key, SameSite},
    PrivateCookieJar,
};
use serde::Deserialize;
use sha2::{Digest, Sha256, Sha512};
use soapbox_api_types::{Role, UserData};
use soapbox_db::SoapboxDb;
use tokio::sync::RwLock;

use super::error::WebError;
use super::templates::page::RenderPage;
use super::templates::pages::login_page::LoginPage;

pub(crate) const SESSION_COOKIE: &str = "session";

/// Derives the private cookie key from `SOAPBOX_SECRET` so sessions survive a
/// restart when a secret is configured. Without one every boot gets a fresh
/// key and outstanding cookies stop decrypting.
pub(crate) fn cookie_key() -> Key {
    match std::env::var("SOAPBOX_SECRET") {
        Ok(secret) => {
            let digest = Sha512::digest(secret.as_bytes());
            Key::from(digest.as_slice())
        }
        Err(_) => Key::generate(),
    }
}

pub(crate) fn generate_salt() -> String {
    base64::encode(rand::random::<[u8; 16]>())
}

pub(crate) fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    base64::encode(hasher.finalize())
}

fn session_token() -> String {
    base64::encode(rand::random::<[u8; 32]>())
}

/// Logged in users, keyed by session token. Sessions are process local, so a
/// restart logs everyone out.
#[derive(Debug, Clone)]
pub(crate) struct SessionCache {
    users: Arc<RwLock<HashMap<String, AuthUser>>>,
}

impl SessionCache {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::default(),
        }
    }

    async fn store_user(&self, token: &str, user: AuthUser) {
        let mut users = self.users.write().await;
        users.insert(token.to_string(), user);
    }

    async fn get_user(&self, token: &str) -> Option<AuthUser> {
        let users = self.users.read().await;
        users.get(token).cloned()
    }

    async fn remove_token(&self, token: &str) {
        let mut users = self.users.write().await;
        users.remove(token);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AuthUser {
    pub(crate) id: i32,
    pub(crate) username: String,
    pub(crate) role: Role,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionCache: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookie_jar: PrivateCookieJar<Key> = PrivateCookieJar::from_request_parts(parts, state)
            .await
            .unwrap();
        let session = cookie_jar
            .get(SESSION_COOKIE)
            .ok_or(WebError::NotAuthenticated)?;
        let State(user_cache): State<SessionCache> =
            State::from_request_parts(parts, state).await.unwrap();
        user_cache
            .get_user(session.value())
            .await
            .ok_or(WebError::NotAuthenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionCache: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(<AuthUser as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .ok())
    }
}

/// Extractor that only admits citizen accounts.
pub(crate) struct Citizen(pub(crate) AuthUser);

impl<S> FromRequestParts<S> for Citizen
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionCache: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        if user.role != Role::Citizen {
            return Err(WebError::NotAuthenticated);
        }
        Ok(Citizen(user))
    }
}

/// Extractor that only admits admin accounts.
pub(crate) struct Operator(pub(crate) AuthUser);

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
    Key: FromRef<S>,
    SessionCache: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(WebError::NotAuthenticated);
        }
        Ok(Operator(user))
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

pub(crate) async fn login(
    State(db): State<SoapboxDb>,
    State(user_cache): State<SessionCache>,
    cookies: PrivateCookieJar,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> Result<Response, WebError> {
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_default();
    let failed_login = || {
        RenderPage(LoginPage {
            user: None,
            failed: true,
        })
        .into_response()
    };
    let Some(user) = db.get_user_by_username(&username).await? else {
        return Ok(failed_login());
    };
    if hash_password(&password, &user.password_salt) != user.password_hash {
        return Ok(failed_login());
    }

    let UserData { id, username, role } = UserData::try_from(user)?;
    let user = AuthUser { id, username, role };
    let target = match user.role {
        Role::Admin => "/operator_dashboard",
        Role::Citizen => "/client_dashboard",
    };
    let token = session_token();
    user_cache.store_user(&token, user).await;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    let cookies = cookies.add(cookie);
    Ok((cookies, Redirect::to(target)).into_response())
}

pub(crate) async fn logout(
    State(user_cache): State<SessionCache>,
    cookie_jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    let cookie_jar = if let Some(cookie) = cookie_jar.get(SESSION_COOKIE) {
        user_cache.remove_token(cookie.value()).await;
        cookie_jar.remove(cookie)
    } else {
        cookie_jar
    };
    (cookie_jar, Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_salt_same_hash() {
        let salt = "HwVzBvYW5k".to_string();
        assert_eq!(
            hash_password("hunter2", &salt),
            hash_password("hunter2", &salt)
        );
        assert_ne!(
            hash_password("hunter2", &salt),
            hash_password("hunter3", &salt)
        );
    }

    #[test]
    fn fresh_salt_changes_the_hash() {
        let first = generate_salt();
        let second = generate_salt();
        assert_ne!(first, second);
        assert_ne!(
            hash_password("hunter2", &first),
            hash_password("hunter2", &second)
        );
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(session_token(), session_token());
    }
}
