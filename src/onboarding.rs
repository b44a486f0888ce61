//! Onboarding status and notification preferences
//!
//! One-shot gate run after sign-in: if the onboarding record's
//! `notification_time_setting` is null the user still has to pick a
//! notification time, and the app routes them through the setup step before
//! normal use. Completing that step writes the preference via
//! `PUT /user_preferences`.

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::auth::SessionManager;
use crate::error::{classify_resource, Error};
use crate::fetch::Fetch;

/// Per-user onboarding record
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingSettings {
    pub id: i64,

    /// Null until the user completes notification setup
    pub notification_time_setting: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

/// Stored notification preferences
#[derive(Debug, Clone, Deserialize)]
pub struct UserPreferences {
    pub id: i64,
    pub notification_time: String,
    pub timezone: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    #[allow(dead_code)]
    success: bool,
    data: T,
}

/// Client for the onboarding status and user-preferences endpoints
pub struct OnboardingClient {
    base_url: String,
    client: Client,
    session: SessionManager,
}

impl OnboardingClient {
    pub(crate) fn new(base_url: &str, client: Client, session: SessionManager) -> Self {
        Self {
            base_url: base_url.to_string(),
            client,
            session,
        }
    }

    fn token(&self) -> Result<String, Error> {
        self.session.current_token().ok_or(Error::NotAuthenticated)
    }

    /// Fetch the current user's onboarding record
    pub async fn settings(&self) -> Result<OnboardingSettings, Error> {
        let token = self.token()?;
        debug!("fetching onboarding settings");

        let url = format!("{}/onboarding", self.base_url);
        let response: DataResponse<OnboardingSettings> = Fetch::get(&self.client, &url)
            .bearer_auth(&token)
            .execute(|status, body| {
                classify_resource(status, body, "Onboarding", "fetch onboarding settings")
            })
            .await?;
        Ok(response.data)
    }

    /// Whether the user still needs the one-time notification setup step
    pub async fn needs_notification_setup(&self) -> Result<bool, Error> {
        let settings = self.settings().await?;
        Ok(settings.notification_time_setting.is_none())
    }

    /// Store the notification time and timezone chosen during setup
    pub async fn update_preferences(
        &self,
        notification_time: &str,
        timezone: &str,
    ) -> Result<UserPreferences, Error> {
        let token = self.token()?;
        debug!("updating user preferences");

        let url = format!("{}/user_preferences", self.base_url);
        let envelope = json!({
            "user_preference": {
                "notification_time": notification_time,
                "timezone": timezone,
            }
        });

        let response: DataResponse<UserPreferences> = Fetch::put(&self.client, &url)
            .bearer_auth(&token)
            .json(&envelope)?
            .execute(|status, body| {
                classify_resource(status, body, "User preference", "update user preferences")
            })
            .await?;
        Ok(response.data)
    }
}
