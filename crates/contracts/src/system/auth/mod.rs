use serde::{Deserialize, Serialize};

/// Signed-in user as kept under the `auth` key of local storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredAuth {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub profile_timezone: Option<String>,
    #[serde(default)]
    pub data: Option<UserInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub profile_timezone: Option<String>,
}

impl StoredAuth {
    /// Timezone new users inherit from the signed-in user
    pub fn default_timezone(&self) -> Option<&str> {
        self.profile_timezone
            .as_deref()
            .or_else(|| self.data.as_ref()?.profile_timezone.as_deref())
            .filter(|tz| !tz.trim().is_empty())
    }
}
