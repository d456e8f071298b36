//! Authenticated user record supplied by the auth collaborator.

use serde::{Deserialize, Serialize};

const FALLBACK_DISPLAY_NAME: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
        }
    }

    /// Name used in the dashboard greeting.
    ///
    /// Falls back from `name` to the email local part, then to `"User"`.
    /// Blank values count as absent.
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return name;
            }
        }
        if let Some(email) = self.email.as_deref() {
            let local = email.split('@').next().unwrap_or_default().trim();
            if !local.is_empty() {
                return local;
            }
        }
        FALLBACK_DISPLAY_NAME
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn display_name_prefers_name_then_email_then_fallback() {
        let mut user = User::new("u1");
        assert_eq!(user.display_name(), "User");

        user.email = Some("ada@example.com".to_string());
        assert_eq!(user.display_name(), "ada");

        user.name = Some("Ada Lovelace".to_string());
        assert_eq!(user.greeting(), "Welcome, Ada Lovelace");
    }

    #[test]
    fn blank_name_falls_through_to_email() {
        let user = User {
            id: "u2".to_string(),
            name: Some("   ".to_string()),
            email: Some("@example.com".to_string()),
        };
        assert_eq!(user.display_name(), "User");
    }
}
