use serde::{Deserialize, Serialize};

/// Configuration for the tutor chat backend connection.
///
/// `user_id` and `tutor_name` are required by the backend in every request
/// context; the base URL defaults to the local development server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub user_id: String,
    pub tutor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ClientConfig {
    pub fn new(user_id: impl Into<String>, tutor_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tutor_name: tutor_name.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::new("user-1", "Ada").with_base_url("http://test:9999");
        assert_eq!(config.base_url.as_deref(), Some("http://test:9999"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ClientConfig::new("user-1", "Ada");

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.user_id, "user-1");
        assert_eq!(deserialized.tutor_name, "Ada");
        assert!(deserialized.base_url.is_none());
    }
}
