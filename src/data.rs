use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One dating profile. Immutable once constructed; the deck, the history
/// log and the likes board all hold owned copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub distance_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug)]
pub enum DataError {
    Network(String),
    Parse(String),
    Invalid(String),
}

impl DataError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Parse(message) => write!(f, "malformed profile data: {message}"),
            Self::Invalid(message) => write!(f, "invalid profile data: {message}"),
        }
    }
}

/// Loads the demo deck shipped with the app. The list is ordered; the deck
/// session is created from it wholesale and never mutated afterwards.
pub async fn fetch_profiles() -> Result<Vec<Profile>, DataError> {
    let response = Request::get("assets/profiles.json")
        .send()
        .await
        .map_err(DataError::network)?;

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching profiles",
            response.status()
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    let profiles: Vec<Profile> = serde_json::from_str(&text).map_err(DataError::parse)?;

    validate_profiles(&profiles)?;
    Ok(profiles)
}

fn validate_profiles(profiles: &[Profile]) -> Result<(), DataError> {
    if profiles.is_empty() {
        return Err(DataError::Invalid(
            "profile list does not contain any profiles".into(),
        ));
    }

    let mut seen = HashSet::new();
    for (index, profile) in profiles.iter().enumerate() {
        if profile.id.trim().is_empty() {
            return Err(DataError::Invalid(format!("profile {index} has a blank id")));
        }
        if profile.name.trim().is_empty() {
            return Err(DataError::Invalid(format!(
                "profile '{}' has a blank name",
                profile.id
            )));
        }
        if !seen.insert(profile.id.as_str()) {
            return Err(DataError::Invalid(format!(
                "duplicate profile id '{}'",
                profile.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        name: format!("Profile {id}"),
        age: 28,
        distance_label: "5 km away".to_string(),
        status: Some("Online now".to_string()),
        image: format!("https://example.com/{id}.jpg"),
        bio: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_list() {
        let profiles = vec![sample_profile("a"), sample_profile("b")];
        assert!(validate_profiles(&profiles).is_ok());
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(validate_profiles(&[]), Err(DataError::Invalid(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let profiles = vec![sample_profile("a"), sample_profile("a")];
        assert!(matches!(
            validate_profiles(&profiles),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let mut profile = sample_profile("a");
        profile.name = "   ".to_string();
        assert!(matches!(
            validate_profiles(&[profile]),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{"id":"1","name":"Esther","age":30,"distance_label":"24 km away","image":"https://example.com/1.jpg"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.status, None);
        assert_eq!(profile.bio, None);
    }
}
