use serde::Deserialize;

use super::character::CharacterRef;

/// A location record as returned by `locations` and `location`.
///
/// List queries omit `residents`; it decodes as empty there.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub residents: Vec<CharacterRef>,
    #[serde(default)]
    pub created: Option<String>,
}

/// The abbreviated location shape embedded in characters (origin/location).
///
/// The API reports unknown origins with a null id.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub dimension: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode() {
        let location: Location = serde_json::from_value(json!({
            "id": "3",
            "name": "Citadel of Ricks",
            "type": "Space station",
            "dimension": "unknown",
            "created": "2017-11-10T13:08:13.191Z"
        }))
        .unwrap();

        assert_eq!(location.kind.as_deref(), Some("Space station"));
        assert!(location.residents.is_empty());
    }
}
