use serde::Deserialize;

use super::character::CharacterRef;

/// An episode record as returned by `episodes` and `episode`.
///
/// List queries omit `characters`; it decodes as empty there.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub air_date: Option<String>,
    /// Episode code, e.g. "S01E01".
    #[serde(rename = "episode", default)]
    pub code: Option<String>,
    #[serde(default)]
    pub characters: Vec<CharacterRef>,
    #[serde(default)]
    pub created: Option<String>,
}

/// The abbreviated episode shape embedded in character details.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(rename = "episode", default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode() {
        let episode: Episode = serde_json::from_value(json!({
            "id": "1",
            "name": "Pilot",
            "air_date": "December 2, 2013",
            "episode": "S01E01",
            "characters": [{"id": "1", "name": "Rick Sanchez", "status": "Alive", "image": null}],
            "created": "2017-11-10T12:56:33.798Z"
        }))
        .unwrap();

        assert_eq!(episode.code.as_deref(), Some("S01E01"));
        assert_eq!(episode.characters.len(), 1);
    }
}
