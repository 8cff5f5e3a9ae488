use serde::Deserialize;

use super::episode::EpisodeRef;

/// A character record as returned by `characters` and `character`.
///
/// List queries omit `episode`; it decodes as empty there.
#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// "Alive", "Dead" or "unknown" per the remote schema.
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// "Female", "Male", "Genderless" or "unknown".
    pub gender: String,
    pub origin: super::LocationRef,
    pub location: super::LocationRef,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub episode: Vec<EpisodeRef>,
    #[serde(default)]
    pub created: Option<String>,
}

/// The abbreviated character shape embedded in episode and location details.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_list_shape() {
        let character: Character = serde_json::from_value(json!({
            "id": "1",
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"id": "1", "name": "Earth (C-137)", "type": "Planet", "dimension": "Dimension C-137"},
            "location": {"id": "3", "name": "Citadel of Ricks", "type": "Space station", "dimension": "unknown"},
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "created": "2017-11-04T18:48:46.250Z"
        }))
        .unwrap();

        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.kind, "");
        assert!(character.episode.is_empty());
        assert_eq!(character.location.name, "Citadel of Ricks");
    }

    #[test]
    fn test_decode_unknown_origin() {
        // The API reports unknown origins with a null id and no type/dimension.
        let character: Character = serde_json::from_value(json!({
            "id": "20",
            "name": "Ants in my Eyes Johnson",
            "status": "unknown",
            "species": "Human",
            "type": "Human with ants in his eyes",
            "gender": "Male",
            "origin": {"id": null, "name": "unknown", "type": null, "dimension": null},
            "location": {"id": "6", "name": "Interdimensional Cable", "type": "TV", "dimension": "unknown"},
            "image": null,
            "created": null
        }))
        .unwrap();

        assert!(character.origin.id.is_none());
        assert_eq!(character.origin.name, "unknown");
    }
}
