//! Typed operations over the catalog's GraphQL schema.
//!
//! One method per server operation; the query documents request exactly the
//! fields the views render.

use serde_json::json;

use crate::graphql::{GraphqlClient, GraphqlError};
use crate::models::{
    Character, CharacterFilter, Episode, EpisodeFilter, Location, LocationFilter, Paged,
};

const CHARACTERS_QUERY: &str = r#"
query GetCharacters($page: Int, $filter: FilterCharacter) {
  characters(page: $page, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      status
      species
      type
      gender
      origin { id name type dimension }
      location { id name type dimension }
      image
      created
    }
  }
}
"#;

const CHARACTER_QUERY: &str = r#"
query GetCharacter($id: ID!) {
  character(id: $id) {
    id
    name
    status
    species
    type
    gender
    origin { id name type dimension }
    location { id name type dimension }
    image
    episode { id name air_date episode }
    created
  }
}
"#;

const EPISODES_QUERY: &str = r#"
query GetEpisodes($page: Int, $filter: FilterEpisode) {
  episodes(page: $page, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      air_date
      episode
      created
    }
  }
}
"#;

const EPISODE_QUERY: &str = r#"
query GetEpisode($id: ID!) {
  episode(id: $id) {
    id
    name
    air_date
    episode
    characters { id name image status }
    created
  }
}
"#;

const LOCATIONS_QUERY: &str = r#"
query GetLocations($page: Int, $filter: FilterLocation) {
  locations(page: $page, filter: $filter) {
    info { count pages next prev }
    results {
      id
      name
      type
      dimension
      created
    }
  }
}
"#;

const LOCATION_QUERY: &str = r#"
query GetLocation($id: ID!) {
  location(id: $id) {
    id
    name
    type
    dimension
    residents { id name image status }
    created
  }
}
"#;

/// Which top-level entity family an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Character,
    Episode,
    Location,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Character => "character",
            EntityKind::Episode => "episode",
            EntityKind::Location => "location",
        }
    }
}

/// A detail fetch keyed by entity kind and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub kind: EntityKind,
    pub id: String,
}

/// A fully loaded detail entity with its related-entity references.
#[derive(Debug, Clone)]
pub enum Detail {
    Character(Character),
    Episode(Episode),
    Location(Location),
}

impl Detail {
    pub fn name(&self) -> &str {
        match self {
            Detail::Character(c) => &c.name,
            Detail::Episode(e) => &e.name,
            Detail::Location(l) => &l.name,
        }
    }
}

/// Typed access to the catalog endpoint. Cheap to clone; fetches run on
/// spawned tasks.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: GraphqlClient,
}

impl CatalogService {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    pub async fn characters(
        &self,
        page: u32,
        filter: &CharacterFilter,
    ) -> Result<Paged<Character>, GraphqlError> {
        self.client
            .query_field(
                CHARACTERS_QUERY,
                "GetCharacters",
                json!({"page": page, "filter": filter}),
                "characters",
            )
            .await
    }

    pub async fn character(&self, id: &str) -> Result<Character, GraphqlError> {
        self.client
            .query_field(CHARACTER_QUERY, "GetCharacter", json!({"id": id}), "character")
            .await
    }

    pub async fn episodes(
        &self,
        page: u32,
        filter: &EpisodeFilter,
    ) -> Result<Paged<Episode>, GraphqlError> {
        self.client
            .query_field(
                EPISODES_QUERY,
                "GetEpisodes",
                json!({"page": page, "filter": filter}),
                "episodes",
            )
            .await
    }

    pub async fn episode(&self, id: &str) -> Result<Episode, GraphqlError> {
        self.client
            .query_field(EPISODE_QUERY, "GetEpisode", json!({"id": id}), "episode")
            .await
    }

    pub async fn locations(
        &self,
        page: u32,
        filter: &LocationFilter,
    ) -> Result<Paged<Location>, GraphqlError> {
        self.client
            .query_field(
                LOCATIONS_QUERY,
                "GetLocations",
                json!({"page": page, "filter": filter}),
                "locations",
            )
            .await
    }

    pub async fn location(&self, id: &str) -> Result<Location, GraphqlError> {
        self.client
            .query_field(LOCATION_QUERY, "GetLocation", json!({"id": id}), "location")
            .await
    }

    pub async fn detail(&self, request: &DetailRequest) -> Result<Detail, GraphqlError> {
        match request.kind {
            EntityKind::Character => self.character(&request.id).await.map(Detail::Character),
            EntityKind::Episode => self.episode(&request.id).await.map(Detail::Episode),
            EntityKind::Location => self.location(&request.id).await.map(Detail::Location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_label() {
        assert_eq!(EntityKind::Character.label(), "character");
        assert_eq!(EntityKind::Location.label(), "location");
    }

    #[test]
    fn test_list_variables_shape() {
        // The wire variables must nest the filter under "filter" and skip
        // unset predicates entirely.
        let filter = CharacterFilter {
            status: Some("alive".into()),
            ..Default::default()
        };
        let vars = json!({"page": 2, "filter": filter});
        assert_eq!(vars["page"], 2);
        assert_eq!(vars["filter"], json!({"status": "alive"}));
    }
}
