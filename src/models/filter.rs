//! Request-side filter predicates.
//!
//! `None` means "no constraint on this field". `Some("")` is a real value and
//! is kept on the wire; only the interactive inputs collapse empty text to
//! `None` before it gets here.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CharacterFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "episode", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
}

/// Common surface the list panes need from a filter record.
pub trait Filter: Default + Clone + PartialEq + Serialize + Send + 'static {
    /// The debounced search box writes through here.
    fn set_name(&mut self, name: Option<String>);

    fn name(&self) -> Option<&str>;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Filter for CharacterFilter {
    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Filter for EpisodeFilter {
    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Filter for LocationFilter {
    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_stay_off_the_wire() {
        let filter = CharacterFilter {
            name: Some("rick".into()),
            ..Default::default()
        };

        let wire = serde_json::to_value(&filter).unwrap();
        assert_eq!(wire, json!({"name": "rick"}));
    }

    #[test]
    fn test_empty_string_is_a_value() {
        // Unlikely but legal: an explicit empty-string predicate serializes.
        let filter = CharacterFilter {
            kind: Some(String::new()),
            ..Default::default()
        };

        let wire = serde_json::to_value(&filter).unwrap();
        assert_eq!(wire, json!({"type": ""}));
    }

    #[test]
    fn test_is_empty() {
        let mut filter = LocationFilter::default();
        assert!(filter.is_empty());

        filter.dimension = Some("C-137".into());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_set_name() {
        let mut filter = EpisodeFilter::default();
        filter.set_name(Some("pilot".into()));
        assert_eq!(filter.name(), Some("pilot"));

        filter.set_name(None);
        assert!(filter.is_empty());
    }
}
