//! Showroom scene identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the fixed showroom layouts.
///
/// Parsing is case-insensitive so front ends can accept `home`, `Home` or
/// `HOME` alike.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SceneType {
    #[default]
    Home,
    Office,
    Studio,
}

impl SceneType {
    /// Label shown in the scene switcher.
    pub fn label(self) -> &'static str {
        match self {
            SceneType::Home => "Living Room",
            SceneType::Office => "Office",
            SceneType::Studio => "Studio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_is_home() {
        assert_eq!(SceneType::default(), SceneType::Home);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(SceneType::from_str("office").unwrap(), SceneType::Office);
        assert_eq!(SceneType::from_str("STUDIO").unwrap(), SceneType::Studio);
        assert!(SceneType::from_str("garage").is_err());
    }

    #[test]
    fn test_display_and_iteration_order() {
        let names: Vec<String> = SceneType::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["HOME", "OFFICE", "STUDIO"]);
    }
}
