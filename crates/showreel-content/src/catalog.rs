//! Scene catalogues: scenes paired with their entrance transitions, loaded
//! from YAML or built in code.

use std::path::Path;

use serde::Deserialize;
use showreel_core::error::DomainError;
use showreel_sequencer::domain::scene::{Scene, SceneList};
use tracing::info;

use crate::transitions::TransitionVariant;

/// A playable scene list plus the transition each scene enters with.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCatalog {
    scenes: SceneList,
    transitions: Vec<TransitionVariant>,
}

impl SceneCatalog {
    /// Pairs each scene with a transition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there are no entries.
    pub fn from_entries<I>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (Scene, TransitionVariant)>,
    {
        let (scenes, transitions): (Vec<Scene>, Vec<TransitionVariant>) =
            entries.into_iter().unzip();
        Ok(Self {
            scenes: SceneList::new(scenes)?,
            transitions,
        })
    }

    /// The scenes, in playback order.
    #[must_use]
    pub fn scenes(&self) -> &SceneList {
        &self.scenes
    }

    /// Consumes the catalogue, keeping only the scenes.
    #[must_use]
    pub fn into_scenes(self) -> SceneList {
        self.scenes
    }

    /// Iterates `(scene, transition)` pairs in playback order.
    pub fn entries(&self) -> impl Iterator<Item = (&Scene, TransitionVariant)> {
        self.scenes.iter().zip(self.transitions.iter().copied())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneEntry {
    title: String,
    #[serde(default)]
    subtitle: String,
    duration_ms: u64,
    #[serde(default)]
    transition: Option<String>,
}

/// Parses a YAML catalogue.
///
/// ```yaml
/// scenes:
///   - title: Your data is everywhere
///     subtitle: Warehouses, spreadsheets, APIs
///     duration_ms: 3000
///     transition: slide-up
/// ```
///
/// `subtitle` defaults to empty and `transition` to `fade`.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed YAML, an empty scene
/// list, a zero duration, or an unknown transition.
pub fn load_scenes_yaml(source: &str) -> Result<SceneCatalog, DomainError> {
    let document: CatalogDocument = serde_yaml::from_str(source)
        .map_err(|e| DomainError::Validation(format!("invalid scene catalogue: {e}")))?;

    let entries = document
        .scenes
        .into_iter()
        .map(|entry| {
            let transition = match entry.transition.as_deref() {
                Some(name) => name.parse()?,
                None => TransitionVariant::Fade,
            };
            let scene = Scene::from_millis(entry.title, entry.subtitle, entry.duration_ms)?;
            Ok((scene, transition))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    SceneCatalog::from_entries(entries)
}

/// Reads and parses a YAML catalogue from disk.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read, or any
/// error from [`load_scenes_yaml`].
pub fn load_scenes_file(path: &Path) -> Result<SceneCatalog, DomainError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Infrastructure(format!("cannot read {}: {e}", path.display()))
    })?;
    let catalog = load_scenes_yaml(&source)?;
    info!(path = %path.display(), scenes = catalog.scenes().len(), "loaded scene catalogue");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn test_load_yaml_applies_defaults() {
        // Arrange
        let source = r"
scenes:
  - title: First
    duration_ms: 2000
  - title: Second
    subtitle: with words
    duration_ms: 3000
    transition: blur
";

        // Act
        let catalog = load_scenes_yaml(source).unwrap();

        // Assert
        let entries: Vec<(&Scene, TransitionVariant)> = catalog.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.title(), "First");
        assert_eq!(entries[0].0.subtitle(), "");
        assert_eq!(entries[0].1, TransitionVariant::Fade);
        assert_eq!(entries[1].0.subtitle(), "with words");
        assert_eq!(entries[1].0.duration(), Duration::from_millis(3000));
        assert_eq!(entries[1].1, TransitionVariant::Blur);
    }

    #[test]
    fn test_load_yaml_rejects_empty_scene_list() {
        let result = load_scenes_yaml("scenes: []");

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_load_yaml_rejects_zero_duration() {
        let result = load_scenes_yaml("scenes:\n  - title: Nope\n    duration_ms: 0\n");

        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("Nope")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_yaml_rejects_unknown_transition() {
        let source = "scenes:\n  - title: A\n    duration_ms: 10\n    transition: spin\n";

        match load_scenes_yaml(source) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("spin")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_yaml_rejects_unknown_fields_and_bad_syntax() {
        assert!(matches!(
            load_scenes_yaml("scenes:\n  - title: A\n    duration_ms: 10\n    colour: red\n"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            load_scenes_yaml("scenes: [unclosed"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_load_file_reports_missing_file_as_infrastructure() {
        let result = load_scenes_file(Path::new("/nonexistent/showreel/scenes.yaml"));

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_load_file_reads_catalogue_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "showreel-catalog-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "scenes:\n  - title: Disk\n    duration_ms: 750\n").unwrap();

        let catalog = load_scenes_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.scenes().first().title(), "Disk");
    }
}
