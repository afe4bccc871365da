//! Scenes and the ordered scene list.

use std::slice;
use std::time::Duration;

use showreel_core::error::DomainError;

/// One timed segment of the cinematic sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    title: String,
    subtitle: String,
    duration: Duration,
}

impl Scene {
    /// Creates a scene shown for `duration`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `duration` is zero.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        duration: Duration,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if duration.is_zero() {
            return Err(DomainError::Validation(format!(
                "scene \"{title}\" must have a positive duration"
            )));
        }
        Ok(Self {
            title,
            subtitle: subtitle.into(),
            duration,
        })
    }

    /// Creates a scene shown for `duration_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `duration_ms` is zero.
    pub fn from_millis(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        duration_ms: u64,
    ) -> Result<Self, DomainError> {
        Self::new(title, subtitle, Duration::from_millis(duration_ms))
    }

    /// Scene title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Scene subtitle; empty when the scene has none.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// How long the scene stays on screen.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// A non-empty, ordered list of scenes. Insertion order is playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneList {
    scenes: Vec<Scene>,
}

impl SceneList {
    /// Wraps `scenes` after checking it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `scenes` is empty.
    pub fn new(scenes: Vec<Scene>) -> Result<Self, DomainError> {
        if scenes.is_empty() {
            return Err(DomainError::Validation(
                "a scene list needs at least one scene".to_owned(),
            ));
        }
        Ok(Self { scenes })
    }

    /// Number of scenes. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the final scene.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.scenes.len() - 1
    }

    /// The scene at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// The first scene.
    #[must_use]
    pub fn first(&self) -> &Scene {
        &self.scenes[0]
    }

    /// Sum of all scene durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.scenes.iter().map(Scene::duration).sum()
    }

    /// Sum of the durations of the scenes before `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Duration {
        self.scenes.iter().take(index).map(Scene::duration).sum()
    }

    /// Iterates scenes in playback order.
    pub fn iter(&self) -> slice::Iter<'_, Scene> {
        self.scenes.iter()
    }
}

impl<'a> IntoIterator for &'a SceneList {
    type Item = &'a Scene;
    type IntoIter = slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}
