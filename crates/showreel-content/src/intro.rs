//! The built-in cinematic intro.

use showreel_sequencer::domain::scene::Scene;

use crate::catalog::SceneCatalog;
use crate::transitions::TransitionVariant;

const INTRO: [(&str, &str, u64, TransitionVariant); 6] = [
    (
        "Your data lives everywhere",
        "Warehouses, spreadsheets, event streams, forgotten APIs",
        3200,
        TransitionVariant::Fade,
    ),
    (
        "Every team reshapes it by hand",
        "",
        2600,
        TransitionVariant::SlideUp,
    ),
    (
        "Describe the shape you need",
        "Declarative transforms, versioned like code",
        3400,
        TransitionVariant::Blur,
    ),
    (
        "We build the pipeline",
        "Typed, tested, and incremental from day one",
        3400,
        TransitionVariant::SlideLeft,
    ),
    (
        "Watch it run",
        "Lineage and quality checks on every change",
        3000,
        TransitionVariant::Scale,
    ),
    ("Let's get started", "", 2400, TransitionVariant::Fade),
];

/// Returns the intro played on the landing page.
///
/// # Panics
///
/// Never; the table above is non-empty and every duration is positive.
#[must_use]
pub fn default_intro() -> SceneCatalog {
    let entries = INTRO.iter().map(|(title, subtitle, duration_ms, transition)| {
        let scene = Scene::from_millis(*title, *subtitle, *duration_ms)
            .expect("built-in intro scenes have positive durations");
        (scene, *transition)
    });
    SceneCatalog::from_entries(entries).expect("built-in intro is non-empty")
}
