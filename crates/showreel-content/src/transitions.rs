//! Static table of transition variants.
//!
//! Each variant maps to the visual state an element enters from and settles
//! into. The table is constant; nothing mutates it at runtime.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use showreel_core::error::DomainError;

/// Named entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionVariant {
    /// Opacity only.
    Fade,
    /// Rises from below.
    SlideUp,
    /// Drops from above.
    SlideDown,
    /// Enters from the right, moving left.
    SlideLeft,
    /// Enters from the left, moving right.
    SlideRight,
    /// Grows from slightly smaller.
    Scale,
    /// Sharpens out of a blur.
    Blur,
}

/// Timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow.
    EaseIn,
    /// Ends slow.
    EaseOut,
    /// Slow at both ends.
    EaseInOut,
}

/// Visual properties at one end of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualState {
    /// 0.0 (invisible) to 1.0.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
}

/// Where every transition settles.
pub const AT_REST: VisualState = VisualState {
    opacity: 1.0,
    x: 0.0,
    y: 0.0,
    scale: 1.0,
    blur_px: 0.0,
};

const fn hidden(x: f64, y: f64, scale: f64, blur_px: f64) -> VisualState {
    VisualState {
        opacity: 0.0,
        x,
        y,
        scale,
        blur_px,
    }
}

/// Full parameters for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionSpec {
    /// The variant these parameters belong to.
    pub variant: TransitionVariant,
    /// Starting visual state.
    pub from: VisualState,
    /// Final visual state.
    pub to: VisualState,
    /// Animation length.
    pub duration_ms: u32,
    /// Delay before the animation starts.
    pub delay_ms: u32,
    /// Timing curve.
    pub easing: Easing,
}

static TRANSITIONS: [TransitionSpec; 7] = [
    TransitionSpec {
        variant: TransitionVariant::Fade,
        from: hidden(0.0, 0.0, 1.0, 0.0),
        to: AT_REST,
        duration_ms: 600,
        delay_ms: 0,
        easing: Easing::EaseOut,
    },
    TransitionSpec {
        variant: TransitionVariant::SlideUp,
        from: hidden(0.0, 40.0, 1.0, 0.0),
        to: AT_REST,
        duration_ms: 700,
        delay_ms: 100,
        easing: Easing::EaseOut,
    },
    TransitionSpec {
        variant: TransitionVariant::SlideDown,
        from: hidden(0.0, -40.0, 1.0, 0.0),
        to: AT_REST,
        duration_ms: 700,
        delay_ms: 100,
        easing: Easing::EaseOut,
    },
    TransitionSpec {
        variant: TransitionVariant::SlideLeft,
        from: hidden(60.0, 0.0, 1.0, 0.0),
        to: AT_REST,
        duration_ms: 650,
        delay_ms: 0,
        easing: Easing::EaseInOut,
    },
    TransitionSpec {
        variant: TransitionVariant::SlideRight,
        from: hidden(-60.0, 0.0, 1.0, 0.0),
        to: AT_REST,
        duration_ms: 650,
        delay_ms: 0,
        easing: Easing::EaseInOut,
    },
    TransitionSpec {
        variant: TransitionVariant::Scale,
        from: hidden(0.0, 0.0, 0.92, 0.0),
        to: AT_REST,
        duration_ms: 500,
        delay_ms: 0,
        easing: Easing::EaseOut,
    },
    TransitionSpec {
        variant: TransitionVariant::Blur,
        from: hidden(0.0, 0.0, 1.0, 12.0),
        to: AT_REST,
        duration_ms: 900,
        delay_ms: 150,
        easing: Easing::Linear,
    },
];

impl TransitionVariant {
    /// Every variant, in table order.
    pub const ALL: [Self; 7] = [
        Self::Fade,
        Self::SlideUp,
        Self::SlideDown,
        Self::SlideLeft,
        Self::SlideRight,
        Self::Scale,
        Self::Blur,
    ];

    /// The kebab-case name used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::SlideUp => "slide-up",
            Self::SlideDown => "slide-down",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
            Self::Scale => "scale",
            Self::Blur => "blur",
        }
    }

    /// The variant's parameters.
    #[must_use]
    pub fn spec(self) -> &'static TransitionSpec {
        &TRANSITIONS[self as usize]
    }
}

impl fmt::Display for TransitionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown transition variant: {s}")))
    }
}

/// Looks up a variant's parameters by name.
#[must_use]
pub fn transition_for(name: &str) -> Option<&'static TransitionSpec> {
    name.parse::<TransitionVariant>().ok().map(TransitionVariant::spec)
}
