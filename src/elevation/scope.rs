//! Explicit elevation scope passed down the render tree

use super::level::{clamp_level, ElevationLevel, TableElevation};

/// Elevation visible at one point of the render tree.
///
/// Scopes are immutable values. Providing a level returns a new child scope; the parent is
/// untouched, so siblings rendered after a raised container still see the parent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElevationScope {
    level: ElevationLevel,
}

impl ElevationScope {
    /// Scope with no provider above it. Reads level 0.
    pub fn root() -> Self {
        Self::default()
    }

    /// Level provided by the nearest ancestor, or 0.
    pub fn read_level(&self) -> ElevationLevel {
        self.level
    }

    /// Child scope with an explicit level (clamped into `0..=3`).
    pub fn provide_level(&self, level: f64) -> Self {
        Self {
            level: clamp_level(level),
        }
    }

    /// Child scope for a raised container such as a card.
    ///
    /// Without an override the container sits one level above its parent, and never below 1.
    /// An override is honoured but also never below 1.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::elevation::ElevationScope;
    /// let page = ElevationScope::root();
    /// let card = page.container(None);
    /// assert_eq!(card.read_level().get(), 1);
    /// assert_eq!(card.container(None).read_level().get(), 2);
    /// assert_eq!(page.container(Some(0.0)).read_level().get(), 1);
    /// ```
    pub fn container(&self, level_override: Option<f64>) -> Self {
        let level = match level_override {
            Some(level) if !level.is_nan() => level.max(1.0),
            _ => f64::from(self.level.get()) + 1.0,
        };
        self.provide_level(level.max(1.0))
    }

    /// Table elevation for a table rendered in this scope.
    pub fn table_level(&self) -> TableElevation {
        self.level.into()
    }
}
