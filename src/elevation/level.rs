//! Elevation level newtypes and clamping

/// Nesting level of a container surface. Always within `0..=3`.
///
/// Level 3 is the topmost raised level; tables never reach it (see [`TableElevation`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElevationLevel(u8);

impl ElevationLevel {
    /// Page background.
    pub const BASE: Self = Self(0);
    /// Highest level, reserved for free-floating overlays.
    pub const MAX: Self = Self(3);

    /// Smart constructor. Returns `None` outside `0..=3`.
    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX.0).then_some(Self(level))
    }

    /// The raw level.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// One level up, saturating at [`ElevationLevel::MAX`].
    pub fn raised(&self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }
}

/// Elevation of a table surface. Always within `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TableElevation(u8);

impl TableElevation {
    /// Most raised table surface.
    pub const MAX: Self = Self(2);

    /// The raw level.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl From<ElevationLevel> for TableElevation {
    fn from(level: ElevationLevel) -> Self {
        Self(level.0.min(Self::MAX.0))
    }
}

impl From<TableElevation> for ElevationLevel {
    fn from(level: TableElevation) -> Self {
        Self(level.0)
    }
}

fn clamp_to(x: f64, max: u8) -> u8 {
    if x.is_nan() {
        return 0;
    }
    // Infinities clamp like any other out-of-range value.
    x.floor().clamp(0.0, f64::from(max)) as u8
}

/// Map any number to a level: `max(min(floor(x), 3), 0)`.
///
/// `NaN` maps to level 0 so a bad input never reaches a color lookup.
///
/// # Examples
///
/// ```
/// # use gridwin::elevation::clamp_level;
/// assert_eq!(clamp_level(-4.0).get(), 0);
/// assert_eq!(clamp_level(2.9).get(), 2);
/// assert_eq!(clamp_level(17.0).get(), 3);
/// assert_eq!(clamp_level(f64::NAN).get(), 0);
/// ```
pub fn clamp_level(x: f64) -> ElevationLevel {
    ElevationLevel(clamp_to(x, ElevationLevel::MAX.0))
}

/// Table-scoped clamp into `0..=2`. `NaN` maps to 0.
pub fn clamp_table_level(x: f64) -> TableElevation {
    TableElevation(clamp_to(x, TableElevation::MAX.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_accepts_range() {
        for n in 0..=3 {
            assert_eq!(ElevationLevel::new(n).map(|l| l.get()), Some(n));
        }
        assert_eq!(ElevationLevel::new(4), None);
    }

    #[test]
    fn raised_saturates_at_max() {
        assert_eq!(ElevationLevel::BASE.raised().get(), 1);
        assert_eq!(ElevationLevel::MAX.raised(), ElevationLevel::MAX);
    }

    #[test]
    fn clamp_handles_infinities() {
        assert_eq!(clamp_level(f64::NEG_INFINITY), ElevationLevel::BASE);
        assert_eq!(clamp_level(f64::INFINITY), ElevationLevel::MAX);
        assert_eq!(clamp_table_level(f64::INFINITY), TableElevation::MAX);
    }

    #[test]
    fn clamp_nan_is_zero() {
        assert_eq!(clamp_level(f64::NAN).get(), 0);
        assert_eq!(clamp_table_level(f64::NAN).get(), 0);
    }

    #[test]
    fn clamp_floors_fractions() {
        assert_eq!(clamp_level(1.99).get(), 1);
        assert_eq!(clamp_level(-0.5).get(), 0);
    }

    #[test]
    fn table_clamp_never_reaches_three() {
        assert_eq!(clamp_table_level(3.0).get(), 2);
        assert_eq!(TableElevation::from(ElevationLevel::MAX).get(), 2);
    }

    proptest! {
        #[test]
        fn prop_clamp_level_on_integers(x in -1_000i64..1_000) {
            let level = clamp_level(x as f64).get() as i64;
            let expected = if x < 0 { 0 } else if x > 3 { 3 } else { x };
            prop_assert_eq!(level, expected);
        }

        #[test]
        fn prop_table_clamp_within_range(x in any::<f64>()) {
            prop_assert!(clamp_table_level(x).get() <= 2);
        }
    }
}
