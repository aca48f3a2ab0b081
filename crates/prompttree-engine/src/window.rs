//! Slot budget for a prompt's node strip.
//!
//! A strip is a row of equally spaced slots; each slot holds a node or a
//! navigation arrow. How many slots fit depends only on the measured width
//! of the container, so the whole calculation is a pure function of that
//! width and a [`SlotGeometry`].

use serde::{Deserialize, Serialize};

/// Fewest slots a strip ever gets, even in very narrow containers
pub const MIN_VISIBLE: usize = 5;

/// Most slots a strip ever gets
pub const MAX_VISIBLE: usize = 15;

/// Budget used while the container has not been measured yet (width <= 0)
pub const FALLBACK_VISIBLE: usize = 10;

/// Spacing of items along a strip, in whatever unit the width is measured in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    /// Space between two adjacent items
    pub gap: f64,
    /// Width of one item
    pub diameter: f64,
    /// Offset before the first item
    pub leading: f64,
}

impl SlotGeometry {
    /// Pixel geometry of the web strip: 80px gaps, 12px circles and a 5px
    /// lead (30px branch padding minus a 25px negative list margin).
    pub const BROWSER: SlotGeometry = SlotGeometry {
        gap: 80.0,
        diameter: 12.0,
        leading: 5.0,
    };

    /// Cell geometry of the terminal strip
    pub const TERMINAL: SlotGeometry = SlotGeometry {
        gap: 6.0,
        diameter: 3.0,
        leading: 1.0,
    };

    /// Maximum number of slots that fit into `width`.
    ///
    /// Always in `MIN_VISIBLE..=MAX_VISIBLE`; unmeasured widths (zero,
    /// negative or NaN) yield [`FALLBACK_VISIBLE`].
    pub fn max_visible(&self, width: f64) -> usize {
        if width.is_nan() || width <= 0.0 {
            return FALLBACK_VISIBLE;
        }

        let pitch = self.gap + self.diameter;
        if pitch <= 0.0 {
            return MAX_VISIBLE;
        }

        let raw = ((width - self.leading) / pitch).floor();
        if raw <= MIN_VISIBLE as f64 {
            MIN_VISIBLE
        } else if raw >= MAX_VISIBLE as f64 {
            MAX_VISIBLE
        } else {
            raw as usize
        }
    }
}

impl Default for SlotGeometry {
    fn default() -> Self {
        Self::BROWSER
    }
}

/// Slot budget for a container `width` pixels wide, using [`SlotGeometry::BROWSER`]
pub fn compute_max_visible(width: f64) -> usize {
    SlotGeometry::BROWSER.max_visible(width)
}

/// Source of the currently available strip width.
///
/// Width is only known once the surface has been laid out, so the engine
/// never measures anything itself; the rendering surface hands it a probe
/// after first layout and after every resize.
pub trait WidthProbe {
    fn available_width(&self) -> f64;
}

/// Probe returning a width fixed at construction, e.g. a `--width` flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidth(pub f64);

impl WidthProbe for FixedWidth {
    fn available_width(&self) -> f64 {
        self.0
    }
}

impl<F> WidthProbe for F
where
    F: Fn() -> f64,
{
    fn available_width(&self) -> f64 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmeasured_width_uses_fallback() {
        for width in [0.0, -1.0, -500.0, f64::NAN] {
            assert_eq!(compute_max_visible(width), FALLBACK_VISIBLE);
        }
    }

    #[test]
    fn test_positive_width_is_clamped() {
        let mut width = 0.5;
        while width < 5000.0 {
            let visible = compute_max_visible(width);
            assert!(
                (MIN_VISIBLE..=MAX_VISIBLE).contains(&visible),
                "width {width} gave {visible}"
            );
            width += 7.25;
        }
    }

    #[test]
    fn test_formula_between_bounds() {
        // (742 - 5) / 92 = 8.01
        assert_eq!(compute_max_visible(742.0), 8);
        // (741 - 5) / 92 = 8.0 exactly
        assert_eq!(compute_max_visible(741.0), 8);
        // (740 - 5) / 92 = 7.98
        assert_eq!(compute_max_visible(740.0), 7);
    }

    #[test]
    fn test_narrow_and_wide_extremes() {
        assert_eq!(compute_max_visible(1.0), MIN_VISIBLE);
        assert_eq!(compute_max_visible(100.0), MIN_VISIBLE);
        assert_eq!(compute_max_visible(10_000.0), MAX_VISIBLE);
    }

    #[test]
    fn test_terminal_geometry() {
        // (80 - 1) / 9 = 8.7
        assert_eq!(SlotGeometry::TERMINAL.max_visible(80.0), 8);
        assert_eq!(SlotGeometry::TERMINAL.max_visible(20.0), MIN_VISIBLE);
    }

    #[test]
    fn test_probe_from_closure() {
        let probe = || 300.0;
        assert_eq!(probe.available_width(), 300.0);
        assert_eq!(FixedWidth(2.5).available_width(), 2.5);
    }
}
