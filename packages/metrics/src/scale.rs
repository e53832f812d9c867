//! Seven-class quantize color scale.

use school_map_metrics_models::{ColorScheme, LegendDomain, SCHEME_CLASSES};

/// Maps continuous values in a domain onto the discrete classes of a
/// [`ColorScheme`].
///
/// The domain is cut into [`SCHEME_CLASSES`] equal-width buckets. Values
/// below the domain land in the first bucket and values above it in the
/// last.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeScale {
    scheme: ColorScheme,
    thresholds: [f64; SCHEME_CLASSES - 1],
}

impl QuantizeScale {
    /// Builds the scale for `domain` and `scheme`.
    #[must_use]
    pub fn new(domain: LegendDomain, scheme: ColorScheme) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let classes = SCHEME_CLASSES as f64;
        let mut thresholds = [0.0; SCHEME_CLASSES - 1];
        for (i, threshold) in thresholds.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let step = (i + 1) as f64;
            *threshold = domain.min + step * domain.span() / classes;
        }
        Self { scheme, thresholds }
    }

    /// Interior bucket boundaries, ascending.
    #[must_use]
    pub const fn thresholds(&self) -> &[f64; SCHEME_CLASSES - 1] {
        &self.thresholds
    }

    /// Returns the bucket index (`0..SCHEME_CLASSES`) for `value`: the
    /// number of thresholds less than or equal to it.
    #[must_use]
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    /// Returns the hex color for `value`.
    #[must_use]
    pub fn color(&self, value: f64) -> &'static str {
        self.scheme.colors()[self.bucket(value)]
    }
}
