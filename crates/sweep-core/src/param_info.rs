//! Parameter introspection for host-style control surfaces.
//!
//! The [`ParameterInfo`] trait exposes a processor's parameters through
//! zero-based indices, each described by a [`ParamDescriptor`]. Control
//! surfaces, preset loaders and the CLI all drive the engine through this
//! interface; the strongly-typed [`FlangerParams`](crate::FlangerParams)
//! record sits behind it.
//!
//! Values cross the interface in *natural units* (seconds, Hz, plain gain).
//! [`ParameterInfo::get_param_normalized`] and
//! [`ParameterInfo::set_param_normalized`] convert through the descriptor's
//! [`ParamScale`] for hosts that speak `[0, 1]`.
//!
//! Unknown indices are never an error: `set` ignores them and `get` returns
//! `0.0`.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`; values at
///   or below `min` map to 0 and the curve needs `min > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Needs a positive minimum; ranges that
    /// start at zero behave linearly.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned a `ParamId` never changes for a given parameter; presets and
/// automation refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter takes discrete integer steps (selectors, toggles).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit used to format a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Stored in seconds, displayed in milliseconds.
    Seconds,
    /// Hertz.
    Hertz,
    /// Dimensionless gain or ratio.
    None,
}

impl ParamUnit {
    /// Unit suffix used by [`ParamDescriptor::format_value`].
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Seconds => " ms",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

/// Metadata for one parameter: display names, range, default and scaling.
///
/// # Example
///
/// ```rust
/// use sweep_core::{ParamDescriptor, ParamId};
///
/// let delay = ParamDescriptor::seconds("Delay", "Delay", 0.0, 0.05, 0.0025)
///     .with_id(ParamId(100), "delay");
/// assert_eq!(delay.clamp(1.0), 0.05);
/// assert_eq!(delay.format_value(0.0025), "2.50 ms");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short name (8 characters or less) for narrow displays.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum value in natural units.
    pub min: f32,
    /// Maximum value in natural units.
    pub max: f32,
    /// Default value in natural units.
    pub default: f32,
    /// Suggested increment for encoders; `1.0` for stepped parameters.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID, used as the preset key.
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Labels for each step of a stepped parameter, indexed from `min`.
    pub step_labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Dimensionless parameter with a custom range.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            step_labels: &[],
        }
    }

    /// Time parameter stored in seconds.
    pub const fn seconds(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            unit: ParamUnit::Seconds,
            step: 0.0001,
            ..Self::custom(name, short_name, min, max, default)
        }
    }

    /// LFO rate in Hz.
    pub const fn rate_hz(min: f32, max: f32, default: f32) -> Self {
        Self {
            unit: ParamUnit::Hertz,
            step: 0.01,
            ..Self::custom("Rate", "Rate", min, max, default)
        }
    }

    /// Discrete selector whose values are indices into `labels`.
    pub const fn selector(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: f32,
    ) -> Self {
        Self {
            step: 1.0,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            step_labels: labels,
            ..Self::custom(name, short_name, 0.0, (labels.len() - 1) as f32, default)
        }
    }

    /// Sets the stable numeric and string IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the encoder step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Returns `true` for selectors and toggles.
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps `value` into `[min, max]`. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Natural value → `[0, 1]`, following [`ParamScale`].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= self.min {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// `[0, 1]` → natural value, inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let value = match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    self.min + normalized * (self.max - self.min)
                } else {
                    self.min * libm::powf(self.max / self.min, normalized)
                }
            }
        };
        if self.is_stepped() {
            libm::roundf(value)
        } else {
            value
        }
    }

    /// Formats `value` for display, using step labels where present.
    pub fn format_value(&self, value: f32) -> String {
        if self.is_stepped() && !self.step_labels.is_empty() {
            let index = libm::roundf(self.clamp(value) - self.min) as usize;
            if let Some(label) = self.step_labels.get(index) {
                return String::from(*label);
            }
        }
        match self.unit {
            ParamUnit::Seconds => format!("{:.2}{}", value * 1000.0, self.unit.suffix()),
            ParamUnit::Hertz => format!("{:.2}{}", value, self.unit.suffix()),
            ParamUnit::None => format!("{value:.2}"),
        }
    }
}

/// Index-based parameter access.
///
/// Implementors clamp values on `set_param` and ignore unknown indices;
/// `get_param` returns `0.0` for unknown indices.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value in natural units, `0.0` for unknown indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets a value in natural units. Out-of-range values are clamped,
    /// unknown indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Current value normalized to `[0, 1]`, `0.0` for unknown indices.
    fn get_param_normalized(&self, index: usize) -> f32 {
        self.param_info(index)
            .map_or(0.0, |desc| desc.normalize(self.get_param(index)))
    }

    /// Sets a value from `[0, 1]`. Unknown indices are ignored.
    fn set_param_normalized(&mut self, index: usize, normalized: f32) {
        if let Some(desc) = self.param_info(index) {
            self.set_param(index, desc.denormalize(normalized));
        }
    }

    /// Display text for the current value, empty for unknown indices.
    fn param_text(&self, index: usize) -> String {
        self.param_info(index)
            .map(|desc| desc.format_value(self.get_param(index)))
            .unwrap_or_default()
    }

    /// Finds a parameter by name, short name or string ID (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
