use crate::error::{KnotloopError, KnotloopResult};

/// RGB color with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (leading `#` optional).
    pub fn from_hex(s: &str) -> KnotloopResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(KnotloopError::configuration(format!(
                "invalid hex color '{s}': expected 6 hex digits"
            )));
        }
        let v = u32::from_str_radix(hex, 16).map_err(|_| {
            KnotloopError::configuration(format!("invalid hex color '{s}'"))
        })?;
        Ok(Self {
            r: f64::from((v >> 16) & 0xff) / 255.0,
            g: f64::from((v >> 8) & 0xff) / 255.0,
            b: f64::from(v & 0xff) / 255.0,
        })
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
        }
    }
}

/// Evenly spaced multi-stop linear gradient over [0, 1].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientLinear {
    stops: Vec<Rgb>,
}

impl GradientLinear {
    pub fn new(stops: Vec<Rgb>) -> KnotloopResult<Self> {
        if stops.is_empty() {
            return Err(KnotloopError::configuration(
                "GradientLinear needs at least one stop",
            ));
        }
        Ok(Self { stops })
    }

    pub fn from_hex(stops: &[&str]) -> KnotloopResult<Self> {
        Self::new(stops.iter().map(|s| Rgb::from_hex(s)).collect::<KnotloopResult<_>>()?)
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Color at key `t`, clamped into [0, 1].
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        if self.stops.len() == 1 {
            return self.stops[0];
        }
        let scaled = t * (self.stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(self.stops.len() - 2);
        Rgb::lerp(self.stops[i], self.stops[i + 1], scaled - i as f64)
    }
}

/// How strokes resolve their color at build time. Both policies are used by
/// the shipped presets: continuous gradients keyed by `i / N`, and discrete
/// palettes indexed modulo their length.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    Gradient(GradientLinear),
    Indexed(Vec<Rgb>),
}

impl ColorMode {
    pub fn validate(&self) -> KnotloopResult<()> {
        match self {
            Self::Gradient(_) => Ok(()),
            Self::Indexed(palette) => {
                if palette.is_empty() {
                    return Err(KnotloopError::configuration(
                        "discrete palette must not be empty",
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn color_for(&self, index: usize, count: usize) -> KnotloopResult<Rgb> {
        match self {
            Self::Gradient(g) => Ok(g.color_at(index as f64 / count.max(1) as f64)),
            Self::Indexed(palette) => palette
                .get(index % palette.len().max(1))
                .copied()
                .ok_or_else(|| KnotloopError::configuration("discrete palette is empty")),
        }
    }
}
