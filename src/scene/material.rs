use serde::{Deserialize, Serialize};

/// Density assumed for solutions without a material (steel).
pub const DEFAULT_DENSITY: f64 = 7.85;

/// Surface and mass properties of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    /// Density in g/cm³.
    pub density: f64,
    pub color_rgb: (u8, u8, u8),
    /// `0.0` is opaque, `1.0` fully transparent.
    pub transparency: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            density: 1.0,
            color_rgb: (128, 128, 128),
            transparency: 0.0,
        }
    }
}

impl Material {
    /// Creates an opaque grey material.
    #[must_use]
    pub fn new(name: impl Into<String>, density: f64) -> Self {
        Self {
            name: name.into(),
            density,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn steel() -> Self {
        Self::new("Steel", DEFAULT_DENSITY).with_color((70, 130, 180))
    }

    #[must_use]
    pub fn aluminum() -> Self {
        Self::new("Aluminum", 2.7).with_color((192, 192, 192))
    }

    #[must_use]
    pub fn copper() -> Self {
        Self::new("Copper", 8.96).with_color((184, 115, 51))
    }

    /// Looks up a preset by name, ignoring case.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "steel" => Some(Self::steel()),
            "aluminum" | "aluminium" => Some(Self::aluminum()),
            "copper" => Some(Self::copper()),
            _ => None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color_rgb: (u8, u8, u8)) -> Self {
        self.color_rgb = color_rgb;
        self
    }

    #[must_use]
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}
