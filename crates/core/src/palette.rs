//! Discrete palettes of semi-transparent point colors.
//!
//! Each point draws one color from its palette at creation time and keeps
//! it for its whole lifetime. Sampling is uniform over the palette entries.

use crate::color::Rgba;
use crate::error::FieldError;
use crate::prng::RandomSource;

/// Names of the built-in palettes, in display order.
const PALETTE_NAMES: &[&str] = &["violet", "ocean", "ember", "mono"];

/// A non-empty list of colors sampled uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Rgba>) -> Result<Self, FieldError> {
        if colors.is_empty() {
            return Err(FieldError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing color strings (`#rrggbb[aa]` or CSS `rgba(...)`).
    pub fn parse(specs: &[&str]) -> Result<Self, FieldError> {
        let colors = specs
            .iter()
            .map(|s| Rgba::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette entries in order.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Draws one color uniformly at random.
    pub fn pick(&self, rng: &mut impl RandomSource) -> Rgba {
        self.colors[rng.next_index(self.colors.len())]
    }

    // -- Built-in palettes --

    /// Three purple tones at 30% opacity. The default point palette.
    pub fn violet() -> Self {
        Self {
            colors: vec![
                Rgba::new(139, 92, 246, 0.3),
                Rgba::new(124, 58, 237, 0.3),
                Rgba::new(167, 139, 250, 0.3),
            ],
        }
    }

    /// Teal and cyan tones.
    pub fn ocean() -> Self {
        Self {
            colors: vec![
                Rgba::new(10, 147, 150, 0.3),
                Rgba::new(0, 95, 115, 0.3),
                Rgba::new(148, 210, 189, 0.3),
            ],
        }
    }

    /// Warm reds and oranges.
    pub fn ember() -> Self {
        Self {
            colors: vec![
                Rgba::new(204, 0, 0, 0.3),
                Rgba::new(255, 69, 0, 0.3),
                Rgba::new(255, 140, 0, 0.3),
            ],
        }
    }

    /// Grays.
    pub fn mono() -> Self {
        Self {
            colors: vec![
                Rgba::new(64, 64, 64, 0.3),
                Rgba::new(128, 128, 128, 0.3),
                Rgba::new(192, 192, 192, 0.3),
            ],
        }
    }

    /// Looks up a built-in palette by name.
    ///
    /// Returns `FieldError::UnknownPalette` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "violet" => Ok(Self::violet()),
            "ocean" => Ok(Self::ocean()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            _ => Err(FieldError::UnknownPalette(name.to_string())),
        }
    }

    /// Names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::violet()
    }
}
