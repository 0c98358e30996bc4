use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` distinct curve colours with evenly spaced hues, starting from blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (210.0 + i as f32 / n as f32 * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.50).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: sieve test → Color32
// ---------------------------------------------------------------------------

/// Assigns each loaded sieve test its own curve colour, keyed by file path.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<PathBuf, Color32>,
}

impl ColorMap {
    /// Build a colour map for the given test files, in display order.
    pub fn new<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let paths: Vec<&Path> = paths.into_iter().collect();
        let mapping = paths
            .iter()
            .zip(generate_palette(paths.len()))
            .map(|(path, c)| (path.to_path_buf(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Colour for a test file, grey if the path is unknown.
    pub fn color_for(&self, path: &Path) -> Color32 {
        self.mapping.get(path).copied().unwrap_or(Color32::GRAY)
    }
}
