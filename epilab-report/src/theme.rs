//! Chart look-and-feel.
//!
//! All style state lives here and is passed into the chart set explicitly;
//! nothing is process-global.

use plotters::style::RGBColor;

/// Palette and font sizes shared by every chart.
#[derive(Debug, Clone)]
pub struct Theme {
    palette: Vec<(u8, u8, u8)>,
    pub caption_size: i32,
    pub label_size: i32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Ten evenly spaced hues, close to the original report's palette.
            palette: vec![
                (246, 112, 136),
                (218, 141, 53),
                (175, 160, 43),
                (107, 173, 68),
                (51, 176, 122),
                (54, 173, 169),
                (57, 168, 208),
                (130, 151, 245),
                (205, 122, 245),
                (245, 105, 201),
            ],
            caption_size: 22,
            label_size: 13,
        }
    }
}

impl Theme {
    /// Theme with a custom palette. An empty palette falls back to the default.
    pub fn from_palette(palette: Vec<(u8, u8, u8)>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Series color, cycling through the palette.
    pub fn color(&self, index: usize) -> RGBColor {
        let (r, g, b) = self.palette[index % self.palette.len()];
        RGBColor(r, g, b)
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_past_the_palette_end() {
        let theme = Theme::default();
        let len = theme.palette_len();
        assert_eq!(theme.color(0), theme.color(len));
        assert_eq!(theme.color(3), theme.color(len + 3));
    }

    #[test]
    fn empty_palette_override_falls_back_to_default() {
        let theme = Theme::from_palette(Vec::new());
        assert_eq!(theme.palette_len(), Theme::default().palette_len());
    }
}
