use eframe::egui::Color32;
use palette::{Hsv, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Hue step between consecutive series (the golden angle), so that adding a
/// series never changes the colours of the ones before it.
const HUE_STEP: f32 = 137.508;

/// Colour of the `index`-th series on a chart.
pub fn series_color(index: usize) -> Color32 {
    let hue = (index as f32 * HUE_STEP) % 360.0;
    let hsv = Hsv::new(hue, 0.65, 0.9);
    let rgb: Srgb = hsv.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_stable_and_distinct() {
        let colors: Vec<Color32> = (0..6).map(series_color).collect();
        assert_eq!(colors[2], series_color(2));
        for i in 1..colors.len() {
            assert_ne!(colors[i - 1], colors[i]);
        }
    }
}
