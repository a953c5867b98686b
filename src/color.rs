use std::sync::OnceLock;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Status;

// ---------------------------------------------------------------------------
// Status color scale
// ---------------------------------------------------------------------------

/// Yellow→red ramp over the five status codes, matching the original
/// dashboard's continuous `ylorrd` scale with its fixed (0, 4) color range.
/// Code 0 (abolished) is pale yellow, code 4 (retained) is deep red.
pub fn ramp(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            // Hue walks from yellow (52°) to red (0°); darker at the red end.
            let hsl = Hsl::new(52.0 * (1.0 - t), 0.85, 0.60 - 0.22 * t);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Color for one status code. The five-entry ramp is computed once; the map
/// view calls this per tile per frame.
pub fn status_color(status: Status) -> Color32 {
    static COLORS: OnceLock<Vec<Color32>> = OnceLock::new();
    COLORS.get_or_init(|| ramp(Status::ALL.len()))[status.code() as usize]
}

/// Legend entries (label → color) for the UI, in code order.
pub fn legend_entries() -> Vec<(String, Color32)> {
    Status::ALL
        .iter()
        .map(|&s| (s.to_string(), status_color(s)))
        .collect()
}
