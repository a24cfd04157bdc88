//! Color helpers and fixed scene colors (0xRRGGBB)

/// Water gradient, surface to floor
pub const WATER_BANDS: [u32; 5] = [0x00C9E0, 0x009DBF, 0x0070A0, 0x004E82, 0x003466];
pub const SAND_TOP: u32 = 0xF5E0B0;
pub const SAND_BOTTOM: u32 = 0xC8A050;
pub const BUBBLE: u32 = 0x9BE1FF;
pub const EEL_BODY: u32 = 0x3D8B37;
pub const EEL_BELLY: u32 = 0xB8D86B;
pub const WARNING_FILL: u32 = 0xFFD700;
pub const WARNING_STROKE: u32 = 0xFF4500;
/// Far-to-near silhouette colors for the parallax layers
pub const LAYER_COLORS: [u32; 4] = [0x0A5C8A, 0x0B4F78, 0x1E6B4F, 0x2E8B57];

fn channels(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Shift every channel by `amount`, saturating
pub fn adjust(color: u32, amount: i32) -> u32 {
    let (r, g, b) = channels(color);
    let shift = |c: u8| (c as i32 + amount).clamp(0, 255) as u32;
    (shift(r) << 16) | (shift(g) << 8) | shift(b)
}

/// CSS `rgba(...)` string
pub fn css(color: u32, alpha: f32) -> String {
    let (r, g, b) = channels(color);
    let alpha = if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("rgba({},{},{},{:.3})", r, g, b, alpha)
}
