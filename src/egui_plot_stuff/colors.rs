use egui::Color32;

/// Colours handed out to multi-curve overlays, in assignment order.
pub const PALETTE: [(Color32, &str); 10] = [
    (Color32::from_rgb(0, 0, 0), "Black"),
    (Color32::from_rgb(255, 0, 0), "Red"),
    (Color32::from_rgb(0, 0, 255), "Blue"),
    (Color32::from_rgb(255, 0, 255), "Magenta"),
    (Color32::from_rgb(0, 255, 255), "Cyan"),
    (Color32::from_rgb(89, 212, 84), "Green"),
    (Color32::from_rgb(89, 84, 217), "Violet"),
    (Color32::from_rgb(212, 89, 84), "Salmon"),
    (Color32::from_rgb(125, 153, 209), "Steel Blue"),
    (Color32::from_rgb(171, 166, 191), "Lilac Gray"),
];

pub const GRID: Color32 = Color32::from_rgb(210, 210, 210);
pub const FRAME: Color32 = Color32::BLACK;
pub const BACKGROUND: Color32 = Color32::WHITE;

pub fn palette_color(i: usize) -> Color32 {
    PALETTE[i % PALETTE.len()].0
}

pub fn color_name(color: Color32) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, name)| *name)
}

/// `#rrggbb`, as used in SVG paint attributes.
pub fn to_hex_rgb(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(to_hex_rgb(Color32::from_rgb(255, 0, 16)), "#ff0010");
        assert_eq!(to_hex_rgb(palette_color(0)), "#000000");
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(10), palette_color(0));
        assert_eq!(color_name(palette_color(1)), Some("Red"));
        assert_eq!(color_name(Color32::from_rgb(1, 2, 3)), None);
    }
}
