//! Visual theme tokens.
//!
//! Declared once and handed to the rendering layer as-is; served by the dev
//! server at `/theme.json`.

use serde::Serialize;

/// Primary brand colour.
pub const PRIMARY_MAIN: &str = "#1976d2";

/// Secondary accent colour.
pub const SECONDARY_MAIN: &str = "#dc004e";

/// A single palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub main: &'static str,
}

/// Named colour tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: PaletteColor,
    pub secondary: PaletteColor,
}

/// The storefront theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub palette: Palette,
}

/// The theme every consumer renders with.
pub const THEME: Theme = Theme {
    palette: Palette {
        primary: PaletteColor { main: PRIMARY_MAIN },
        secondary: PaletteColor {
            main: SECONDARY_MAIN,
        },
    },
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_theme_json_shape() {
        let value = serde_json::to_value(THEME).unwrap();
        assert_eq!(
            value,
            json!({
                "palette": {
                    "primary": {"main": PRIMARY_MAIN},
                    "secondary": {"main": SECONDARY_MAIN}
                }
            })
        );
    }
}
