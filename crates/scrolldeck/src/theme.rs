use eframe::egui::Color32;

pub const THEME_NAMES: &[&str] = &["light", "dark"];

/// Colours and type sizes for slides and the navigation chrome drawn over them.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color32,
    pub text: Color32,
    pub heading: Color32,
    /// Progress fill and the active dot.
    pub accent: Color32,
    /// Inactive dots, counter, links and the fullscreen icon.
    pub chrome: Color32,
    pub key_cap: Color32,
    pub heading_size: f32,
    pub body_size: f32,
    /// Opacity of slides that are scrolled into view but not active.
    pub inactive_opacity: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color32::from_rgb(0x11, 0x14, 0x1B),
            text: Color32::from_rgb(0xD4, 0xD8, 0xE0),
            heading: Color32::from_rgb(0xF4, 0xF6, 0xFA),
            accent: Color32::from_rgb(0x4F, 0xA3, 0xF7),
            chrome: Color32::from_rgb(0x8A, 0x93, 0xA3),
            key_cap: Color32::from_rgb(0x26, 0x2C, 0x38),
            heading_size: 72.0,
            body_size: 40.0,
            inactive_opacity: 0.35,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color32::from_rgb(0xFB, 0xFB, 0xF8),
            text: Color32::from_rgb(0x2A, 0x2E, 0x37),
            heading: Color32::from_rgb(0x10, 0x18, 0x2B),
            accent: Color32::from_rgb(0x1F, 0x6F, 0xD1),
            chrome: Color32::from_rgb(0x7A, 0x80, 0x8C),
            key_cap: Color32::from_rgb(0xE8, 0xEA, 0xEE),
            heading_size: 72.0,
            body_size: 40.0,
            inactive_opacity: 0.3,
        }
    }

    /// Unknown names fall back to the light theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using light");
                Self::light()
            }
        }
    }

    pub fn fade(color: Color32, opacity: f32) -> Color32 {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    /// Opacity for a slide, by whether the controller marked it active.
    pub fn slide_opacity(&self, active: bool) -> f32 {
        if active { 1.0 } else { self.inactive_opacity }
    }
}
