//! Built-in theme presets, seeded on startup when absent

use super::{ColorPalette, ColorStop, Glass, Gradient, ThemeInput, ThemeMode};

struct PresetDef {
    id: &'static str,
    name: &'static str,
    mode: ThemeMode,
    angle: f64,
    stops: &'static [(&'static str, f64)],
    /// primary, secondary, accent, background, foreground, muted, border
    colors: [&'static str; 7],
    /// opacity, blur, border opacity
    glass: (f64, f64, f64),
}

const PRESETS: &[PresetDef] = &[
    PresetDef {
        id: "pastel",
        name: "Pastel",
        mode: ThemeMode::Light,
        angle: 135.0,
        stops: &[
            ("#FFE5E5", 0.0),
            ("#FFD6E8", 25.0),
            ("#E8DAFF", 50.0),
            ("#D6F0FF", 75.0),
            ("#E5FFE5", 100.0),
        ],
        colors: ["#FF69B4", "#9370DB", "#87CEEB", "#FFFFFF", "#333333", "#F5F5F5", "#E0E0E0"],
        glass: (0.25, 12.0, 0.3),
    },
    PresetDef {
        id: "cool",
        name: "Cool",
        mode: ThemeMode::Dark,
        angle: 45.0,
        stops: &[("#667EEA", 0.0), ("#764BA2", 50.0), ("#F093FB", 100.0)],
        colors: ["#667EEA", "#F093FB", "#764BA2", "#1A1A2E", "#EAEAEA", "#16213E", "#2E3A59"],
        glass: (0.15, 20.0, 0.2),
    },
    PresetDef {
        id: "bright",
        name: "Bright",
        mode: ThemeMode::Light,
        angle: 90.0,
        stops: &[
            ("#FF0080", 0.0),
            ("#FF8C00", 33.0),
            ("#40E0D0", 66.0),
            ("#FF0080", 100.0),
        ],
        colors: ["#FF0080", "#40E0D0", "#FF8C00", "#FFFFFF", "#1A1A1A", "#F8F8F8", "#E5E5E5"],
        glass: (0.2, 10.0, 0.25),
    },
    PresetDef {
        id: "collection",
        name: "Collection",
        mode: ThemeMode::Light,
        angle: 180.0,
        stops: &[("#FFD700", 0.0), ("#FFA500", 50.0), ("#FF6347", 100.0)],
        colors: ["#FFD700", "#FFA500", "#FF6347", "#FFFAF0", "#2F4F4F", "#FFF8DC", "#F0E68C"],
        glass: (0.25, 15.0, 0.35),
    },
    PresetDef {
        id: "ocean",
        name: "Ocean",
        mode: ThemeMode::Light,
        angle: 160.0,
        stops: &[("#43E97B", 0.0), ("#38F9D7", 50.0), ("#4FACFE", 100.0)],
        colors: ["#4FACFE", "#43E97B", "#38F9D7", "#F0FFFF", "#1E3A5F", "#E0F7FA", "#B2EBF2"],
        glass: (0.2, 12.0, 0.3),
    },
    PresetDef {
        id: "sunset",
        name: "Sunset",
        mode: ThemeMode::Light,
        angle: 225.0,
        stops: &[("#FA709A", 0.0), ("#FEE140", 50.0), ("#FA709A", 100.0)],
        colors: ["#FA709A", "#FEE140", "#FF6B6B", "#FFF5F5", "#4A4A4A", "#FFE5E5", "#FFB3B3"],
        glass: (0.25, 14.0, 0.3),
    },
    PresetDef {
        id: "aurora",
        name: "Aurora",
        mode: ThemeMode::Dark,
        angle: 0.0,
        stops: &[
            ("#00F260", 0.0),
            ("#0575E6", 33.0),
            ("#FF00E6", 66.0),
            ("#00F260", 100.0),
        ],
        colors: ["#00F260", "#0575E6", "#FF00E6", "#0A0E27", "#E8F4F8", "#1A1E3A", "#2A2E4A"],
        glass: (0.15, 18.0, 0.2),
    },
    PresetDef {
        id: "forest",
        name: "Forest",
        mode: ThemeMode::Light,
        angle: 120.0,
        stops: &[("#134E5E", 0.0), ("#71B280", 50.0), ("#A8E063", 100.0)],
        colors: ["#71B280", "#A8E063", "#134E5E", "#F4FFF4", "#2D5016", "#E8F5E9", "#C8E6C9"],
        glass: (0.2, 12.0, 0.3),
    },
    PresetDef {
        id: "candy",
        name: "Candy",
        mode: ThemeMode::Light,
        angle: 270.0,
        stops: &[
            ("#FF9A9E", 0.0),
            ("#FECFEF", 25.0),
            ("#FFA6F6", 50.0),
            ("#C3A6FF", 75.0),
            ("#A6D0FF", 100.0),
        ],
        colors: ["#FF9A9E", "#A6D0FF", "#FFA6F6", "#FFFAFA", "#4A3C4E", "#FFF0F5", "#FFE0EC"],
        glass: (0.25, 10.0, 0.35),
    },
    PresetDef {
        id: "purple-dream",
        name: "Purple Dream",
        mode: ThemeMode::Dark,
        angle: 315.0,
        stops: &[("#4E54C8", 0.0), ("#8F94FB", 50.0), ("#B06AB3", 100.0)],
        colors: ["#8F94FB", "#B06AB3", "#4E54C8", "#1A1A2E", "#E8E8F8", "#252540", "#3A3A5E"],
        glass: (0.18, 16.0, 0.25),
    },
    PresetDef {
        id: "flame",
        name: "Flame",
        mode: ThemeMode::Dark,
        angle: 45.0,
        stops: &[("#F37335", 0.0), ("#FDC830", 50.0), ("#FF416C", 100.0)],
        colors: ["#F37335", "#FDC830", "#FF416C", "#2A1A1A", "#FFE5CC", "#3A2020", "#5A3030"],
        glass: (0.15, 14.0, 0.2),
    },
    PresetDef {
        id: "spice",
        name: "Spice",
        mode: ThemeMode::Light,
        angle: 200.0,
        stops: &[
            ("#8E2DE2", 0.0),
            ("#4A00E0", 33.0),
            ("#FF6B9D", 66.0),
            ("#FEC860", 100.0),
        ],
        colors: ["#8E2DE2", "#FF6B9D", "#FEC860", "#FFF8F0", "#3E2C41", "#F8E8FF", "#E8CCFF"],
        glass: (0.22, 13.0, 0.32),
    },
];

impl PresetDef {
    fn to_input(&self) -> ThemeInput {
        let [primary, secondary, accent, background, foreground, muted, border] = self.colors;
        let (opacity, blur, border_opacity) = self.glass;
        ThemeInput {
            id: self.id.to_string(),
            name: self.name.to_string(),
            mode: self.mode,
            gradient: Gradient {
                angle: self.angle,
                stops: self
                    .stops
                    .iter()
                    .map(|(color, position)| ColorStop {
                        color: color.to_string(),
                        position: *position,
                    })
                    .collect(),
                blend_mode: None,
                intensity: None,
            },
            colors: ColorPalette {
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                accent: accent.to_string(),
                background: background.to_string(),
                foreground: foreground.to_string(),
                muted: muted.to_string(),
                border: border.to_string(),
            },
            glass: Glass {
                opacity,
                blur,
                border_opacity,
            },
            is_preset: true,
        }
    }
}

/// All built-in presets, in display order
pub fn builtin() -> Vec<ThemeInput> {
    PRESETS.iter().map(PresetDef::to_input).collect()
}
