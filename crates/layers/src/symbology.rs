/// Relative path of the flood marker icon, as served with the front-end assets.
pub const FLOOD_ICON_SRC: &str = "assets/flood-icon.svg";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: [f32; 4],
    pub width_px: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub src: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub visible: bool,
    pub opacity: f32,
    pub z_index: i32,
    pub stroke: Option<Stroke>,
    pub fill: Option<[f32; 4]>,
    pub icon: Option<IconStyle>,
}

impl LayerStyle {
    pub fn basemap() -> Self {
        Self {
            z_index: 0,
            ..Self::default()
        }
    }

    /// Blue outline with a translucent fill.
    pub fn outline(z_index: i32) -> Self {
        Self {
            z_index,
            stroke: Some(Stroke {
                color: [0.2, 0.6, 0.8, 1.0],
                width_px: 1.25,
            }),
            fill: Some([1.0, 1.0, 1.0, 0.4]),
            ..Self::default()
        }
    }

    pub fn icons(src: impl Into<String>, opacity: f32, z_index: i32) -> Self {
        Self {
            z_index,
            icon: Some(IconStyle {
                src: src.into(),
                opacity,
            }),
            ..Self::default()
        }
    }

    pub fn flood_icons() -> Self {
        Self::icons(FLOOD_ICON_SRC, 0.8, 2)
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            z_index: 0,
            stroke: None,
            fill: None,
            icon: None,
        }
    }
}
