use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// XYZ tile basemap.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    id: LayerId,
    pub style: LayerStyle,
    pub url_template: String,
}

impl TileLayer {
    pub fn new(id: LayerId, url_template: impl Into<String>) -> Self {
        Self {
            id,
            style: LayerStyle::basemap(),
            url_template: url_template.into(),
        }
    }
}

impl Layer for TileLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn z_index(&self) -> i32 {
        self.style.z_index
    }
}

#[cfg(test)]
mod tests {
    use super::{OSM_TILE_URL, TileLayer};
    use crate::layer::{Layer, LayerId};

    #[test]
    fn basemap_sits_at_the_bottom() {
        let layer = TileLayer::new(LayerId(1), OSM_TILE_URL);
        assert_eq!(layer.z_index(), 0);
        assert_eq!(layer.url_template, "https://tile.openstreetmap.org/{z}/{x}/{y}.png");
    }
}
