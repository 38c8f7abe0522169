use foundation::{Extent, LonLat, WEB_MERCATOR_HALF_EXTENT, web_mercator_to_lon_lat};

/// Tile edge length the zoom scale is defined against.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Metres per pixel at zoom 0.
pub const ZOOM0_RESOLUTION: f64 = 2.0 * WEB_MERCATOR_HALF_EXTENT / TILE_SIZE_PX;

/// Camera over the projected plane.
///
/// Pixel coordinates have their origin at the top-left corner of the
/// viewport, `y` growing downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    center: [f64; 2],
    resolution: f64,
    size: [f64; 2],
}

impl View {
    pub fn new(center: [f64; 2], zoom: f64, size: [f64; 2]) -> Self {
        Self {
            center,
            resolution: resolution_for_zoom(zoom),
            size,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn zoom(&self) -> f64 {
        (ZOOM0_RESOLUTION / self.resolution).log2()
    }

    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    /// Projected extent currently covered by the viewport.
    pub fn visible_extent(&self) -> Extent {
        let half_w = self.size[0] * 0.5 * self.resolution;
        let half_h = self.size[1] * 0.5 * self.resolution;
        Extent::new(
            [self.center[0] - half_w, self.center[1] - half_h],
            [self.center[0] + half_w, self.center[1] + half_h],
        )
    }

    /// Pans and zooms so `extent` fills the viewport minus `padding`
    /// (`[top, right, bottom, left]` pixels).
    ///
    /// Returns `false` and leaves the view untouched for an empty extent.
    /// A zero-area extent is centred without changing the resolution.
    pub fn fit(&mut self, extent: &Extent, padding: [f64; 4]) -> bool {
        if extent.is_empty() {
            return false;
        }
        let [top, right, bottom, left] = padding;
        let avail_w = (self.size[0] - left - right).max(1.0);
        let avail_h = (self.size[1] - top - bottom).max(1.0);

        let resolution = (extent.width() / avail_w).max(extent.height() / avail_h);
        if resolution > 0.0 {
            self.resolution = resolution;
        }

        let c = extent.center();
        self.center = [
            c[0] + (right - left) * 0.5 * self.resolution,
            c[1] + (top - bottom) * 0.5 * self.resolution,
        ];
        true
    }

    pub fn pixel_to_projected(&self, pixel: [f64; 2]) -> [f64; 2] {
        [
            self.center[0] + (pixel[0] - self.size[0] * 0.5) * self.resolution,
            self.center[1] - (pixel[1] - self.size[1] * 0.5) * self.resolution,
        ]
    }

    pub fn projected_to_pixel(&self, p: [f64; 2]) -> [f64; 2] {
        [
            (p[0] - self.center[0]) / self.resolution + self.size[0] * 0.5,
            (self.center[1] - p[1]) / self.resolution + self.size[1] * 0.5,
        ]
    }

    pub fn pixel_to_lon_lat(&self, pixel: [f64; 2]) -> LonLat {
        web_mercator_to_lon_lat(self.pixel_to_projected(pixel))
    }
}

fn resolution_for_zoom(zoom: f64) -> f64 {
    ZOOM0_RESOLUTION / 2f64.powf(zoom)
}
