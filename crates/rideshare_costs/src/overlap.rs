use crate::model::RouteSegment;

/// Axis aligned box in (lng, lat) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    min: geo_types::Coord<f64>,
    max: geo_types::Coord<f64>,
}

impl BBox {
    pub fn extend<C>(&mut self, coord: C)
    where
        C: Into<geo_types::Coord<f64>>,
    {
        let coord = coord.into();
        self.min.x = self.min.x.min(coord.x);
        self.min.y = self.min.y.min(coord.y);
        self.max.x = self.max.x.max(coord.x);
        self.max.y = self.max.y.max(coord.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        other.min.x <= self.max.x
            && other.min.y <= self.max.y
            && self.min.x <= other.max.x
            && self.min.y <= other.max.y
    }

    pub fn intersection_area(&self, other: &BBox) -> f64 {
        let width = (self.max.x.min(other.max.x) - self.min.x.max(other.min.x)).max(0.0);
        let height = (self.max.y.min(other.max.y) - self.min.y.max(other.min.y)).max(0.0);
        width * height
    }
}

impl Default for BBox {
    fn default() -> Self {
        BBox {
            min: geo_types::Coord {
                x: f64::MAX,
                y: f64::MAX,
            },
            max: geo_types::Coord {
                x: f64::MIN,
                y: f64::MIN,
            },
        }
    }
}

/// Share of the smaller segment's bounding box covered by the other one, in [0, 1].
///
/// This is a coarse "same corridor" proxy, not a path intersection. A segment whose
/// endpoints share a latitude or a longitude has no area and never overlaps anything.
pub fn overlap(a: &RouteSegment, b: &RouteSegment) -> f64 {
    overlap_bbox(&a.bbox(), &b.bbox())
}

pub fn overlap_bbox(a: &BBox, b: &BBox) -> f64 {
    let smaller_area = a.area().min(b.area());
    if !smaller_area.is_finite() || smaller_area <= 0.0 {
        return 0.0;
    }

    let score = a.intersection_area(b) / smaller_area;
    if score.is_nan() {
        return 0.0;
    }

    score.clamp(0.0, 1.0)
}
