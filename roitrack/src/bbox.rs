//! Region-of-interest rectangles and IoU calculation

use std::fmt;

/// Axis-aligned rectangle in pixel coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Roi {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Roi {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from bounds [xmin, ymin, xmax, ymax]
    pub fn from_bounds(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    /// Convert to bounds [xmin, ymin, xmax, ymax]
    pub fn to_bounds(&self) -> [f64; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle covers no pixels, or holds non-finite values
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.to_bounds().iter().all(|v| v.is_finite())
    }

    /// Overlapping part of two regions, `None` if they do not overlap
    pub fn intersection(&self, other: &Roi) -> Option<Roi> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Roi::from_bounds(x1, y1, x2, y2))
    }

    /// Intersection over union with another region
    pub fn iou(&self, other: &Roi) -> f64 {
        let Some(inter) = self.intersection(other) else {
            return 0.0;
        };

        let intersection = inter.area();
        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }

    /// Clip the rectangle to a `width` x `height` frame
    pub fn clamp_to(&self, width: f64, height: f64) -> Roi {
        let x1 = self.x.clamp(0.0, width);
        let y1 = self.y.clamp(0.0, height);
        let x2 = self.right().clamp(0.0, width);
        let y2 = self.bottom().clamp(0.0, height);
        Roi::from_bounds(x1, y1, x2.max(x1), y2.max(y1))
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roi({:.1}, {:.1}, {:.1}x{:.1})",
            self.x, self.y, self.width, self.height
        )
    }
}
