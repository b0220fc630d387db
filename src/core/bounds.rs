//! Achsenparallele Bounding-Box im Pixel-Raum des Map-Layers.

use glam::DVec2;

/// Pixel-Bounding-Box (y wächst nach unten).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    /// Linke obere Ecke
    pub min: DVec2,
    /// Rechte untere Ecke
    pub max: DVec2,
}

impl PixelBounds {
    /// Box aus einem einzelnen Punkt
    pub fn from_point(point: DVec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Box über alle Punkte. `None` bei leerer Eingabe.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(*iter.next()?);
        for point in iter {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Erweitert die Box um einen Punkt.
    pub fn extend(&mut self, point: DVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Linke untere Ecke (min.x, max.y) – entspricht Südwest.
    pub fn bottom_left(&self) -> DVec2 {
        DVec2::new(self.min.x, self.max.y)
    }

    /// Rechte obere Ecke (max.x, min.y) – entspricht Nordost.
    pub fn top_right(&self) -> DVec2 {
        DVec2::new(self.max.x, self.min.y)
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Überlappung inklusive Berührung der Ränder
    pub fn intersects(&self, other: &PixelBounds) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}
