use geojson::Position;

use crate::error::GeoViewerTypesError;
use crate::geo::GeoPoint;

/// GeoJSON position viewed as a geographic point. GeoJSON stores coordinates as
/// `[longitude, latitude, ...]`.
#[derive(Debug)]
pub struct GeoJsonPoint<'a>(&'a Position);

impl<'a> TryFrom<&'a Position> for GeoJsonPoint<'a> {
    type Error = GeoViewerTypesError;

    fn try_from(value: &'a Position) -> Result<Self, Self::Error> {
        if value.len() < 2 {
            Err(GeoViewerTypesError::Conversion(
                "point must contain at least 2 dimensions".to_string(),
            ))
        } else if !value[0].is_finite() || !value[1].is_finite() {
            Err(GeoViewerTypesError::Conversion(
                "point coordinates must be finite numbers".to_string(),
            ))
        } else {
            Ok(GeoJsonPoint(value))
        }
    }
}

impl GeoPoint for GeoJsonPoint<'_> {
    type Num = f64;

    fn lat(&self) -> Self::Num {
        self.0[1]
    }

    fn lon(&self) -> Self::Num {
        self.0[0]
    }
}
