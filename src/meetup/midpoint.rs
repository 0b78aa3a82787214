use crate::domain::GeoPoint;
use crate::meetup::InvalidInput;

/// Returns the unweighted mean of the latitudes and longitudes.
///
/// This is not geodesically correct: points on either side of the antimeridian or near a pole
/// average to a point far away from all of them.
pub fn compute_midpoint(points: &[GeoPoint]) -> Result<GeoPoint, InvalidInput> {
    if points.is_empty() {
        return Err(InvalidInput::NoPoints);
    }

    let (latitude, longitude) = points.iter().try_fold((Axis::default(), Axis::default()), |(lat, lng), point| {
        point.validate()?;
        Ok::<_, InvalidInput>((lat.add(point.latitude), lng.add(point.longitude)))
    })?;

    if points.len() == 1 {
        return Ok(points[0]);
    }

    let n = points.len() as f64;
    Ok(GeoPoint {
        latitude: latitude.mean(n),
        longitude: longitude.mean(n),
    })
}

/// Running sum and bounds of one coordinate axis.
struct Axis {
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for Axis {
    fn default() -> Self {
        Axis {
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Axis {
    fn add(self, value: f64) -> Self {
        Axis {
            sum: self.sum + value,
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    // Rounding in the sum may push the mean just past the inputs
    fn mean(&self, n: f64) -> f64 {
        (self.sum / n).clamp(self.min, self.max)
    }
}
