//! Circular longitude arithmetic shared by every calculator.

/// Normalizes an angle to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Signed difference `a - b` wrapped to (-180, 180].
pub fn wrap_180(deg: f64) -> f64 {
    let r = normalize_degrees(deg);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Unsigned angular separation in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Degrees, minutes and seconds of an angle in [0, 360).
pub fn to_dms(deg: f64) -> (u16, u8, f64) {
    let d = deg.floor();
    let min_total = (deg - d) * 60.0;
    let m = min_total.floor();
    let s = (min_total - m) * 60.0;
    (d as u16, m as u8, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-17), 0.0);
    }

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(190.0), -170.0);
        assert_eq!(wrap_180(-190.0), 170.0);
        assert_eq!(wrap_180(180.0), 180.0);
        assert_eq!(wrap_180(-180.0), 180.0);
    }

    #[test]
    fn test_angular_separation_across_seam() {
        assert_eq!(angular_separation(350.0, 10.0), 20.0);
        assert_eq!(angular_separation(10.0, 350.0), 20.0);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_to_dms() {
        let (d, m, s) = to_dms(12.5);
        assert_eq!((d, m), (12, 30));
        assert!(s.abs() < 1e-9);
    }
}
