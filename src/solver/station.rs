use chrono::{DateTime, Utc};

use crate::solver::error::SolverError;
use crate::solver::provider::{Geodesy, LookAngles, ObserverFrame};
use crate::solver::vector::{norm, normalize, sub, Vec3};

// WGS-84
const EARTH_RADIUS_KM: f64 = 6378.137;
const ECCENTRICITY_SQ: f64 = 0.006_694_379_990_14;

/// WGS-84 geodesy with SGP4 sidereal time, placing observers in TEME.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84;

impl Geodesy for Wgs84 {
    type Frame = GroundStation;

    fn resolve_observer(
        &self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<GroundStation, SolverError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() || !altitude_m.is_finite() {
            return Err(SolverError::InvalidCoordinate(format!(
                "non-finite observer position ({}, {}, {} m)",
                latitude_deg, longitude_deg, altitude_m
            )));
        }
        Ok(GroundStation {
            latitude_deg,
            longitude_deg,
            altitude_m,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GroundStation {
    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> Vec3 {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = EARTH_RADIUS_KM / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - ECCENTRICITY_SQ) + alt_km) * sin_lat,
        ]
    }
}

impl ObserverFrame for GroundStation {
    fn position_km(&self, at: DateTime<Utc>) -> Vec3 {
        ecef_to_teme(self.position_ecef_km(), sidereal_time(at))
    }

    fn direction(&self, azimuth_deg: f64, elevation_deg: f64, at: DateTime<Utc>) -> Vec3 {
        let az = azimuth_deg.to_radians();
        let el = elevation_deg.to_radians();
        let enu = [az.sin() * el.cos(), az.cos() * el.cos(), el.sin()];
        let ecef = enu_to_ecef(enu, self.lat_rad(), self.lon_rad());
        normalize(&ecef_to_teme(ecef, sidereal_time(at)))
    }

    fn look_angles(&self, target_km: &Vec3, at: DateTime<Utc>) -> LookAngles {
        let target_ecef = teme_to_ecef(*target_km, sidereal_time(at));
        let dr = sub(&target_ecef, &self.position_ecef_km());
        let range_km = norm(&dr);

        let (east, north, up) = ecef_to_enu(dr, self.lat_rad(), self.lon_rad());
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
        let elevation_deg = if range_km > 0.0 {
            (up / range_km).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            0.0
        };

        LookAngles {
            elevation_deg,
            azimuth_deg,
            range_km,
        }
    }
}

pub fn sidereal_time(at: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()))
}

pub fn teme_to_ecef(pos_teme: Vec3, gmst: f64) -> Vec3 {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn ecef_to_teme(pos_ecef: Vec3, gmst: f64) -> Vec3 {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_ecef[0] * cos_gmst - pos_ecef[1] * sin_gmst,
        pos_ecef[0] * sin_gmst + pos_ecef[1] * cos_gmst,
        pos_ecef[2],
    ]
}

pub fn ecef_to_enu(dr: Vec3, lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

pub fn enu_to_ecef(enu: Vec3, lat_rad: f64, lon_rad: f64) -> Vec3 {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();
    let [east, north, up] = enu;

    [
        -sin_lon * east - sin_lat * cos_lon * north + cos_lat * cos_lon * up,
        cos_lon * east - sin_lat * sin_lon * north + cos_lat * sin_lon * up,
        cos_lat * north + sin_lat * up,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::vector::dot;
    use chrono::TimeZone;

    fn station(lat: f64, lon: f64) -> GroundStation {
        Wgs84.resolve_observer(lat, lon, 0.0).unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 21, 6, 30, 0).unwrap()
    }

    #[test]
    fn equator_prime_meridian_ecef() {
        let pos = station(0.0, 0.0).position_ecef_km();
        assert!((pos[0] - EARTH_RADIUS_KM).abs() < 1e-9);
        assert!(pos[1].abs() < 1e-9);
        assert!(pos[2].abs() < 1e-9);
    }

    #[test]
    fn altitude_raises_station_along_normal() {
        let low = Wgs84.resolve_observer(45.0, 10.0, 0.0).unwrap();
        let high = Wgs84.resolve_observer(45.0, 10.0, 1000.0).unwrap();
        let lifted = sub(&high.position_ecef_km(), &low.position_ecef_km());
        assert!((norm(&lifted) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn teme_ecef_roundtrip() {
        let v = [1234.5, -6789.0, 42.0];
        let back = ecef_to_teme(teme_to_ecef(v, 1.234), 1.234);
        for k in 0..3 {
            assert!((back[k] - v[k]).abs() < 1e-9);
        }
    }

    #[test]
    fn zenith_direction_is_radial_at_equator() {
        let gs = station(0.0, 0.0);
        let zenith = gs.direction(0.0, 90.0, at());
        let radial = normalize(&gs.position_km(at()));
        assert!((dot(&zenith, &radial) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn direction_is_unit_length() {
        let gs = station(51.67, 39.2);
        let d = gs.direction(215.0, 17.5, at());
        assert!((norm(&d) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn look_angles_recover_pointing() {
        let gs = station(51.67, 39.2);
        let dir = gs.direction(215.0, 17.5, at());
        let obs = gs.position_km(at());
        let target = [
            obs[0] + 1500.0 * dir[0],
            obs[1] + 1500.0 * dir[1],
            obs[2] + 1500.0 * dir[2],
        ];
        let look = gs.look_angles(&target, at());
        assert!((look.azimuth_deg - 215.0).abs() < 1e-6);
        assert!((look.elevation_deg - 17.5).abs() < 1e-6);
        assert!((look.range_km - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_observer_is_rejected() {
        assert!(matches!(
            Wgs84.resolve_observer(f64::NAN, 0.0, 0.0),
            Err(SolverError::InvalidCoordinate(_))
        ));
    }
}
