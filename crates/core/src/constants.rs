//! Sourced physical constants.
//!
//! Every scalar the engine depends on is declared twice: once as a `pub const`
//! for direct use in arithmetic, and once as an entry in [`TABLE`] carrying
//! unit, uncertainty, and citation for display layers. The table is a
//! compile-time `static`, so it is built exactly once and never mutated.

use serde::Serialize;

/// A named scalar with unit, optional one-sigma uncertainty, and citation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalConstant {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub uncertainty: Option<f64>,
    pub source: &'static str,
}

impl PhysicalConstant {
    /// Relative uncertainty (`uncertainty / value`), if an uncertainty is recorded.
    pub fn relative_uncertainty(&self) -> Option<f64> {
        self.uncertainty
            .filter(|_| self.value != 0.0)
            .map(|u| u / self.value.abs())
    }
}

/// WGS84 equatorial (semi-major) radius in km.
pub const WGS84_SEMI_MAJOR_AXIS_KM: f64 = 6_378.137;
/// WGS84 first eccentricity squared.
pub const WGS84_ECCENTRICITY_SQUARED: f64 = 0.006_694_379_990_14;
/// Sidereal day in SI seconds.
pub const SIDEREAL_DAY_SECONDS: f64 = 86_164.090_5;
/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;
/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Seconds per Julian year (365.25 days).
pub const JULIAN_YEAR_SECONDS: f64 = 31_557_600.0;
/// Days per Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Julian day of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub const J2000_JULIAN_DAY: f64 = 2_451_545.0;
/// TT − UTC with the current leap-second count (37 s + 32.184 s).
pub const TT_MINUS_UTC_SECONDS: f64 = 69.184;
/// Mean obliquity of the ecliptic at J2000 in degrees (IAU 2006).
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_279_444;
/// General precession in longitude, arcseconds per Julian century.
pub const GENERAL_PRECESSION_ARCSEC_PER_CENTURY: f64 = 5_028.796_195;

/// Earth's mean heliocentric orbital speed in km/s.
pub const EARTH_MEAN_ORBITAL_SPEED_KM_S: f64 = 29.78;
/// Eccentricity of Earth's orbit at J2000.
pub const EARTH_ORBITAL_ECCENTRICITY: f64 = 0.016_708_6;
/// Semi-major axis of Earth's orbit in AU.
pub const EARTH_SEMI_MAJOR_AXIS_AU: f64 = 1.000_001_018;
/// Earth's mean anomaly at J2000 in degrees.
pub const EARTH_MEAN_ANOMALY_J2000_DEG: f64 = 357.529_11;
/// Earth's mean motion in degrees per day.
pub const EARTH_MEAN_MOTION_DEG_PER_DAY: f64 = 0.985_600_28;

/// Circular speed of the Local Standard of Rest around the galactic centre, km/s.
pub const GALACTIC_ORBITAL_SPEED_KM_S: f64 = 220.0;
/// One-sigma uncertainty on [`GALACTIC_ORBITAL_SPEED_KM_S`].
pub const GALACTIC_ORBITAL_SPEED_UNCERTAINTY_KM_S: f64 = 20.0;
/// Sun–galactic-centre distance in kiloparsecs.
pub const GALACTIC_CENTER_DISTANCE_KPC: f64 = 8.178;
/// One-sigma uncertainty on [`GALACTIC_CENTER_DISTANCE_KPC`].
pub const GALACTIC_CENTER_DISTANCE_UNCERTAINTY_KPC: f64 = 0.013;
/// Period of the Sun's galactic orbit in millions of years.
pub const GALACTIC_YEAR_MYR: f64 = 230.0;
/// Kilometres per kiloparsec.
pub const KM_PER_KILOPARSEC: f64 = 3.085_677_581_491_367_3e16;

/// Solar-system barycentre speed relative to the CMB rest frame, km/s.
pub const CMB_DIPOLE_SPEED_KM_S: f64 = 369.82;
/// One-sigma uncertainty on [`CMB_DIPOLE_SPEED_KM_S`].
pub const CMB_DIPOLE_SPEED_UNCERTAINTY_KM_S: f64 = 0.11;
/// Galactic longitude of the CMB dipole apex, degrees.
pub const CMB_DIPOLE_GALACTIC_LONGITUDE_DEG: f64 = 264.021;
/// Galactic latitude of the CMB dipole apex, degrees.
pub const CMB_DIPOLE_GALACTIC_LATITUDE_DEG: f64 = 48.253;
/// Local Group barycentre speed relative to the CMB rest frame, km/s.
pub const LOCAL_GROUP_CMB_SPEED_KM_S: f64 = 620.0;
/// One-sigma uncertainty on [`LOCAL_GROUP_CMB_SPEED_KM_S`].
pub const LOCAL_GROUP_CMB_SPEED_UNCERTAINTY_KM_S: f64 = 15.0;
/// Galactic longitude of the Local Group motion relative to the CMB, degrees.
pub const LOCAL_GROUP_GALACTIC_LONGITUDE_DEG: f64 = 271.9;
/// Galactic latitude of the Local Group motion relative to the CMB, degrees.
pub const LOCAL_GROUP_GALACTIC_LATITUDE_DEG: f64 = 29.6;

/// Process-wide constants table.
pub static TABLE: &[PhysicalConstant] = &[
    PhysicalConstant {
        name: "wgs84_semi_major_axis",
        value: WGS84_SEMI_MAJOR_AXIS_KM,
        unit: "km",
        uncertainty: None,
        source: "NIMA TR8350.2, World Geodetic System 1984",
    },
    PhysicalConstant {
        name: "wgs84_eccentricity_squared",
        value: WGS84_ECCENTRICITY_SQUARED,
        unit: "1",
        uncertainty: None,
        source: "NIMA TR8350.2, World Geodetic System 1984",
    },
    PhysicalConstant {
        name: "sidereal_day",
        value: SIDEREAL_DAY_SECONDS,
        unit: "s",
        uncertainty: None,
        source: "IERS Conventions (2010)",
    },
    PhysicalConstant {
        name: "astronomical_unit",
        value: AU_KM,
        unit: "km",
        uncertainty: None,
        source: "IAU 2012 Resolution B2",
    },
    PhysicalConstant {
        name: "julian_year",
        value: JULIAN_YEAR_SECONDS,
        unit: "s",
        uncertainty: None,
        source: "IAU definition (365.25 d)",
    },
    PhysicalConstant {
        name: "obliquity_j2000",
        value: OBLIQUITY_J2000_DEG,
        unit: "deg",
        uncertainty: None,
        source: "IAU 2006 precession (84381.406 arcsec)",
    },
    PhysicalConstant {
        name: "earth_mean_orbital_speed",
        value: EARTH_MEAN_ORBITAL_SPEED_KM_S,
        unit: "km/s",
        uncertainty: None,
        source: "NASA GSFC Earth Fact Sheet",
    },
    PhysicalConstant {
        name: "earth_orbital_eccentricity",
        value: EARTH_ORBITAL_ECCENTRICITY,
        unit: "1",
        uncertainty: None,
        source: "Simon et al. (1994), mean elements at J2000",
    },
    PhysicalConstant {
        name: "galactic_orbital_speed",
        value: GALACTIC_ORBITAL_SPEED_KM_S,
        unit: "km/s",
        uncertainty: Some(GALACTIC_ORBITAL_SPEED_UNCERTAINTY_KM_S),
        source: "IAU 1985 galactic constants (Kerr & Lynden-Bell 1986)",
    },
    PhysicalConstant {
        name: "galactic_center_distance",
        value: GALACTIC_CENTER_DISTANCE_KPC,
        unit: "kpc",
        uncertainty: Some(GALACTIC_CENTER_DISTANCE_UNCERTAINTY_KPC),
        source: "GRAVITY Collaboration (2019)",
    },
    PhysicalConstant {
        name: "galactic_year",
        value: GALACTIC_YEAR_MYR,
        unit: "Myr",
        uncertainty: None,
        source: "derived from R0 and Θ0",
    },
    PhysicalConstant {
        name: "cmb_dipole_speed",
        value: CMB_DIPOLE_SPEED_KM_S,
        unit: "km/s",
        uncertainty: Some(CMB_DIPOLE_SPEED_UNCERTAINTY_KM_S),
        source: "Planck 2018 results I",
    },
    PhysicalConstant {
        name: "local_group_cmb_speed",
        value: LOCAL_GROUP_CMB_SPEED_KM_S,
        unit: "km/s",
        uncertainty: Some(LOCAL_GROUP_CMB_SPEED_UNCERTAINTY_KM_S),
        source: "Kogut et al. (1993)",
    },
];

/// Look up a table entry by its snake_case name.
pub fn lookup(name: &str) -> Option<&'static PhysicalConstant> {
    TABLE.iter().find(|c| c.name == name)
}
