//! Truncated ELP-2000/82 lunar series (main periodic terms as tabulated by Meeus).
//!
//! Accuracy is a few arcminutes in longitude and a few hundred km in distance,
//! which is ample for placing the Moon in a rendered scene.

use worldline_core::Epoch;
use worldline_core::constants::AU_KM;
use worldline_core::vector::Vector3;

/// Multiples of D, M, M', F followed by the longitude (1e-6 deg) and distance (1e-3 km) amplitudes.
const LONGITUDE_DISTANCE_TERMS: &[(i8, i8, i8, i8, f64, f64)] = &[
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
];

/// Multiples of D, M, M', F followed by the latitude amplitude (1e-6 deg).
const LATITUDE_TERMS: &[(i8, i8, i8, i8, f64)] = &[
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
];

const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Geocentric ecliptic longitude, latitude (degrees), and distance (km),
/// referred to the mean ecliptic and equinox of date.
pub fn spherical_of_date(epoch: Epoch) -> (f64, f64, f64) {
    let t = epoch.centuries_since_j2000();
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_prime = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m_prime = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        (f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * m_prime + f64::from(cf) * f)
            .to_radians()
    };
    let eccentricity_factor = |cm: i8| e.powi(i32::from(cm.unsigned_abs()));

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, amp_l, amp_r) in LONGITUDE_DISTANCE_TERMS {
        let arg = argument(cd, cm, cmp, cf);
        let factor = eccentricity_factor(cm);
        sum_l += amp_l * factor * arg.sin();
        sum_r += amp_r * factor * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, amp_b) in LATITUDE_TERMS {
        sum_b += amp_b * eccentricity_factor(cm) * argument(cd, cm, cmp, cf).sin();
    }

    sum_l += 3_958.0 * a1.to_radians().sin()
        + 1_962.0 * (l_prime - f).to_radians().sin()
        + 318.0 * a2.to_radians().sin();
    sum_b += -2_235.0 * l_prime.to_radians().sin()
        + 382.0 * a3.to_radians().sin()
        + 175.0 * (a1 - f).to_radians().sin()
        + 175.0 * (a1 + f).to_radians().sin()
        + 127.0 * (l_prime - m_prime).to_radians().sin()
        - 115.0 * (l_prime + m_prime).to_radians().sin();

    let longitude = (l_prime + sum_l / 1e6).rem_euclid(360.0);
    let latitude = sum_b / 1e6;
    let distance_km = MEAN_DISTANCE_KM + sum_r / 1_000.0;
    (longitude, latitude, distance_km)
}

/// Geocentric Cartesian position in AU, ecliptic of date.
pub fn position_of_date_au(epoch: Epoch) -> Vector3 {
    let (lon, lat, dist_km) = spherical_of_date(epoch);
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let r = dist_km / AU_KM;
    [r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_meeus_example_47a() {
        // 1992 April 12, 0h TD: λ = 133.162655°, β = -3.229126°, Δ = 368409.7 km.
        let epoch = Epoch::from_julian_day_tt(2_448_724.5);
        let (lon, lat, dist) = spherical_of_date(epoch);
        assert!((lon - 133.162_655).abs() < 0.05, "longitude {lon}");
        assert!((lat + 3.229_126).abs() < 0.05, "latitude {lat}");
        assert!((dist - 368_409.7).abs() < 150.0, "distance {dist}");
    }

    #[test]
    fn distance_stays_within_perigee_apogee_envelope() {
        for i in 0..60 {
            let epoch = Epoch::J2000.add_days(f64::from(i) * 1.7);
            let (_, lat, dist) = spherical_of_date(epoch);
            assert!((356_000.0..407_000.0).contains(&dist), "distance {dist}");
            assert!(lat.abs() < 5.4, "latitude {lat}");
        }
    }
}
