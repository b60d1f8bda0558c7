//! Rotations between the frames engines answer in and ecliptic J2000.

use worldline_core::Epoch;
use worldline_core::constants::{GENERAL_PRECESSION_ARCSEC_PER_CENTURY, OBLIQUITY_J2000_DEG};
use worldline_core::vector::{self, Vector3};

use crate::engine::NativeFrame;

/// Equatorial J2000 → ecliptic J2000.
pub fn equatorial_to_ecliptic(v: &Vector3) -> Vector3 {
    vector::rotate_x(v, -OBLIQUITY_J2000_DEG.to_radians())
}

/// Ecliptic J2000 → equatorial J2000.
pub fn ecliptic_to_equatorial(v: &Vector3) -> Vector3 {
    vector::rotate_x(v, OBLIQUITY_J2000_DEG.to_radians())
}

/// Ecliptic of date → ecliptic J2000, removing accumulated general precession
/// in longitude. Motion of the ecliptic plane itself (~47″/century) is ignored.
pub fn ecliptic_of_date_to_j2000(v: &Vector3, epoch: Epoch) -> Vector3 {
    let precession_arcsec = GENERAL_PRECESSION_ARCSEC_PER_CENTURY * epoch.centuries_since_j2000();
    vector::rotate_z(v, -(precession_arcsec / 3_600.0).to_radians())
}

/// Convert a vector from `frame` into ecliptic J2000.
pub fn to_ecliptic_j2000(v: &Vector3, frame: NativeFrame, epoch: Epoch) -> Vector3 {
    match frame {
        NativeFrame::EclipticJ2000 => *v,
        NativeFrame::EquatorialJ2000 => equatorial_to_ecliptic(v),
        NativeFrame::EclipticOfDate => ecliptic_of_date_to_j2000(v, epoch),
    }
}
