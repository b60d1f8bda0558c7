//! Engine backed by the CSPICE toolkit, answering in the equatorial `J2000` frame.

use std::ffi::{CStr, CString};
use std::sync::{Mutex, MutexGuard, OnceLock};

use cspice_sys::{
    SpiceBoolean, SpiceDouble, SpiceInt, erract_c, failed_c, furnsh_c, getmsg_c, kclear_c,
    pxform_c, reset_c, spkezr_c, unitim_c,
};
use worldline_core::constants::{AU_KM, SECONDS_PER_DAY};
use worldline_core::{BodyId, Epoch};

use crate::EphemerisError;
use crate::engine::{EphemerisEngine, NativeFrame, NativeState};
use crate::kernels::{KERNEL_CATALOG, KernelDescriptor};
use crate::orientation::BodyOrientation;

static INITIALIZED: OnceLock<()> = OnceLock::new();
static INITIALIZE_LOCK: Mutex<()> = Mutex::new(());

/// Engine over the kernels in [`KERNEL_CATALOG`]. CSPICE keeps global state,
/// so every query is serialised through one lock.
#[derive(Debug, Default)]
pub struct SpiceEngine {
    query_lock: Mutex<()>,
}

impl SpiceEngine {
    /// Load kernels (once per process) and return an engine.
    pub fn load() -> Result<Self, EphemerisError> {
        load_default_kernels()?;
        Ok(Self::default())
    }

    fn target_name(body: BodyId) -> Option<&'static str> {
        match body {
            BodyId::Sun => None,
            BodyId::Mercury => Some("MERCURY BARYCENTER"),
            BodyId::Venus => Some("VENUS BARYCENTER"),
            BodyId::Earth => Some("EARTH"),
            BodyId::Moon => Some("MOON"),
            BodyId::Mars => Some("MARS BARYCENTER"),
            BodyId::Jupiter => Some("JUPITER BARYCENTER"),
            BodyId::Saturn => Some("SATURN BARYCENTER"),
            BodyId::Uranus => Some("URANUS BARYCENTER"),
            BodyId::Neptune => Some("NEPTUNE BARYCENTER"),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, EphemerisError> {
        self.query_lock.lock().map_err(|_| EphemerisError::Spice {
            message: "SPICE query lock poisoned".to_string(),
        })
    }

    fn query(
        &self,
        target: &str,
        observer: &str,
        epoch: Epoch,
    ) -> Result<NativeState, EphemerisError> {
        let _guard = self.lock()?;
        let target_c = to_c(target)?;
        let observer_c = to_c(observer)?;
        let frame_c = to_c("J2000")?;
        let aberration_c = to_c("NONE")?;
        let ephemeris_time = tdb_seconds(epoch)?;

        let mut state: [SpiceDouble; 6] = [0.0; 6];
        let mut light_time: SpiceDouble = 0.0;
        unsafe {
            spkezr_c(
                target_c.as_ptr() as *mut i8,
                ephemeris_time,
                frame_c.as_ptr() as *mut i8,
                aberration_c.as_ptr() as *mut i8,
                observer_c.as_ptr() as *mut i8,
                state.as_mut_ptr(),
                &mut light_time,
            );
        }
        check_for_spice_error()?;

        let km_per_s_to_au_per_day = SECONDS_PER_DAY / AU_KM;
        Ok(NativeState {
            position_au: [state[0] / AU_KM, state[1] / AU_KM, state[2] / AU_KM],
            velocity_au_per_day: [
                state[3] * km_per_s_to_au_per_day,
                state[4] * km_per_s_to_au_per_day,
                state[5] * km_per_s_to_au_per_day,
            ],
            frame: NativeFrame::EquatorialJ2000,
        })
    }

    /// Pole and prime meridian from the PCK's `IAU_<BODY>` frame.
    pub fn body_orientation(
        &self,
        body: BodyId,
        epoch: Epoch,
    ) -> Result<BodyOrientation, EphemerisError> {
        let _guard = self.lock()?;
        let from_c = to_c("J2000")?;
        let to_frame_c = to_c(&format!("IAU_{}", body.name().to_ascii_uppercase()))?;
        let ephemeris_time = tdb_seconds(epoch)?;
        let mut rotate: [[SpiceDouble; 3]; 3] = [[0.0; 3]; 3];
        unsafe {
            pxform_c(
                from_c.as_ptr() as *mut i8,
                to_frame_c.as_ptr() as *mut i8,
                ephemeris_time,
                rotate.as_mut_ptr(),
            );
        }
        check_for_spice_error()?;
        Ok(BodyOrientation::from_body_frame_matrix(&rotate))
    }
}

fn to_c(s: &str) -> Result<CString, EphemerisError> {
    CString::new(s).map_err(|_| EphemerisError::Spice {
        message: format!("invalid SPICE identifier `{s}`"),
    })
}

/// TDB seconds past J2000 for a TT epoch, through the leap-seconds kernel.
fn tdb_seconds(epoch: Epoch) -> Result<SpiceDouble, EphemerisError> {
    const TT: &[u8] = b"TT\0";
    const TDB: &[u8] = b"TDB\0";
    let tt_seconds: SpiceDouble = epoch.days_since_j2000() * SECONDS_PER_DAY;
    let tdb = unsafe { unitim_c(tt_seconds, TT.as_ptr() as *mut i8, TDB.as_ptr() as *mut i8) };
    check_for_spice_error()?;
    Ok(tdb)
}

impl EphemerisEngine for SpiceEngine {
    fn name(&self) -> &'static str {
        "cspice"
    }

    fn heliocentric(&self, body: BodyId, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        if body == BodyId::Moon {
            return Err(EphemerisError::UnsupportedBody { body });
        }
        let target = Self::target_name(body).ok_or(EphemerisError::UnsupportedBody { body })?;
        self.query(target, "SUN", epoch)
    }

    fn geocentric_moon(&self, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        self.query("MOON", "EARTH", epoch)
    }

    fn orientation(&self, body: BodyId, epoch: Epoch) -> Option<BodyOrientation> {
        match self.body_orientation(body, epoch) {
            Ok(orientation) => Some(orientation),
            Err(err) => {
                tracing::debug!(%body, error = %err, "no PCK orientation, using IAU fallback");
                None
            }
        }
    }
}

/// Ensure the CSPICE runtime has all required kernels loaded.
pub fn load_default_kernels() -> Result<(), EphemerisError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let _lock = INITIALIZE_LOCK.lock().map_err(|_| EphemerisError::Spice {
        message: "SPICE initialisation lock poisoned".to_string(),
    })?;
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    initialize_spice()?;
    let _ = INITIALIZED.set(());
    Ok(())
}

fn initialize_spice() -> Result<(), EphemerisError> {
    validate_kernel_paths()?;
    unsafe {
        kclear_c();
    }
    configure_error_handling();
    for descriptor in KERNEL_CATALOG {
        let c_path = path_to_cstring(descriptor)?;
        unsafe {
            furnsh_c(c_path.as_ptr() as *mut i8);
        }
        check_for_spice_error()?;
        tracing::debug!(
            kernel = descriptor.filename,
            kind = descriptor.kind.label(),
            "{}",
            descriptor.description
        );
    }
    tracing::debug!(kernels = KERNEL_CATALOG.len(), "SPICE kernels loaded");
    Ok(())
}

fn validate_kernel_paths() -> Result<(), EphemerisError> {
    for descriptor in KERNEL_CATALOG {
        let path = descriptor.local_path();
        if !path.exists() {
            return Err(EphemerisError::MissingKernel {
                name: descriptor.filename,
                path,
                url: descriptor.url,
            });
        }
    }
    Ok(())
}

fn path_to_cstring(descriptor: &KernelDescriptor) -> Result<CString, EphemerisError> {
    let path = descriptor.local_path();
    let path_str = path
        .to_str()
        .ok_or_else(|| EphemerisError::InvalidKernelPath {
            name: descriptor.filename,
            path: path.clone(),
        })?;
    CString::new(path_str).map_err(|_| EphemerisError::InvalidKernelPath {
        name: descriptor.filename,
        path,
    })
}

fn configure_error_handling() {
    const SET: &[u8] = b"SET\0";
    const RETURN_MODE: &[u8] = b"RETURN\0";
    unsafe {
        erract_c(
            SET.as_ptr() as *mut i8,
            0 as SpiceInt,
            RETURN_MODE.as_ptr() as *mut i8,
        );
    }
}

fn check_for_spice_error() -> Result<(), EphemerisError> {
    unsafe {
        if failed_c() != 0 as SpiceBoolean {
            const LONG: &[u8] = b"LONG\0";
            let mut buffer = vec![0i8; 1024];
            getmsg_c(
                LONG.as_ptr() as *mut i8,
                buffer.len() as SpiceInt,
                buffer.as_mut_ptr(),
            );
            reset_c();
            let message = CStr::from_ptr(buffer.as_ptr())
                .to_string_lossy()
                .trim()
                .to_string();
            return Err(EphemerisError::Spice { message });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::LOCAL_SPICE_DIR;

    #[test]
    fn load_reports_first_missing_kernel() {
        // Unit tests run from the crate root, which carries no data/spice directory.
        match SpiceEngine::load() {
            Err(EphemerisError::MissingKernel { name, path, url }) => {
                assert_eq!(name, KERNEL_CATALOG[0].filename);
                assert!(path.starts_with(LOCAL_SPICE_DIR));
                assert!(url.ends_with(name));
            }
            other => panic!("expected a missing kernel, got {other:?}"),
        }
    }
}
