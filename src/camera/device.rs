//! Camera discovery.

use nokhwa::query;
use nokhwa::utils::ApiBackend;

use super::types::{CameraError, CameraInfo};

/// Cameras the native backend can see, ordered by index.
///
/// An empty list is not an error. Devices addressed by a non-numeric index
/// (network streams) are skipped, since glyphcam selects cameras by number.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let mut devices: Vec<CameraInfo> = query(ApiBackend::Auto)
        .map_err(|e| CameraError::QueryFailed(e.to_string()))?
        .into_iter()
        .filter_map(|d| {
            let index = d.index().as_index().ok()?;
            Some(CameraInfo {
                index,
                name: d.human_name(),
                description: d.description().to_string(),
            })
        })
        .collect();
    devices.sort_by_key(|d| d.index);
    log::debug!("Found {} camera device(s)", devices.len());
    Ok(devices)
}

/// The device with `index`, distinguishing "no cameras" from "wrong index".
pub fn select_device(devices: &[CameraInfo], index: u32) -> Result<&CameraInfo, CameraError> {
    if devices.is_empty() {
        return Err(CameraError::NoDevices);
    }
    devices
        .iter()
        .find(|d| d.index == index)
        .ok_or(CameraError::DeviceNotFound(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(index: u32, name: &str) -> CameraInfo {
        CameraInfo {
            index,
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_select_device_by_index() {
        let devices = [info(0, "FaceTime HD"), info(2, "USB Cam")];
        assert_eq!(select_device(&devices, 2).unwrap().name, "USB Cam");
    }

    #[test]
    fn test_select_device_missing_index() {
        let devices = [info(0, "FaceTime HD")];
        assert!(matches!(
            select_device(&devices, 3),
            Err(CameraError::DeviceNotFound(3))
        ));
    }

    #[test]
    fn test_select_device_without_cameras() {
        assert!(matches!(select_device(&[], 0), Err(CameraError::NoDevices)));
    }
}
