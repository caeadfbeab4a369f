//! Helpers for the Linux industrial I/O sysfs interface.
//!
//! Devices appear as `/sys/bus/iio/devices/iio:deviceN` directories, each
//! exposing plain-text attribute files.

use std::fs;
use std::path::{Path, PathBuf};

/// Where IIO devices are registered.
pub const IIO_ROOT: &str = "/sys/bus/iio/devices";

/// Find the first (lowest-numbered) IIO device under `root` that exposes
/// the attribute file `attr`.
pub fn find_device_with(root: &Path, attr: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;
    let mut devices: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("iio:device"))
        })
        .collect();
    devices.sort();
    devices.into_iter().find(|d| d.join(attr).is_file())
}

/// Read an attribute file and parse its first whitespace-delimited token
/// as a float.
pub fn read_attr_f64(dir: &Path, attr: &str) -> Option<f64> {
    let raw = fs::read_to_string(dir.join(attr)).ok()?;
    raw.split_whitespace().next()?.parse().ok()
}

/// Read a raw attribute and apply its scale attribute. A missing scale
/// means the raw value is already in natural units.
pub fn read_scaled(dir: &Path, raw_attr: &str, scale_attr: &str) -> Option<f64> {
    let raw = read_attr_f64(dir, raw_attr)?;
    let scale = read_attr_f64(dir, scale_attr).unwrap_or(1.0);
    Some(raw * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_device(root: &Path, name: &str, attrs: &[(&str, &str)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            fs::write(dir.join(attr), value).unwrap();
        }
        dir
    }

    #[test]
    fn finds_device_exposing_attribute() {
        let root = tempdir().unwrap();
        make_device(root.path(), "iio:device0", &[("in_temp_raw", "20")]);
        let dev = make_device(root.path(), "iio:device1", &[("in_accel_x_raw", "512")]);

        let found = find_device_with(root.path(), "in_accel_x_raw").unwrap();
        assert_eq!(found, dev);
    }

    #[test]
    fn ignores_non_device_entries() {
        let root = tempdir().unwrap();
        make_device(root.path(), "trigger0", &[("in_accel_x_raw", "1")]);
        assert!(find_device_with(root.path(), "in_accel_x_raw").is_none());
    }

    #[test]
    fn missing_root_is_none() {
        assert!(find_device_with(Path::new("/nonexistent-iio"), "x").is_none());
    }

    #[test]
    fn parses_attribute_with_trailing_newline() {
        let root = tempdir().unwrap();
        let dev = make_device(root.path(), "iio:device0", &[("in_steps_input", "4021\n")]);
        assert_eq!(read_attr_f64(&dev, "in_steps_input"), Some(4021.0));
    }

    #[test]
    fn scaled_read_multiplies_raw_by_scale() {
        let root = tempdir().unwrap();
        let dev = make_device(
            root.path(),
            "iio:device0",
            &[("in_accel_x_raw", "1000"), ("in_accel_scale", "0.00981")],
        );
        let value = read_scaled(&dev, "in_accel_x_raw", "in_accel_scale").unwrap();
        assert!((value - 9.81).abs() < 1e-9);
    }

    #[test]
    fn missing_scale_defaults_to_identity() {
        let root = tempdir().unwrap();
        let dev = make_device(root.path(), "iio:device0", &[("in_accel_x_raw", "3")]);
        assert_eq!(read_scaled(&dev, "in_accel_x_raw", "in_accel_scale"), Some(3.0));
    }

    #[test]
    fn garbage_attribute_is_none() {
        let root = tempdir().unwrap();
        let dev = make_device(root.path(), "iio:device0", &[("in_steps_input", "abc")]);
        assert_eq!(read_attr_f64(&dev, "in_steps_input"), None);
    }
}
