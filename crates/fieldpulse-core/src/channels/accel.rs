//! Accelerometer channel backed by the IIO sysfs interface.

use std::path::{Path, PathBuf};

use crate::channel::{ChannelInfo, ChannelKind, Platform, Reading, SensorChannel};
use crate::channels::iio::{IIO_ROOT, find_device_with, read_scaled};

static ACCEL_INFO: ChannelInfo = ChannelInfo {
    name: "accelerometer",
    description: "3-axis acceleration from an IIO device exposing in_accel_*_raw",
    kind: ChannelKind::Accelerometer,
    platform: Platform::Linux,
};

pub struct AccelerometerChannel {
    device: Option<PathBuf>,
}

impl AccelerometerChannel {
    pub fn new() -> Self {
        Self::at_root(Path::new(IIO_ROOT))
    }

    /// Probe for a device under an explicit sysfs root.
    pub fn at_root(root: &Path) -> Self {
        Self {
            device: find_device_with(root, "in_accel_x_raw"),
        }
    }
}

impl Default for AccelerometerChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorChannel for AccelerometerChannel {
    fn info(&self) -> &ChannelInfo {
        &ACCEL_INFO
    }

    fn is_available(&self) -> bool {
        self.device.is_some()
    }

    fn poll(&self) -> Option<Reading> {
        let dir = self.device.as_ref()?;
        let x = read_scaled(dir, "in_accel_x_raw", "in_accel_scale")?;
        let y = read_scaled(dir, "in_accel_y_raw", "in_accel_scale")?;
        let z = read_scaled(dir, "in_accel_z_raw", "in_accel_scale")?;
        Some(Reading::Vector([x, y, z]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn unavailable_without_device() {
        let root = tempdir().unwrap();
        let channel = AccelerometerChannel::at_root(root.path());
        assert!(!channel.is_available());
        assert!(channel.poll().is_none());
    }

    #[test]
    fn polls_scaled_axes() {
        let root = tempdir().unwrap();
        let dev = root.path().join("iio:device0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("in_accel_x_raw"), "100\n").unwrap();
        fs::write(dev.join("in_accel_y_raw"), "200\n").unwrap();
        fs::write(dev.join("in_accel_z_raw"), "1000\n").unwrap();
        fs::write(dev.join("in_accel_scale"), "0.01\n").unwrap();

        let channel = AccelerometerChannel::at_root(root.path());
        assert!(channel.is_available());
        match channel.poll() {
            Some(Reading::Vector([x, y, z])) => {
                assert!((x - 1.0).abs() < 1e-9);
                assert!((y - 2.0).abs() < 1e-9);
                assert!((z - 10.0).abs() < 1e-9);
            }
            other => panic!("expected vector, got {other:?}"),
        }
    }

    #[test]
    fn missing_axis_yields_none() {
        let root = tempdir().unwrap();
        let dev = root.path().join("iio:device0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("in_accel_x_raw"), "1\n").unwrap();

        let channel = AccelerometerChannel::at_root(root.path());
        assert!(channel.is_available());
        assert!(channel.poll().is_none());
    }
}
