//! Heart rate channel backed by the IIO sysfs interface.

use std::path::{Path, PathBuf};

use crate::channel::{ChannelInfo, ChannelKind, Platform, Reading, SensorChannel};
use crate::channels::iio::{IIO_ROOT, find_device_with, read_attr_f64};

static HEART_RATE_INFO: ChannelInfo = ChannelInfo {
    name: "heart_rate",
    description: "heart rate in bpm from an IIO device exposing in_heartrate_input",
    kind: ChannelKind::HeartRate,
    platform: Platform::Linux,
};

pub struct HeartRateChannel {
    device: Option<PathBuf>,
}

impl HeartRateChannel {
    pub fn new() -> Self {
        Self::at_root(Path::new(IIO_ROOT))
    }

    pub fn at_root(root: &Path) -> Self {
        Self {
            device: find_device_with(root, "in_heartrate_input"),
        }
    }
}

impl Default for HeartRateChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorChannel for HeartRateChannel {
    fn info(&self) -> &ChannelInfo {
        &HEART_RATE_INFO
    }

    fn is_available(&self) -> bool {
        self.device.is_some()
    }

    fn poll(&self) -> Option<Reading> {
        let dir = self.device.as_ref()?;
        read_attr_f64(dir, "in_heartrate_input").map(Reading::Scalar)
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
        let channel = HeartRateChannel::at_root(root.path());
        assert!(!channel.is_available());
    }

    #[test]
    fn polls_bpm_reading() {
        let root = tempdir().unwrap();
        let dev = root.path().join("iio:device0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("in_heartrate_input"), "72\n").unwrap();

        let channel = HeartRateChannel::at_root(root.path());
        assert_eq!(channel.poll(), Some(Reading::Scalar(72.0)));
    }
}
