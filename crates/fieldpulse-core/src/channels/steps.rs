//! Step counter channel backed by the IIO sysfs interface.

use std::path::{Path, PathBuf};

use crate::channel::{ChannelInfo, ChannelKind, Platform, Reading, SensorChannel};
use crate::channels::iio::{IIO_ROOT, find_device_with, read_attr_f64};

static STEPS_INFO: ChannelInfo = ChannelInfo {
    name: "step_counter",
    description: "cumulative step count from an IIO device exposing in_steps_input",
    kind: ChannelKind::StepCounter,
    platform: Platform::Linux,
};

pub struct StepCounterChannel {
    device: Option<PathBuf>,
}

impl StepCounterChannel {
    pub fn new() -> Self {
        Self::at_root(Path::new(IIO_ROOT))
    }

    pub fn at_root(root: &Path) -> Self {
        Self {
            device: find_device_with(root, "in_steps_input"),
        }
    }
}

impl Default for StepCounterChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorChannel for StepCounterChannel {
    fn info(&self) -> &ChannelInfo {
        &STEPS_INFO
    }

    fn is_available(&self) -> bool {
        self.device.is_some()
    }

    fn poll(&self) -> Option<Reading> {
        let dir = self.device.as_ref()?;
        read_attr_f64(dir, "in_steps_input").map(Reading::Scalar)
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
        let channel = StepCounterChannel::at_root(root.path());
        assert!(!channel.is_available());
        assert!(channel.poll().is_none());
    }

    #[test]
    fn polls_step_count() {
        let root = tempdir().unwrap();
        let dev = root.path().join("iio:device0");
        fs::create_dir_all(&dev).unwrap();
        fs::write(dev.join("in_steps_input"), "4021\n").unwrap();

        let channel = StepCounterChannel::at_root(root.path());
        assert_eq!(channel.poll(), Some(Reading::Scalar(4021.0)));
    }
}
