//! Abstract sensor channel trait.
//!
//! Every hardware channel implements the [`SensorChannel`] trait, which
//! provides metadata via [`ChannelInfo`], availability checking, and a
//! non-blocking poll of the latest reported value.

/// Kind of sensor a channel reads. One snapshot field per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// 3-axis acceleration.
    Accelerometer,
    /// Heart rate in beats per minute.
    HeartRate,
    /// Cumulative step count.
    StepCounter,
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accelerometer => write!(f, "accelerometer"),
            Self::HeartRate => write!(f, "heart_rate"),
            Self::StepCounter => write!(f, "step_counter"),
        }
    }
}

/// Target platform for a sensor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Works on any platform.
    Any,
    /// Requires Linux (IIO sysfs).
    Linux,
    /// Requires macOS.
    MacOS,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Linux => write!(f, "linux"),
            Self::MacOS => write!(f, "macos"),
        }
    }
}

/// One value reported by a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// 3-element vector reading (accelerometer).
    Vector([f64; 3]),
    /// Single scalar reading (heart rate, steps).
    Scalar(f64),
}

/// Metadata about a sensor channel.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    /// Unique identifier (e.g. `"accelerometer"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Which snapshot field this channel feeds.
    pub kind: ChannelKind,
    /// Target platform.
    pub platform: Platform,
}

/// Trait that every sensor channel must implement.
pub trait SensorChannel: Send + Sync {
    /// Channel metadata.
    fn info(&self) -> &ChannelInfo;

    /// Check if this channel can operate on the current machine.
    fn is_available(&self) -> bool;

    /// Latest value reported by the hardware, or `None` if nothing has
    /// been reported yet. Must not block.
    fn poll(&self) -> Option<Reading>;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(ChannelKind::Accelerometer.to_string(), "accelerometer");
        assert_eq!(ChannelKind::HeartRate.to_string(), "heart_rate");
        assert_eq!(ChannelKind::StepCounter.to_string(), "step_counter");
    }

    #[test]
    fn platform_display() {
        assert_eq!(Platform::Any.to_string(), "any");
        assert_eq!(Platform::Linux.to_string(), "linux");
        assert_eq!(Platform::MacOS.to_string(), "macos");
    }
}
