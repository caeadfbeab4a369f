//! Concrete sensor channel implementations and the channel registry.

pub mod accel;
pub mod heart_rate;
pub mod iio;
pub mod steps;

use crate::channel::SensorChannel;

/// Every channel this build knows about, available or not.
pub fn all_channels() -> Vec<Box<dyn SensorChannel>> {
    vec![
        Box::new(accel::AccelerometerChannel::new()),
        Box::new(heart_rate::HeartRateChannel::new()),
        Box::new(steps::StepCounterChannel::new()),
    ]
}

/// Only the channels whose hardware is present on this machine.
pub fn detect_available_channels() -> Vec<Box<dyn SensorChannel>> {
    all_channels()
        .into_iter()
        .filter(|c| c.is_available())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_lists_three_channels() {
        assert_eq!(all_channels().len(), 3);
    }

    #[test]
    fn channel_names_are_unique() {
        let channels = all_channels();
        let names: HashSet<_> = channels.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), channels.len());
    }

    #[test]
    fn detect_is_a_subset_of_all() {
        let all: HashSet<_> = all_channels().iter().map(|c| c.name()).collect();
        for channel in detect_available_channels() {
            assert!(all.contains(channel.name()));
        }
    }
}
