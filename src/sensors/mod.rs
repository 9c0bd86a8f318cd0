//! Step-counter sensor abstraction and the adapter that feeds the event channel.
//!
//! The platform sensor reports a cumulative step count since boot. Instead of
//! registering a callback, the [`SensorAdapter`] is explicitly activated and
//! deactivated by whoever owns the screen lifecycle, and while active it pushes
//! typed [`SensorEvent`]s into a [`SensorChannel`]. The step tracker consumes
//! them one at a time on the same logical thread.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender, TrySendError};
use log::{debug, info, warn};
use thiserror_no_std::Error;

/// Channel capacity for sensor events.
/// The consumer drains every frame, so this only needs to absorb short bursts.
pub const SENSOR_CHANNEL_CAPACITY: usize = 8;

pub type SensorChannel = Channel<NoopRawMutex, SensorEvent, SENSOR_CHANNEL_CAPACITY>;
pub type SensorSender<'a> = Sender<'a, NoopRawMutex, SensorEvent, SENSOR_CHANNEL_CAPACITY>;
pub type SensorReceiver<'a> = Receiver<'a, NoopRawMutex, SensorEvent, SENSOR_CHANNEL_CAPACITY>;

/// Events delivered from the sensor adapter to the step tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// Latest cumulative step count since device boot
    StepCount(f32),
    /// The device has no step counter; sent once per process
    Unsupported,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("no step counter sensor on this device")]
    Unsupported,
    #[error("failed to read the step counter")]
    Read,
}

/// A hardware or OS step counter.
pub trait StepCounter {
    /// Read the cumulative step count since boot.
    fn read(&mut self) -> Result<f32, SensorError>;
}

/// Owns the sensor subscription and publishes readings into the channel.
///
/// A `None` sensor models a device without a step counter.
pub struct SensorAdapter<'a, S: StepCounter> {
    sensor: Option<S>,
    sender: SensorSender<'a>,
    active: bool,
    last_published: Option<f32>,
    unsupported_reported: bool,
}

impl<'a, S: StepCounter> SensorAdapter<'a, S> {
    pub fn new(sensor: Option<S>, sender: SensorSender<'a>) -> Self {
        Self {
            sensor,
            sender,
            active: false,
            last_published: None,
            unsupported_reported: false,
        }
    }

    /// Subscribe to the sensor.
    ///
    /// Without a sensor this publishes [`SensorEvent::Unsupported`] the first
    /// time it is called and returns [`SensorError::Unsupported`]; the adapter
    /// then stays inert.
    pub fn activate(&mut self) -> Result<(), SensorError> {
        if self.sensor.is_none() {
            if !self.unsupported_reported {
                warn!("No step counter detected, step tracking disabled");
                self.unsupported_reported = self.publish(SensorEvent::Unsupported);
            }
            return Err(SensorError::Unsupported);
        }

        if !self.active {
            info!("Step sensor activated");
            self.active = true;
            // Re-deliver the current count after a resume
            self.last_published = None;
        }
        Ok(())
    }

    /// Release the subscription. No events are published until reactivated.
    pub fn deactivate(&mut self) {
        if self.active {
            info!("Step sensor deactivated");
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Read the sensor and publish the count if it changed.
    ///
    /// Returns `Ok(true)` when an event was published.
    pub fn poll(&mut self) -> Result<bool, SensorError> {
        if !self.active {
            return Ok(false);
        }
        let Some(sensor) = self.sensor.as_mut() else {
            return Ok(false);
        };

        let count = sensor.read().map_err(|e| {
            warn!("Step sensor read failed: {}", e);
            e
        })?;

        if self.last_published == Some(count) {
            return Ok(false);
        }

        if self.publish(SensorEvent::StepCount(count)) {
            self.last_published = Some(count);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn publish(&mut self, event: SensorEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => {
                debug!("Published sensor event {:?}", event);
                true
            }
            Err(TrySendError::Full(dropped)) => {
                warn!("Sensor channel full, dropping {:?}", dropped);
                false
            }
        }
    }
}
