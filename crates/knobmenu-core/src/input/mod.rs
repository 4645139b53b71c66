//! Input abstraction layer.
//!
//! The controller consumes relative movement through [`Encoder`]. Drivers that
//! only expose an absolute counter implement [`PositionCounter`] and are
//! wrapped in [`CountingEncoder`]. The push button is any
//! [`embedded_hal::digital::InputPin`].

pub mod mock;

use core::fmt::Debug;

/// Polled relative encoder.
pub trait Encoder {
    type Error: Debug;

    /// Signed detents since the previous call, `0` when nothing moved.
    fn delta(&mut self) -> Result<i32, Self::Error>;
}

/// Polled absolute encoder counter.
pub trait PositionCounter {
    type Error: Debug;

    fn position(&mut self) -> Result<i32, Self::Error>;
}

/// Turns an absolute counter into deltas as `previous - current`, so one
/// physical direction always increases edited values.
#[derive(Debug)]
pub struct CountingEncoder<P> {
    counter: P,
    last_position: Option<i32>,
}

impl<P> CountingEncoder<P>
where
    P: PositionCounter,
{
    pub const fn new(counter: P) -> Self {
        Self {
            counter,
            last_position: None,
        }
    }

    /// Seeds the reference position so movement before the first poll is
    /// not lost.
    pub fn with_reference(mut counter: P) -> Result<Self, P::Error> {
        let position = counter.position()?;
        Ok(Self {
            counter,
            last_position: Some(position),
        })
    }

    pub fn into_inner(self) -> P {
        self.counter
    }
}

impl<P> Encoder for CountingEncoder<P>
where
    P: PositionCounter,
{
    type Error = P::Error;

    fn delta(&mut self) -> Result<i32, Self::Error> {
        let position = self.counter.position()?;
        let delta = self
            .last_position
            .map_or(0, |previous| previous.wrapping_sub(position));
        self.last_position = Some(position);
        Ok(delta)
    }
}
