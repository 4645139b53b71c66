use core::fmt;

use embedded_hal::digital::InputPin;
use knobmenu_core::input::PositionCounter;
use log::warn;

// Quadrature transition table for previous_state/current_state (AB).
// Index: (prev << 2) | curr, values are +1/-1 for valid transitions.
const QUADRATURE_TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RotaryConfig {
    direction_inverted: bool,
    transitions_per_step: u8,
}

impl Default for RotaryConfig {
    fn default() -> Self {
        Self {
            direction_inverted: false,
            transitions_per_step: 4,
        }
    }
}

impl RotaryConfig {
    pub const fn with_direction_inverted(mut self, direction_inverted: bool) -> Self {
        self.direction_inverted = direction_inverted;
        self
    }

    /// Valid transitions per detent. Most mechanical encoders produce four.
    pub const fn with_transitions_per_step(mut self, transitions_per_step: u8) -> Self {
        self.transitions_per_step = transitions_per_step;
        self
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RotaryInputError<ClkErr, DtErr> {
    Clk(ClkErr),
    Dt(DtErr),
}

impl<ClkErr, DtErr> fmt::Display for RotaryInputError<ClkErr, DtErr>
where
    ClkErr: fmt::Debug,
    DtErr: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clk(err) => write!(f, "encoder CLK read failed: {err:?}"),
            Self::Dt(err) => write!(f, "encoder DT read failed: {err:?}"),
        }
    }
}

impl<ClkErr, DtErr> core::error::Error for RotaryInputError<ClkErr, DtErr>
where
    ClkErr: fmt::Debug,
    DtErr: fmt::Debug,
{
}

type RotaryResult<ClkErr, DtErr, T> = Result<T, RotaryInputError<ClkErr, DtErr>>;

/// Two-pin incremental encoder decoded by polling.
///
/// Every [`PositionCounter::position`] call samples both pins once, so the
/// caller must poll faster than the shaft can produce transitions.
#[derive(Debug)]
pub struct QuadratureEncoder<CLK, DT> {
    clk: CLK,
    dt: DT,
    config: RotaryConfig,
    prev_ab: u8,
    transition_accum: i8,
    position: i32,
}

impl<CLK, DT> QuadratureEncoder<CLK, DT>
where
    CLK: InputPin,
    DT: InputPin,
{
    pub fn new(
        mut clk: CLK,
        mut dt: DT,
        config: RotaryConfig,
    ) -> RotaryResult<CLK::Error, DT::Error, Self> {
        let clk_high = clk.is_high().map_err(RotaryInputError::Clk)?;
        let dt_high = dt.is_high().map_err(RotaryInputError::Dt)?;

        Ok(Self {
            clk,
            dt,
            config,
            prev_ab: ab_from_levels(clk_high, dt_high),
            transition_accum: 0,
            position: 0,
        })
    }

    pub fn config(&self) -> RotaryConfig {
        self.config
    }

    pub fn into_pins(self) -> (CLK, DT) {
        (self.clk, self.dt)
    }

    /// Samples the pins and folds a completed detent into the position.
    fn poll(&mut self) -> RotaryResult<CLK::Error, DT::Error, ()> {
        let clk_high = self.clk.is_high().map_err(RotaryInputError::Clk)?;
        let dt_high = self.dt.is_high().map_err(RotaryInputError::Dt)?;
        let curr_ab = ab_from_levels(clk_high, dt_high);

        if curr_ab == self.prev_ab {
            return Ok(());
        }

        let transition_idx = ((self.prev_ab << 2) | curr_ab) as usize;
        self.prev_ab = curr_ab;
        self.transition_accum = self
            .transition_accum
            .saturating_add(QUADRATURE_TRANSITIONS[transition_idx]);

        let threshold = self.config.transitions_per_step.max(1) as i8;
        if self.transition_accum >= threshold {
            self.transition_accum = 0;
            self.step(true);
        } else if self.transition_accum <= -threshold {
            self.transition_accum = 0;
            self.step(false);
        }

        Ok(())
    }

    fn step(&mut self, positive_step: bool) {
        let forward = positive_step != self.config.direction_inverted;
        self.position = if forward {
            self.position.wrapping_add(1)
        } else {
            self.position.wrapping_sub(1)
        };
    }
}

impl<CLK, DT> PositionCounter for QuadratureEncoder<CLK, DT>
where
    CLK: InputPin,
    DT: InputPin,
{
    type Error = RotaryInputError<CLK::Error, DT::Error>;

    fn position(&mut self) -> Result<i32, Self::Error> {
        if let Err(err) = self.poll() {
            warn!("rotary: pin read failed err={:?}", err);
            return Err(err);
        }
        Ok(self.position)
    }
}

#[inline]
fn ab_from_levels(clk_high: bool, dt_high: bool) -> u8 {
    ((clk_high as u8) << 1) | (dt_high as u8)
}
