//! Scripted input for host tests and demos.

use core::convert::Infallible;

use super::Encoder;

/// Replays a fixed list of deltas, one per poll, then stays idle.
#[derive(Debug, Clone)]
pub struct ScriptedEncoder<'a> {
    deltas: &'a [i32],
    cursor: usize,
}

impl<'a> ScriptedEncoder<'a> {
    pub const fn new(deltas: &'a [i32]) -> Self {
        Self { deltas, cursor: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.deltas.len()
    }
}

impl Encoder for ScriptedEncoder<'_> {
    type Error = Infallible;

    fn delta(&mut self) -> Result<i32, Self::Error> {
        let Some(delta) = self.deltas.get(self.cursor).copied() else {
            return Ok(0);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(delta)
    }
}
