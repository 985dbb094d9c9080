/// A countdown ticked explicitly by the owner.
///
/// Replaces suspended "wait N seconds, then continue" routines: start it,
/// tick it with the frame delta, react when [`tick`](Self::tick) reports completion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Returns `true` exactly once, on the tick that completes the countdown.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_once() {
        let mut cooldown = Cooldown::default();
        assert!(!cooldown.tick(1.0));

        cooldown.start(2.0);
        assert!(!cooldown.tick(1.0));
        assert!(cooldown.tick(1.5));
        assert!(!cooldown.is_active());
        assert!(!cooldown.tick(1.0));
    }
}
