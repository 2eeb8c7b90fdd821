//! One-way readiness gate between "waiting for the first frame" and
//! "rendering every frame".

/// Whether the frame source has delivered its first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessGate {
    #[default]
    NotReady,
    Ready,
}

impl ReadinessGate {
    /// Open the gate. Returns true only on the transition.
    pub fn open(&mut self) -> bool {
        let was_closed = *self == ReadinessGate::NotReady;
        *self = ReadinessGate::Ready;
        was_closed
    }

    pub fn is_open(&self) -> bool {
        *self == ReadinessGate::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_once() {
        let mut gate = ReadinessGate::default();
        assert!(!gate.is_open());
        assert!(gate.open());
        assert!(gate.is_open());
        assert!(!gate.open());
        assert!(gate.is_open());
    }
}
