/// Counter read by the celebration effect.
///
/// Bumped once per draw, partway through the shuffle, so a launch
/// animation started on the bump lands exactly on the reveal. Consumers
/// react to the value changing; it never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CelebrationTrigger {
    count: u64,
}

impl CelebrationTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
