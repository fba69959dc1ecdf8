/// Tracks the session epoch so results of work started before a stop can be
/// recognised and ignored.
///
/// Actual task handles live in the driver; the kernel only decides what is stale.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    epoch: u64,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.epoch
    }

    /// Invalidates everything tagged with the current epoch. Returns the new epoch.
    pub fn cancel_all(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }
}
