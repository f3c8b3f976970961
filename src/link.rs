/// Connection state of the receiver
///
/// Owns the "report once per failure episode" rule: only the
/// first failure after a success (or after startup) is reported,
/// every following one is silent until the next handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Connected,
    Retrying { reported: bool },
}

//

impl Link {
    pub const fn new() -> Self {
        Self::Retrying { reported: false }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Handshake succeeded, ends the current failure episode
    pub fn connected(&mut self) {
        *self = Self::Connected;
    }

    /// A session or a connect attempt failed
    ///
    /// Returns true if the failure should be reported.
    #[must_use]
    pub fn failed(&mut self) -> bool {
        let report = !matches!(self, Self::Retrying { reported: true });
        *self = Self::Retrying { reported: true };
        report
    }

    /// The peer closed the session cleanly
    ///
    /// Not a failure, so the next failure is still reported.
    pub fn closed(&mut self) {
        if self.is_connected() {
            *self = Self::Retrying { reported: false };
        }
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

//
