//! System services

/// Control over the whole device
pub trait SystemControl {
    /// Request a full restart
    ///
    /// Boards may reset immediately or at the end of the loop iteration.
    fn restart(&mut self);
}
