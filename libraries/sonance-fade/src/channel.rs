//! Platform-agnostic audio channel trait
//!
//! Abstracts the playback object a fade acts on. The controller never owns a
//! channel; the driver passes it in on every call.

/// A playable audio channel with a volume control
pub trait AudioChannel {
    /// Identifier used in logs and errors
    fn id(&self) -> &str;

    /// Current linear volume (0.0 to 1.0)
    fn volume(&self) -> f32;

    /// Set linear volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Start playback (fire-and-forget)
    fn play(&mut self);

    /// Stop playback (fire-and-forget)
    fn stop(&mut self);

    /// Whether the channel's owner may run scheduled work right now
    ///
    /// Fades are refused on ineligible channels, and work already scheduled is
    /// dropped as soon as a channel becomes ineligible.
    fn is_eligible(&self) -> bool {
        true
    }
}
