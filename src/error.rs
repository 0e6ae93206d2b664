//! Unified error type for hidknob.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // USB
    /// The HID endpoint still has a report in flight.
    TransportBusy,

    /// Device is not configured by the host.
    Usb,

    // Matrix
    /// A matrix row or column pin reported an error.
    Gpio,

    // Audio player
    /// Serial link to the player failed.
    Uart,

    /// Fewer bytes than a full frame were received.
    ShortResponse(usize),

    /// Start/version/length/end markers did not match.
    BadFrame,

    /// Frame checksum mismatch.
    Checksum { expected: u16, found: u16 },

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,

    /// Operation timed out.
    Timeout,
}
