//! Boot-protocol keyboard report.
//!
//! ```text
//! [modifiers] [0x00] [key0] [key1] [key2] [key3] [key4] [key5]
//! ```
//!
//! Descriptor: `usbd_hid::descriptor::KeyboardReport`. The device never
//! presses a modifier and holds at most one key.

pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// On-board button.
pub const KEY_A: u8 = 0x04;

/// Invalid knob sample.
pub const KEY_E: u8 = 0x08;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier bitfield (Ctrl/Shift/Alt/GUI, left then right).
    pub modifier: u8,
    /// Up to 6 held key usage codes; unused slots are 0.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// All keys up.
    pub const fn empty() -> Self {
        Self::single(0)
    }

    /// One key held, no modifiers.
    pub const fn single(keycode: u8) -> Self {
        Self {
            modifier: 0,
            keycodes: [keycode, 0, 0, 0, 0, 0],
        }
    }

    /// Write the 8-byte report, returning its length or 0 when `buf` is
    /// too short.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        let Some(out) = buf.get_mut(..KEYBOARD_REPORT_SIZE) else {
            return 0;
        };
        out[0] = self.modifier;
        out[1] = 0;
        out[2..].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// `true` for the all-keys-up report.
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes == [0; 6]
    }
}
