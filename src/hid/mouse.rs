//! Mouse report. The interface is enumerated so the host sees a full
//! composite device, but nothing ever moves it.
//!
//! ```text
//! [buttons] [x] [y] [wheel] [pan]
//! ```
//!
//! Descriptor: `usbd_hid::descriptor::MouseReport`.

pub const MOUSE_REPORT_SIZE: usize = 5;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield.
    pub buttons: u8,
    /// Relative X movement.
    pub x: i8,
    /// Relative Y movement.
    pub y: i8,
    /// Vertical scroll.
    pub wheel: i8,
    /// Horizontal scroll.
    pub pan: i8,
}

impl MouseReport {
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
            pan: 0,
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        let Some(out) = buf.get_mut(..MOUSE_REPORT_SIZE) else {
            return 0;
        };
        out.copy_from_slice(&[
            self.buttons,
            self.x as u8,
            self.y as u8,
            self.wheel as u8,
            self.pan as u8,
        ]);
        MOUSE_REPORT_SIZE
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::empty()
    }
}
