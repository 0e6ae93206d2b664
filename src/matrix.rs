//! 2x2 button matrix scanner.
//!
//! Rows are driven high one at a time; columns are inputs with pull-downs.
//! A scan returns the code of the last pressed position in scan order:
//! ```text
//!          col 0  col 1
//! row 0      1      2
//! row 1      3      4
//! ```
//! or `0` when nothing is pressed.

use crate::config::MATRIX_SETTLE_US;
use crate::error::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

pub const ROWS: usize = 2;
pub const COLS: usize = 2;

/// Owns the row outputs and column inputs.
pub struct Matrix<R, C> {
    rows: [R; ROWS],
    cols: [C; COLS],
}

impl<R: OutputPin, C: InputPin> Matrix<R, C> {
    /// Take the pins and drive every row low.
    pub fn new(mut rows: [R; ROWS], cols: [C; COLS]) -> Result<Self, Error> {
        for row in rows.iter_mut() {
            row.set_low().map_err(|_| Error::Gpio)?;
        }
        Ok(Self { rows, cols })
    }

    /// Scan every row once, waiting `MATRIX_SETTLE_US` after driving each,
    /// and return the code of the last pressed position (0 when idle).
    ///
    /// A pin error aborts the scan; the row being driven may stay high
    /// until the next successful scan.
    pub fn scan<D: DelayNs>(&mut self, delay: &mut D) -> Result<u8, Error> {
        let mut code = 0;
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_high().map_err(|_| Error::Gpio)?;
            delay.delay_us(MATRIX_SETTLE_US);
            for (c, col) in self.cols.iter_mut().enumerate() {
                if col.is_high().map_err(|_| Error::Gpio)? {
                    code = (r * COLS + c + 1) as u8;
                }
            }
            row.set_low().map_err(|_| Error::Gpio)?;
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Which row is currently driven, shared between the fake pins.
    struct Bus {
        driven: Cell<Option<usize>>,
        pressed: [[bool; COLS]; ROWS],
    }

    struct RowPin<'a> {
        bus: &'a Bus,
        index: usize,
    }

    struct ColPin<'a> {
        bus: &'a Bus,
        index: usize,
    }

    impl ErrorType for RowPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for RowPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            if self.bus.driven.get() == Some(self.index) {
                self.bus.driven.set(None);
            }
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.bus.driven.set(Some(self.index));
            Ok(())
        }
    }

    impl ErrorType for ColPin<'_> {
        type Error = Infallible;
    }

    impl InputPin for ColPin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self
                .bus
                .driven
                .get()
                .is_some_and(|row| self.bus.pressed[row][self.index]))
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    struct NoDelay {
        total_us: u32,
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_us += ns / 1_000;
        }
    }

    fn scan(pressed: [[bool; COLS]; ROWS]) -> (u8, u32) {
        let bus = Bus {
            driven: Cell::new(None),
            pressed,
        };
        let rows = [RowPin { bus: &bus, index: 0 }, RowPin { bus: &bus, index: 1 }];
        let cols = [ColPin { bus: &bus, index: 0 }, ColPin { bus: &bus, index: 1 }];
        let mut matrix = Matrix::new(rows, cols).unwrap();
        let mut delay = NoDelay { total_us: 0 };
        let code = matrix.scan(&mut delay).unwrap();
        (code, delay.total_us)
    }

    struct BrokenCol;

    impl ErrorType for BrokenCol {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenCol {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn idle_matrix_is_zero() {
        assert_eq!(scan([[false; COLS]; ROWS]).0, 0);
    }

    #[test]
    fn each_position_has_its_code() {
        assert_eq!(scan([[true, false], [false, false]]).0, 1);
        assert_eq!(scan([[false, true], [false, false]]).0, 2);
        assert_eq!(scan([[false, false], [true, false]]).0, 3);
        assert_eq!(scan([[false, false], [false, true]]).0, 4);
    }

    #[test]
    fn last_pressed_in_scan_order_wins() {
        assert_eq!(scan([[true, true], [false, false]]).0, 2);
        assert_eq!(scan([[true, false], [true, false]]).0, 3);
        assert_eq!(scan([[true; COLS]; ROWS]).0, 4);
    }

    #[test]
    fn each_row_settles() {
        assert_eq!(scan([[false; COLS]; ROWS]).1, ROWS as u32 * MATRIX_SETTLE_US);
    }

    #[test]
    fn pin_error_aborts_scan() {
        let bus = Bus {
            driven: Cell::new(None),
            pressed: [[true; COLS]; ROWS],
        };
        let rows = [RowPin { bus: &bus, index: 0 }, RowPin { bus: &bus, index: 1 }];
        let mut matrix = Matrix::new(rows, [BrokenCol, BrokenCol]).unwrap();
        let mut delay = NoDelay { total_us: 0 };
        assert_eq!(matrix.scan(&mut delay), Err(Error::Gpio));
        assert_eq!(delay.total_us, MATRIX_SETTLE_US);
    }
}
