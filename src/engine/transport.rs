//! The seam between the report state machine and the USB stack.

use crate::error::Error;
use crate::hid::HidReport;

/// What the state machine needs from a HID transport.
///
/// `send` only queues the report; the transport later reports completion
/// through `ReportEngine::on_report_complete` with the report's channel id.
pub trait HidTransport {
    /// The host has suspended the bus.
    fn is_suspended(&self) -> bool;

    /// A new report can be accepted right now.
    fn is_ready(&self) -> bool;

    /// Ask the host to resume the bus.
    fn remote_wakeup(&mut self);

    fn send(&mut self, report: &HidReport) -> Result<(), Error>;
}
