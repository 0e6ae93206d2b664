//! Serial audio player (DFPlayer-style) command frames.
//!
//! Every frame is 10 bytes:
//! ```text
//! 7E FF 06 CMD FB PH PL CH CL EF
//! │  │  │  │   │  └──┴── parameter (big-endian)
//! │  │  │  │   └──────── 1 = ask the module to acknowledge
//! │  │  │  └──────────── command
//! │  │  └─────────────── payload length
//! │  └────────────────── version
//! └───────────────────── start marker          EF = end marker
//! ```
//! `CH CL` is the two's complement of the sum of bytes 1..=6.

use crate::config::PLAYER_MAX_VOLUME;
use crate::error::Error;
use embedded_io_async::{Read, Write};
use heapless::Vec;

pub const FRAME_LEN: usize = 10;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LENGTH: u8 = 0x06;
const END: u8 = 0xEF;

/// Commands the player understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Skip to the next track.
    Next,
    /// Back to the previous track.
    Previous,
    /// Play track number `n` (1-based) from the root folder.
    PlayTrack(u16),
    /// Set the volume; clamped to `0..=PLAYER_MAX_VOLUME` when encoded.
    SetVolume(u8),
    /// Module reset.
    Reset,
    /// Resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Ask for the current play state.
    QueryStatus,
    /// Ask for the current volume.
    QueryVolume,
}

impl Command {
    /// Command byte (`CMD`).
    pub fn code(&self) -> u8 {
        match self {
            Command::Next => 0x01,
            Command::Previous => 0x02,
            Command::PlayTrack(_) => 0x03,
            Command::SetVolume(_) => 0x06,
            Command::Reset => 0x0C,
            Command::Play => 0x0D,
            Command::Pause => 0x0E,
            Command::QueryStatus => 0x42,
            Command::QueryVolume => 0x43,
        }
    }

    /// Parameter word (`PH PL`).
    pub fn param(&self) -> u16 {
        match *self {
            Command::PlayTrack(track) => track,
            Command::SetVolume(volume) => u16::from(clamp_volume(volume)),
            _ => 0,
        }
    }
}

/// Clamp a requested volume to what the player accepts.
pub fn clamp_volume(requested: u8) -> u8 {
    requested.min(PLAYER_MAX_VOLUME)
}

fn checksum(body: &[u8]) -> u16 {
    let sum = body.iter().fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)));
    0u16.wrapping_sub(sum)
}

/// Encode `command` into a complete frame.
pub fn encode(command: Command, feedback: bool) -> [u8; FRAME_LEN] {
    let [ph, pl] = command.param().to_be_bytes();
    let mut frame = [
        START,
        VERSION,
        LENGTH,
        command.code(),
        u8::from(feedback),
        ph,
        pl,
        0,
        0,
        END,
    ];
    let [ch, cl] = checksum(&frame[1..7]).to_be_bytes();
    frame[7] = ch;
    frame[8] = cl;
    frame
}

/// A decoded inbound frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Command byte the module answered with.
    pub command: u8,
    /// Parameter word, e.g. the volume for a volume query.
    pub param: u16,
}

impl Response {
    pub fn decode(frame: &[u8]) -> Result<Self, Error> {
        if frame.len() < FRAME_LEN {
            return Err(Error::ShortResponse(frame.len()));
        }
        if frame[0] != START || frame[1] != VERSION || frame[2] != LENGTH || frame[9] != END {
            return Err(Error::BadFrame);
        }
        let expected = checksum(&frame[1..7]);
        let found = u16::from_be_bytes([frame[7], frame[8]]);
        if expected != found {
            return Err(Error::Checksum { expected, found });
        }
        Ok(Self {
            command: frame[3],
            param: u16::from_be_bytes([frame[5], frame[6]]),
        })
    }
}

/// Player on a byte-stream UART.
///
/// Bytes of a partial inbound frame are kept between reads, so a read that
/// is cancelled by a timeout loses nothing.
pub struct Player<U> {
    uart: U,
    rx: Vec<u8, FRAME_LEN>,
    feedback: bool,
}

impl<U: Read + Write> Player<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            rx: Vec::new(),
            feedback: false,
        }
    }

    /// Request acknowledgement frames for every command.
    pub fn with_feedback(mut self, feedback: bool) -> Self {
        self.feedback = feedback;
        self
    }

    /// Encode and write one command frame.
    pub async fn send(&mut self, command: Command) -> Result<(), Error> {
        let frame = encode(command, self.feedback);
        self.uart.write_all(&frame).await.map_err(|_| Error::Uart)?;
        self.uart.flush().await.map_err(|_| Error::Uart)
    }

    pub async fn play_track(&mut self, track: u16) -> Result<(), Error> {
        self.send(Command::PlayTrack(track)).await
    }

    /// Set the volume, clamped to `0..=PLAYER_MAX_VOLUME`. Returns the
    /// applied value.
    pub async fn set_volume(&mut self, requested: u8) -> Result<u8, Error> {
        let applied = clamp_volume(requested);
        self.send(Command::SetVolume(applied)).await?;
        Ok(applied)
    }

    /// Read one inbound frame, hand its raw bytes to `display`, then decode.
    ///
    /// Bytes before a start marker are skipped, and a window that fails to
    /// decode is dropped up to the next start marker, so a truncated frame
    /// never shifts the frames after it. A stream that ends before a full
    /// frame yields `Ok(None)` after showing the partial bytes.
    pub async fn read_response<F>(&mut self, mut display: F) -> Result<Option<Response>, Error>
    where
        F: FnMut(&[u8]),
    {
        loop {
            if !self.fill().await? {
                if self.rx.is_empty() {
                    return Ok(None);
                }
                display(self.rx.as_slice());
                #[cfg(feature = "defmt")]
                defmt::warn!("Player: short response ({} bytes)", self.rx.len());
                self.rx.clear();
                return Ok(None);
            }

            match Response::decode(self.rx.as_slice()) {
                Ok(response) => {
                    display(self.rx.as_slice());
                    self.rx.clear();
                    return Ok(Some(response));
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Player: discarding response: {}", _e);
                    self.resync(1);
                }
            }
        }
    }

    /// Read until `rx` holds a full frame that starts on a start marker.
    /// Returns `false` if the stream ended first.
    async fn fill(&mut self) -> Result<bool, Error> {
        let mut chunk = [0u8; FRAME_LEN];
        loop {
            self.resync(0);
            if self.rx.is_full() {
                return Ok(true);
            }
            let want = FRAME_LEN - self.rx.len();
            let n = self
                .uart
                .read(&mut chunk[..want])
                .await
                .map_err(|_| Error::Uart)?;
            if n == 0 {
                return Ok(false);
            }
            self.rx
                .extend_from_slice(&chunk[..n])
                .map_err(|_| Error::BufferOverflow)?;
        }
    }

    /// Drop everything before the first start marker at or after `from`.
    fn resync(&mut self, from: usize) {
        let start = self
            .rx
            .iter()
            .skip(from)
            .position(|&b| b == START)
            .map(|i| i + from);
        match start {
            Some(0) => {}
            Some(at) => {
                let kept = self.rx.len() - at;
                self.rx.copy_within(at.., 0);
                self.rx.truncate(kept);
            }
            None => self.rx.clear(),
        }
    }

    /// Give back the UART.
    pub fn release(self) -> U {
        self.uart
    }
}
