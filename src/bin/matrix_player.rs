//! matrix-player - 2x2 button matrix driving an LED and a serial audio
//! player.
//!
//! Each scan blinks the status LED once per code, asks the player to play
//! the track of the same number, and shows whatever the player sends back.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::{bind_interrupts, peripherals, uarte};
use embassy_time::{with_timeout, Delay, Duration, Timer};
use hidknob::config;
use hidknob::matrix::Matrix;
use hidknob::player::Player;
use hidknob::Error;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    UARTE0_UART0 => buffered_uarte::InterruptHandler<peripherals::UARTE0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("matrix-player starting");

    // DK LED is active-low.
    let mut led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    let rows = [
        Output::new(p.P0_02, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_29, Level::Low, OutputDrive::Standard),
    ];
    let cols = [
        Input::new(p.P0_30, Pull::Down),
        Input::new(p.P0_31, Pull::Down),
    ];
    // embassy-nrf GPIO is infallible.
    let mut matrix = unwrap!(Matrix::new(rows, cols));

    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD9600;
    let mut rx_buffer = [0u8; 64];
    let mut tx_buffer = [0u8; 32];
    let uart = BufferedUarte::new(
        p.UARTE0,
        p.TIMER0,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P0_08,
        p.P0_06,
        uart_config,
        &mut rx_buffer,
        &mut tx_buffer,
    );
    let mut player = Player::new(uart);
    match player.set_volume(config::PLAYER_MAX_VOLUME).await {
        Ok(v) => info!("Player: volume {}", v),
        Err(e) => warn!("Player: set volume failed: {}", e),
    }

    loop {
        let code = match matrix.scan(&mut Delay) {
            Ok(code) => code,
            Err(e) => {
                warn!("Matrix: scan failed: {}", e);
                0
            }
        };

        for _ in 0..code {
            led.set_low();
            Timer::after(Duration::from_millis(config::BLINK_MS)).await;
            led.set_high();
            Timer::after(Duration::from_millis(config::BLINK_MS)).await;
        }

        if code > 0 {
            info!("Button pressed: {}", code);
            if let Err(e) = player.play_track(u16::from(code)).await {
                warn!("Player: command failed: {}", e);
            }
        }

        let timeout = Duration::from_millis(config::PLAYER_RESPONSE_TIMEOUT_MS);
        let response = with_timeout(timeout, player.read_response(show_frame))
            .await
            .unwrap_or(Err(Error::Timeout));
        match response {
            Ok(Some(r)) => info!("Player: {}", r),
            Ok(None) | Err(Error::Timeout) => {}
            Err(e) => warn!("Player: read failed: {}", e),
        }

        led.set_high();
        Timer::after(Duration::from_millis(config::BLINK_MS)).await;
    }
}

fn show_frame(raw: &[u8]) {
    info!("Player frame: {=[u8]:02x}", raw);
}
