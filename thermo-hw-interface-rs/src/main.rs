//! thermo-hw-interface
//!
//! Encoder + button → ProcessState menu and UART tuning link firmware for
//! the Raspberry Pi Pico 2. Wires the `thermo` library into a live loop:
//!
//! 1. The rotary encoder is decoded by a PIO state machine; each detent
//!    updates an absolute count that the encoder task hands to
//!    `MenuSession::on_encoder()`.
//! 2. The push button wakes the button task on a falling edge; debouncing
//!    happens inside `MenuSession::on_button()` against the press time.
//! 3. The command task assembles `Name:value` lines from UART RX and
//!    applies them through the registry.
//! 4. The telemetry task emits one `Setpoint:..,Input:..,..` line per
//!    period on UART TX for the PC monitor.
//! 5. The menu trace task snapshots a `MenuView` whenever the redraw flag
//!    is set and logs it over RTT.
//!
//! The DHT sensor reader and the PID loop are separate collaborators that
//! read and write `ProcessState::control`; they are not part of this stage.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::rotary_encoder::{Direction, PioEncoder, PioEncoderProgram};
use embassy_rp::uart::{self, Uart, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermo::config::{MenuConfig, SerialConfig};
use thermo::parameter_registry::ParameterRegistry;
use thermo::serial::{apply_command, telemetry_line, LineBuffer, COMMAND_CAPACITY};
use thermo::session::{view_changed, MenuSession, MenuView, ViewMode};
use thermo::state::ProcessState;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    UART0_IRQ => uart::InterruptHandler<UART0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Process-wide control cells and UI session. Written by the encoder,
/// button and command tasks; read by telemetry and the menu trace.
static PROCESS_STATE: StaticCell<Mutex<CriticalSectionRawMutex, ProcessState>> =
    StaticCell::new();

type SharedState = &'static Mutex<CriticalSectionRawMutex, ProcessState>;

/// Menu view refresh rate.
const MENU_TRACE_PERIOD_MS: u64 = 33;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// PIO-decoded rotary encoder → menu session.
///
/// The mutex is held only for the in-memory update, never across the PIO
/// wait.
#[embassy_executor::task]
async fn encoder_task(
    mut encoder: PioEncoder<'static, PIO0, 0>,
    state: SharedState,
    menu: MenuSession<'static>,
) {
    info!("Encoder task started");

    let mut position: i32 = 0;
    menu.sync_encoder(&mut *state.lock().await, position);

    loop {
        position = match encoder.read().await {
            Direction::Clockwise => position.wrapping_add(1),
            Direction::CounterClockwise => position.wrapping_sub(1),
        };

        let mut shared = state.lock().await;
        match menu.on_encoder(&mut shared, position) {
            Ok(event) => debug!("Encoder {}: {}", position, event),
            Err(e) => error!("Encoder update failed: {}", e),
        }
    }
}

/// Push button (active-low) → menu session.
#[embassy_executor::task]
async fn button_task(mut button: Input<'static>, state: SharedState, menu: MenuSession<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        let now_ms = Instant::now().as_millis();

        let event = {
            let mut shared = state.lock().await;
            menu.on_button(&mut shared, now_ms)
        };
        debug!("Button at {} ms: {}", now_ms, event);
    }
}

/// UART RX → `Name:value` commands → registry.
#[embassy_executor::task]
async fn command_task(
    mut rx: UartRx<'static, UART0, uart::Async>,
    state: SharedState,
    registry: ParameterRegistry<'static>,
) {
    info!("Command task started");

    let mut line_buffer = LineBuffer::<COMMAND_CAPACITY>::new();
    let mut byte = [0u8; 1];

    loop {
        if let Err(e) = rx.read(&mut byte).await {
            warn!("UART read error, dropping line: {}", e);
            line_buffer.discard();
            continue;
        }

        let line = match line_buffer.push(byte[0]) {
            None => continue,
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!("Dropped serial line: {}", e);
                continue;
            }
        };

        let result = {
            let mut shared = state.lock().await;
            apply_command(&registry, &mut shared, &line)
        };
        match result {
            Ok(applied) => info!(
                "{} = {} ({})",
                registry.name_of(applied.index).unwrap_or("?"),
                applied.value,
                applied.outcome
            ),
            Err(e) => warn!("Rejected command {=str}: {}", line.as_str(), e),
        }
    }
}

/// Periodic telemetry line → UART TX.
#[embassy_executor::task]
async fn telemetry_task(
    mut tx: UartTx<'static, UART0, uart::Async>,
    state: SharedState,
    registry: ParameterRegistry<'static>,
    config: SerialConfig,
) {
    info!("Telemetry task started");

    let mut ticker = Ticker::every(Duration::from_millis(config.telemetry_period_ms()));
    loop {
        ticker.next().await;

        // Format under the lock, transmit without it.
        let line = {
            let shared = state.lock().await;
            telemetry_line(&registry, &shared.control)
        };

        match line {
            Ok(line) => {
                if let Err(e) = tx.write(line.as_bytes()).await {
                    warn!("UART write error: {}", e);
                }
            }
            Err(_) => error!("Telemetry line overflow"),
        }
    }
}

/// Redraw flag → `MenuView` snapshot → RTT log.
///
/// Stands in for the display subsystem: consumes `display_needs_update`
/// and skips frames identical to the previous one.
#[embassy_executor::task]
async fn menu_trace_task(state: SharedState, menu: MenuSession<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(MENU_TRACE_PERIOD_MS));
    let mut last_view = MenuView::default();

    loop {
        ticker.next().await;

        let view = {
            let mut shared = state.lock().await;
            if !shared.ui.take_redraw() {
                continue;
            }
            MenuView::build(&menu, &shared)
        };

        if !view_changed(&last_view, &view) {
            continue;
        }

        let title = match view.mode {
            ViewMode::Status => "status",
            ViewMode::Browse => "menu",
            ViewMode::Edit => "edit",
        };
        info!("[{=str}] cursor_y={}", title, view.cursor_y);
        for (i, row) in view.rows().iter().enumerate() {
            let marker = if view.highlighted == Some(i) { ">" } else { " " };
            match row.value {
                Some(v) => info!("{=str} {=str}: {}", marker, row.label(), v),
                None => info!("{=str} {=str}", marker, row.label()),
            }
        }

        last_view = view;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("thermo-hw-interface starting");

    // -- Pin assignments ------------------------------------------------------
    // UART0 TX → GP0   (p.PIN_0)
    // UART0 RX → GP1   (p.PIN_1)
    // ENC_A    → GP4   (p.PIN_4)
    // ENC_B    → GP5   (p.PIN_5)
    // ENC_SW   → GP6   (p.PIN_6)  active-low, pull-up enabled
    // -------------------------------------------------------------------------

    let menu_config = MenuConfig::default();
    let serial_config = SerialConfig::default();

    // State first: every parameter at its default before any task runs.
    let registry = ParameterRegistry::builtin();
    let state = PROCESS_STATE.init(Mutex::new(ProcessState::new(&registry, &menu_config)));
    let menu = MenuSession::new(registry, menu_config);

    // Rotary encoder decoded by PIO0 SM0.
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let encoder_program = PioEncoderProgram::new(&mut common);
    let encoder = PioEncoder::new(&mut common, sm0, p.PIN_4, p.PIN_5, &encoder_program);

    let button = Input::new(p.PIN_6, Pull::Up);

    // UART0 at the monitor's baud rate, split into independent halves.
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = serial_config.baud_rate;
    let uart = Uart::new(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // -- Spawn tasks ----------------------------------------------------------

    unwrap!(spawner.spawn(encoder_task(encoder, state, menu)));
    unwrap!(spawner.spawn(button_task(button, state, menu)));
    unwrap!(spawner.spawn(command_task(rx, state, registry)));
    unwrap!(spawner.spawn(telemetry_task(tx, state, registry, serial_config)));
    unwrap!(spawner.spawn(menu_trace_task(state, menu)));

    info!("All tasks spawned");
}
