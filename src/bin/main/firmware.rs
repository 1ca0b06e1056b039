use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    spi::master::Spi,
    time::Rate,
    timer::timg::TimerGroup,
};
use log::{LevelFilter, info, warn};
use pedometer_core::{
    clock::{ClockCounter, TickFlag},
    input::{InputProvider, MenuAction},
    menu::Menu,
    store::{DataField, Store},
};
use pedometer_hal::{
    input::buttons::{ButtonConfig, ButtonInput},
    platform::display::OledSurface,
};
use sh1106::Sh1106;

use crate::splash;

const DISPLAY_SPI_HZ: u32 = 8_000_000;
const TICK_PERIOD_MS: u64 = 10;
const TICKS_PER_SECOND: u32 = 100;
const SPLASH_MS: u64 = 5_000;
const BUTTON_COUNT: usize = 3;

static TICK: TickFlag = TickFlag::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

pub async fn run(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: pedometer starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // OLED wiring: SCK=GPIO8, MOSI=GPIO10, CS=GPIO9, DC=GPIO20, RST=GPIO21
    let cs = Output::new(peripherals.GPIO9, Level::High, OutputConfig::default());
    let dc = Output::new(peripherals.GPIO20, Level::Low, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO21, Level::High, OutputConfig::default());

    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        .with_mode(esp_hal::spi::Mode::_0);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO8)
        .with_mosi(peripherals.GPIO10);
    let spi = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let mut delay = Delay::new();
    let mut display = Sh1106::new(
        spi,
        dc,
        rst,
        sh1106::Config {
            spi_hz: DISPLAY_SPI_HZ,
            ..sh1106::Config::default()
        },
    );

    esp_println::println!("display: init begin (SCK=8 MOSI=10 CS=9 DC=20 RST=21)");
    if let Err(err) = display.reset(&mut delay) {
        warn!("display reset failed: {:?}", err);
    }
    if let Err(err) = display.init() {
        warn!("display init failed: {:?}", err);
    } else {
        esp_println::println!("display: init ok");
    }
    if let Err(err) = display.flush(&splash::splash_frame()) {
        warn!("display splash flush failed: {:?}", err);
    }
    Timer::after_millis(SPLASH_MS).await;

    // Buttons: ENTER=GPIO3, UP=GPIO4, DOWN=GPIO5, wired to 3V3
    let input_cfg = InputConfig::default().with_pull(Pull::Down);
    let mut buttons: ButtonInput<_, BUTTON_COUNT> = ButtonInput::new(
        [
            (Input::new(peripherals.GPIO3, input_cfg), MenuAction::Enter),
            (Input::new(peripherals.GPIO4, input_cfg), MenuAction::Up),
            (Input::new(peripherals.GPIO5, input_cfg), MenuAction::Down),
        ],
        ButtonConfig::default(),
    )
    .unwrap();

    let mut store = Store::new();
    store.initialize().unwrap();
    let mut clock = ClockCounter::new();
    clock.init(TICKS_PER_SECOND).unwrap();

    let mut surface = OledSurface::new(display);
    let mut menu = Menu::new();
    match menu.init(&store, &mut surface) {
        Ok(()) => {}
        Err(err) if err.is_fatal() => panic!("menu: invalid page graph: {:?}", err),
        Err(err) => warn!("menu: first frame failed: {:?}", err),
    }

    let tick_future = async {
        let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
        loop {
            ticker.next().await;
            TICK.raise();
        }
    };

    let ui_future = async {
        let mut goal_announced = false;

        loop {
            if TICK.take() {
                match clock.process_tick(&mut store) {
                    Ok(true) => {
                        if let Err(err) = menu.redraw(&store, &mut surface) {
                            warn!("menu: redraw failed: {:?}", err);
                        }
                    }
                    Ok(false) => {}
                    Err(err) => warn!("clock: tick failed: {:?}", err),
                }

                // One scan per tick; presses queued in the same scan drain on
                // the following ticks.
                match buttons.poll_action() {
                    Ok(Some(action)) => {
                        if let Err(err) = menu.action(action, &mut store, &mut surface) {
                            warn!("menu: {:?} failed: {:?}", action, err);
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!("buttons: scan failed: {:?}", err),
                }

                let alert = store.read_bool(DataField::GoalAlert).unwrap_or(false);
                let reached = store.goal_reached().unwrap_or(false);
                if !reached {
                    goal_announced = false;
                } else if alert && !goal_announced {
                    info!(
                        "goal reached: {} steps",
                        store.read_u32(DataField::Steps).unwrap_or(0)
                    );
                    goal_announced = true;
                }
            }

            Timer::after_millis(1).await;
        }
    };

    let _ = embassy_futures::join::join(tick_future, ui_future).await;
    unreachable!()
}
