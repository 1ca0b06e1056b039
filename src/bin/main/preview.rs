//! Host build: renders the menu to the terminal with a scripted input.

use core::convert::Infallible;

use log::info;
use pedometer_core::{
    MenuError,
    clock::ClockCounter,
    input::{InputProvider, MenuAction, mock::ScriptedInput},
    menu::Menu,
    store::{DataField, Store, Value},
};
use pedometer_hal::platform::display::{FrameSink, OledSurface};
use sh1106::{
    FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};

use crate::splash;

const PREVIEW_STEPS: u32 = 1_234;
const PREVIEW_SECONDS: u32 = 75;

const SCRIPT: &[MenuAction] = &[
    MenuAction::Enter,
    MenuAction::Up,
    MenuAction::Up,
    MenuAction::Enter,
    MenuAction::Up,
    MenuAction::Enter,
    MenuAction::Enter,
    MenuAction::Enter,
    MenuAction::Down,
    MenuAction::Down,
    MenuAction::Enter,
];

/// Prints each frame with half-block glyphs, two pixel rows per line.
struct AsciiSink;

impl FrameSink for AsciiSink {
    type Error = Infallible;

    fn flush_frame(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        print_frame(frame);
        Ok(())
    }
}

fn print_frame(frame: &FrameBuffer) {
    let lit = |x, y| frame.pixel(x, y).unwrap_or(false);

    println!("+{}+", "-".repeat(WIDTH));
    for y in (0..HEIGHT).step_by(2) {
        let row: String = (0..WIDTH)
            .map(|x| match (lit(x, y), lit(x, y + 1)) {
                (true, true) => '\u{2588}',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (false, false) => ' ',
            })
            .collect();
        println!("|{row}|");
    }
    println!("+{}+", "-".repeat(WIDTH));
}

pub fn run() -> Result<(), MenuError<Infallible>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    print_frame(&splash::splash_frame());

    let mut store = Store::new();
    store.initialize()?;
    store.write(DataField::Steps, Value::U32(PREVIEW_STEPS))?;

    let mut clock = ClockCounter::new();
    clock.init(1)?;
    for _ in 0..PREVIEW_SECONDS {
        clock.process_tick(&mut store)?;
    }

    let mut surface = OledSurface::new(AsciiSink);
    let mut menu = Menu::new();
    menu.init(&store, &mut surface)?;

    let mut script = ScriptedInput::new(SCRIPT);
    while let Ok(Some(action)) = script.poll_action() {
        info!("preview: {:?}", action);
        menu.action(action, &mut store, &mut surface)?;
    }

    info!(
        "preview: {} frames, time {:02}:{:02}:{:02}",
        surface.frames_rendered(),
        store.read_u8(DataField::Hours)?,
        store.read_u8(DataField::Minutes)?,
        store.read_u8(DataField::Seconds)?,
    );
    Ok(())
}
