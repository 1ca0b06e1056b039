#![cfg_attr(target_arch = "xtensa", no_std)]
#![cfg_attr(target_arch = "xtensa", no_main)]
#![cfg_attr(
    target_arch = "xtensa",
    deny(
        clippy::mem_forget,
        reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
        holding buffers for the duration of a data transfer."
    )
)]

#[path = "main/splash.rs"]
mod splash;

#[cfg(target_arch = "xtensa")]
#[path = "main/firmware.rs"]
mod firmware;

#[cfg(not(target_arch = "xtensa"))]
#[path = "main/preview.rs"]
mod preview;

#[cfg(target_arch = "xtensa")]
#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: embassy_executor::Spawner) -> ! {
    firmware::run(spawner).await
}

#[cfg(not(target_arch = "xtensa"))]
fn main() -> Result<(), pedometer_core::MenuError<core::convert::Infallible>> {
    preview::run()
}
