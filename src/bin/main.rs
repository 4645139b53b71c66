#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

extern crate alloc;

use alloc::vec::Vec;

use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c},
    time::Rate,
};
use knobmenu_core::{
    BuildError, DurationSpec, IntegerSpec, MenuConfig, MenuContext, MenuItem, Navigator, Record,
    Value,
    input::CountingEncoder,
    menu::Devices,
};
use knobmenu_hal::{
    input::rotary::{QuadratureEncoder, RotaryConfig},
    render::GraphicsSurface,
};
use log::{LevelFilter, error, info};
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const I2C_HZ: u32 = 400_000;
// Half-step encoder: two transitions per detent.
const ENCODER_TRANSITIONS_PER_STEP: u8 = 2;
const ENCODER_DIRECTION_INVERTED: bool = false;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    esp_println::println!("panic: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

fn demo_items() -> Result<Vec<MenuItem>, BuildError> {
    Ok(alloc::vec![
        MenuItem::title("==== Demo ==="),
        MenuItem::percentage("Awesome", 50)?,
        MenuItem::duration("Duration", DurationSpec::default()),
        MenuItem::integer("Threshold", IntegerSpec::new(42))?,
        MenuItem::submenu(
            "Print...",
            alloc::vec![
                MenuItem::callback("BEEP", |_: &MenuContext| info!("BEEP!")),
                MenuItem::callback("BOOP", |_: &MenuContext| info!("BOOP!")),
            ],
        ),
        MenuItem::exit("Exit"),
    ])
}

fn flush_display<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    let _ = display.flush();
}

fn log_record(record: &Record, depth: usize) {
    for (key, value) in record.iter() {
        match value {
            Value::Record(nested) => {
                info!("{:indent$}{}:", "", key, indent = depth * 2);
                log_record(nested, depth + 1);
            }
            _ => info!("{:indent$}{} = {}", "", key, value, indent = depth * 2),
        }
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: knobmenu starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Item labels, values, and nested menus live on the heap.
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Display wiring used by this demo: SDA=GPIO39, SCL=GPIO34
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_hz(I2C_HZ)),
    )
    .unwrap()
    .with_sda(peripherals.GPIO39)
    .with_scl(peripherals.GPIO34);

    let mut display = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    if let Err(err) = display.init() {
        info!("display initialize failed: {:?}", err);
    }
    display.clear_buffer();
    let _ = display.flush();

    let surface = GraphicsSurface::with_present(display, flush_display);

    // Rotary encoder wiring used by this demo:
    // CLK=GPIO1, DT=GPIO3, SW=GPIO2
    let input_cfg = InputConfig::default().with_pull(Pull::Up);
    let encoder_clk = Input::new(peripherals.GPIO1, input_cfg);
    let encoder_dt = Input::new(peripherals.GPIO3, input_cfg);
    let button = Input::new(peripherals.GPIO2, input_cfg);

    let encoder = QuadratureEncoder::new(
        encoder_clk,
        encoder_dt,
        RotaryConfig::default()
            .with_direction_inverted(ENCODER_DIRECTION_INVERTED)
            .with_transitions_per_step(ENCODER_TRANSITIONS_PER_STEP),
    )
    .unwrap();
    let encoder = CountingEncoder::with_reference(encoder).unwrap();

    let devices = Devices::new(surface, encoder, button, Delay::new(), MenuConfig::default());

    let result = demo_items().and_then(|items| Navigator::new(items, devices));
    match result {
        Ok(mut navigator) => match navigator.run_collect() {
            Ok((outcome, record)) => {
                info!("menu result outcome={:?}", outcome);
                log_record(&record, 0);
            }
            Err(err) => error!("menu serialize failed: {}", err),
        },
        Err(err) => error!("menu build failed: {}", err),
    }

    loop {
        core::hint::spin_loop();
    }
}
