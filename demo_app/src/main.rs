//! Window demo application
//!
//! Opens one window from `window_demo.toml` (defaults when the file is
//! missing), pumps it every frame and logs the translated events. Escape or
//! closing the window quits; F11 toggles the frame.

#![cfg_attr(not(windows), allow(dead_code))]

use engine_window::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Swap chain bookkeeping without a GPU behind it
#[derive(Default)]
struct LoggingGpu {
    next_handle: u64,
}

impl Gpu for LoggingGpu {
    fn create_swap_chain(
        &mut self,
        surface: SurfaceHandle,
        descriptor: &SwapChainDescriptor,
    ) -> Result<SwapChainHandle, GpuError> {
        self.next_handle += 1;
        log::info!(
            "create swap chain #{} on {surface:?}: {}x{} {:?} {:?}",
            self.next_handle,
            descriptor.width,
            descriptor.height,
            descriptor.format,
            descriptor.present_mode
        );
        Ok(SwapChainHandle(self.next_handle))
    }

    fn release_swap_chain(&mut self, swap_chain: SwapChainHandle) -> Result<(), GpuError> {
        log::info!("release swap chain #{}", swap_chain.0);
        Ok(())
    }
}

#[derive(Default)]
struct DemoHost {
    gpu: LoggingGpu,
    surfaces: u64,
}

impl Host for DemoHost {
    fn gpu(&mut self) -> &mut dyn Gpu {
        &mut self.gpu
    }

    fn init_window(&mut self, id: WindowId, record: &mut WindowRecord) -> Result<(), HostError> {
        self.surfaces += 1;
        let surface = SurfaceHandle(self.surfaces);
        if let Some(native) = record.native.as_ref() {
            log::info!("{id:?}: surface {surface:?} for {:?}", native.surface_descriptor().raw_window_handle());
        }
        record.surface = Some(surface);
        record.swap_chain = Some(self.gpu.create_swap_chain(surface, &record.swap_chain_descriptor)?);
        Ok(())
    }
}

const CONFIG_PATH: &str = "window_demo.toml";

#[cfg(windows)]
fn run(config: BackendConfig) -> Result<(), DemoError> {
    let mut windows = WindowTable::new();
    let main_window = windows.insert(config.window.record());
    let mut backend = WindowBackend::win32(config)?;
    let mut host = DemoHost::default();

    log::info!("Entering tick loop");
    'frames: loop {
        backend.tick(&mut windows, &mut host)?;

        let events: Vec<Event> = backend.drain_events().collect();
        for event in events {
            log::debug!("{event:?}");
            match event {
                Event::Close { .. } | Event::KeyPress { key: Key::Escape, .. } => break 'frames,
                Event::KeyPress { key: Key::F11, window, .. } => {
                    let decorated = windows.get(window).is_some_and(|record| record.decorated);
                    windows.set_decorated(window, !decorated);
                }
                Event::WindowResize { window, size } => {
                    windows.set_title(window, format!("Window Demo - {}x{}", size.width, size.height));
                }
                _ => {}
            }
        }

        windows.end_tick();
        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    if let Some(mut record) = windows.remove(main_window) {
        backend.destroy_window(main_window, &mut record, &mut host)?;
    }
    Ok(())
}

#[cfg(not(windows))]
fn run(config: BackendConfig) -> Result<(), DemoError> {
    log::warn!(
        "No native backend for this platform; \"{}\" ({}x{}) was not opened",
        config.window.title,
        config.window.width,
        config.window.height
    );
    Ok(())
}

fn main() -> Result<(), DemoError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting window demo");
    let config = BackendConfig::load_or_default(CONFIG_PATH)?;
    log::info!("Window class \"{}\", present mode {:?}", config.class_name, config.present_mode);

    run(config)?;
    log::info!("Window demo finished");
    Ok(())
}
