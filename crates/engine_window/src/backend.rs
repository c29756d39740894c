//! Window backend: lifecycle, message pump and routing
//!
//! [`WindowBackend::tick`] is the only entry point the engine driver needs.
//! For every window in the table it either creates the native window (first
//! tick) or pushes pending engine edits to the OS and then drains and
//! translates that window's queued messages. Resulting events land in the
//! backend's [`EventQueue`].
//!
//! Per-window routing state (the owning [`WindowId`] and the window's
//! [`Translator`]) lives in a side table keyed by native handle.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::config::BackendConfig;
use crate::events::{Event, EventQueue};
use crate::gpu::{Gpu, GpuError};
use crate::platform::{
    CreateWindowDesc, DeviceContext, Message, NativeHandle, Platform, PlatformError, RawMessage,
};
use crate::translate::{Disposition, Translator};
use crate::window::{NativeWindow, Size, SurfaceDescriptor, WindowFields, WindowId, WindowRecord, WindowTable};

/// Engine-side hooks the backend calls into
pub trait Host {
    /// GPU layer used to rebuild swap chains on resize
    fn gpu(&mut self) -> &mut dyn Gpu;

    /// Post-creation hook, run after the native window exists and before it
    /// is shown
    ///
    /// This is where the engine creates the window's surface and first swap
    /// chain from `record.native`'s surface descriptor and
    /// `record.swap_chain_descriptor`.
    fn init_window(&mut self, id: WindowId, record: &mut WindowRecord) -> Result<(), HostError>;
}

/// Errors reported by a [`Host`]
#[derive(Error, Debug)]
pub enum HostError {
    /// Window initialization failed
    #[error("Window initialization failed: {0}")]
    InitFailed(String),

    /// GPU error during initialization
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

/// Window backend errors
#[derive(Error, Debug)]
pub enum BackendError {
    /// The native window could not be created
    #[error("Failed to create window {window:?}: {source}")]
    Creation {
        /// Affected window
        window: WindowId,
        /// Underlying platform failure
        source: PlatformError,
    },

    /// The engine's window init hook failed
    #[error("Window {window:?} init hook failed: {source}")]
    Host {
        /// Affected window
        window: WindowId,
        /// Underlying host failure
        source: HostError,
    },

    /// Swap chain recreation failed
    #[error("Swap chain recreation failed for window {window:?}: {source}")]
    SwapChain {
        /// Affected window
        window: WindowId,
        /// Underlying GPU failure
        source: GpuError,
    },

    /// An engine edit could not be applied to the native window
    #[error("Failed to sync window {window:?}: {source}")]
    Sync {
        /// Affected window
        window: WindowId,
        /// Underlying platform failure
        source: PlatformError,
    },

    /// The window is not in the table
    #[error("Unknown window {0:?}")]
    UnknownWindow(WindowId),
}

#[derive(Debug)]
struct Route {
    window: WindowId,
    translator: Translator,
}

impl Route {
    fn new(window: WindowId) -> Self {
        Self {
            window,
            translator: Translator::new(),
        }
    }
}

/// Native window backend
pub struct WindowBackend {
    platform: Box<dyn Platform>,
    config: BackendConfig,
    routes: HashMap<NativeHandle, Route>,
    events: EventQueue,
}

impl std::fmt::Debug for WindowBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowBackend")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl WindowBackend {
    /// Create a backend over any platform implementation
    pub fn new(platform: Box<dyn Platform>, config: BackendConfig) -> Self {
        Self {
            platform,
            config,
            routes: HashMap::new(),
            events: EventQueue::new(),
        }
    }

    /// Create a backend over the Win32 platform
    #[cfg(windows)]
    pub fn win32(config: BackendConfig) -> Result<Self, PlatformError> {
        let platform = crate::platform::win32::Win32Platform::new()?;
        Ok(Self::new(Box::new(platform), config))
    }

    /// Backend configuration
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Events produced so far and not yet consumed
    pub const fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Mutable access to the event queue
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Take the oldest pending event
    pub fn poll_event(&mut self) -> Option<Event> {
        self.events.pop()
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, Event> {
        self.events.drain()
    }

    /// Window a native handle is routed to
    pub fn route(&self, handle: NativeHandle) -> Option<WindowId> {
        self.routes.get(&handle).map(|route| route.window)
    }

    /// Run one backend tick over every window in `table`
    ///
    /// Windows without a native counterpart are created; all others get their
    /// pending engine edits applied and their message queue drained. The first
    /// error aborts the tick.
    pub fn tick(&mut self, table: &mut WindowTable, host: &mut dyn Host) -> Result<(), BackendError> {
        let ids: Vec<WindowId> = table.ids().collect();
        for id in ids {
            let created = table.get(id).is_some_and(|record| record.native.is_some());
            if created {
                self.sync_outbound(id, table, host)?;
                self.pump_window(id, table, host)?;
            } else {
                self.ensure_window(id, table, host)?;
            }
        }
        Ok(())
    }

    /// Create the native window for `id` if it does not exist yet
    ///
    /// Returns `Ok(true)` when a window was created and `Ok(false)` when the
    /// record already had one. On failure every OS resource created so far is
    /// released and the record keeps `native = None`.
    pub fn ensure_window(
        &mut self,
        id: WindowId,
        table: &mut WindowTable,
        host: &mut dyn Host,
    ) -> Result<bool, BackendError> {
        let record = table.get_mut_raw(id).ok_or(BackendError::UnknownWindow(id))?;
        if record.native.is_some() {
            return Ok(false);
        }

        log::debug!("Creating native window for {id:?} ({}x{} \"{}\")", record.width, record.height, record.title);
        let creation = |source| BackendError::Creation { window: id, source };

        self.platform.register_class(&self.config.class_name).map_err(creation)?;
        let style = record.style();
        let outer_size = self.platform.outer_size(record.size(), style).map_err(creation)?;
        let handle = self
            .platform
            .create_window(&CreateWindowDesc {
                class_name: &self.config.class_name,
                title: &record.title,
                outer_size,
                style,
            })
            .map_err(creation)?;

        let device_context = match self.platform.create_device_context(handle) {
            Ok(device_context) => device_context,
            Err(source) => {
                self.platform.destroy_window(handle);
                return Err(creation(source));
            }
        };

        if let Err(err) = self.attach_window(id, record, handle, device_context, host) {
            self.abandon_window(record, handle, device_context);
            return Err(err);
        }

        table.mark_updated(id, WindowFields::NATIVE);
        Ok(true)
    }

    /// Release the native window of a record removed from the table
    ///
    /// Releases the swap chain, the device context and the OS window, and
    /// drops the route. The window's last restored geometry is copied into
    /// `record.saved_geometry`, so inserting the record again reopens the
    /// window where it was. Records that were never created are left
    /// untouched.
    pub fn destroy_window(&mut self, id: WindowId, record: &mut WindowRecord, host: &mut dyn Host) -> Result<(), BackendError> {
        if let Some(swap_chain) = record.swap_chain.take() {
            host.gpu()
                .release_swap_chain(swap_chain)
                .map_err(|source| BackendError::SwapChain { window: id, source })?;
        }
        let Some(native) = record.native.take() else {
            return Ok(());
        };
        log::debug!("Destroying native window for {id:?}");
        if let Some(rect) = native.saved_geometry() {
            record.saved_geometry = Some(rect);
        }
        self.routes.remove(&native.handle());
        self.platform.release_device_context(native.handle(), native.device_context());
        self.platform.destroy_window(native.handle());
        Ok(())
    }

    fn attach_window(
        &mut self,
        id: WindowId,
        record: &mut WindowRecord,
        handle: NativeHandle,
        device_context: DeviceContext,
        host: &mut dyn Host,
    ) -> Result<(), BackendError> {
        let creation = |source| BackendError::Creation { window: id, source };

        self.routes.insert(handle, Route::new(id));

        if let Some(rect) = record.saved_geometry {
            self.platform.set_window_rect(handle, rect).map_err(creation)?;
        }
        let client = self.platform.client_size(handle).map_err(creation)?;

        let surface_descriptor = SurfaceDescriptor::new(handle, self.platform.module_handle());
        record.native = Some(NativeWindow::new(handle, device_context, record.saved_geometry, surface_descriptor));
        record.swap_chain_descriptor.format = self.config.swap_chain_format;
        record.swap_chain_descriptor.present_mode = self.config.present_mode;
        record.apply_client_size(client);

        host.init_window(id, record)
            .map_err(|source| BackendError::Host { window: id, source })?;

        self.platform.show(handle);
        log::debug!("Window {id:?} shown with client area {}x{}", client.width, client.height);
        Ok(())
    }

    fn abandon_window(&mut self, record: &mut WindowRecord, handle: NativeHandle, device_context: DeviceContext) {
        log::warn!("Abandoning partially created window \"{}\"", record.title);
        self.routes.remove(&handle);
        record.native = None;
        self.platform.release_device_context(handle, device_context);
        self.platform.destroy_window(handle);
    }

    fn pump_window(&mut self, id: WindowId, table: &mut WindowTable, host: &mut dyn Host) -> Result<(), BackendError> {
        let Some(handle) = table.get(id).and_then(WindowRecord::native_handle) else {
            return Ok(());
        };

        let mut pending = VecDeque::new();
        self.platform.drain_messages(handle, &mut pending);
        if !pending.is_empty() {
            log::trace!("Pumping {} messages for {id:?}", pending.len());
        }

        while let Some(raw) = pending.pop_front() {
            let lookahead = pending.front().map(RawMessage::decode);
            self.dispatch(&raw, lookahead.as_ref(), table, host)?;
        }
        Ok(())
    }

    /// Route one message to its window's translator and apply the result
    ///
    /// Returns the value the OS window procedure should return.
    pub(crate) fn dispatch(
        &mut self,
        raw: &RawMessage,
        lookahead: Option<&Message>,
        table: &mut WindowTable,
        host: &mut dyn Host,
    ) -> Result<isize, BackendError> {
        let Some(route) = self.routes.get_mut(&raw.window) else {
            return Ok(self.platform.default_window_proc(raw));
        };
        let window = route.window;
        let Some(current) = table.get(window).map(WindowRecord::size) else {
            return Ok(self.platform.default_window_proc(raw));
        };

        let message = raw.decode();
        log::trace!("{window:?} <- {message:?}");

        let transition = route.translator.step(window, current, &message, lookahead, raw.mods);

        if transition.disposition == Disposition::Default {
            return Ok(self.platform.default_window_proc(raw));
        }
        if let Some(size) = transition.resize {
            // A maximized rectangle is not the geometry to restore on the next show
            let restored = !matches!(message, Message::Size { maximized: true, .. });
            self.apply_resize(window, size, restored, table, host)?;
        }
        self.events.extend(transition.events);
        Ok(0)
    }

    /// Rebuild the swap chain for a new client size and mirror the size
    ///
    /// Saved geometry is refreshed only when `restored` is set.
    fn apply_resize(
        &mut self,
        window: WindowId,
        size: Size,
        restored: bool,
        table: &mut WindowTable,
        host: &mut dyn Host,
    ) -> Result<(), BackendError> {
        let record = table.get_mut_raw(window).ok_or(BackendError::UnknownWindow(window))?;
        let swap_chain_error = |source| BackendError::SwapChain { window, source };
        let descriptor = record.swap_chain_descriptor.with_size(size);

        let gpu = host.gpu();
        if let Some(old) = record.swap_chain.take() {
            gpu.release_swap_chain(old).map_err(swap_chain_error)?;
        }
        if let Some(surface) = record.surface {
            record.swap_chain = Some(gpu.create_swap_chain(surface, &descriptor).map_err(swap_chain_error)?);
        }
        record.apply_client_size(size);

        if let Some(native) = record.native.as_mut().filter(|_| restored) {
            match self.platform.window_rect(native.handle()) {
                Ok(rect) => native.set_saved_geometry(rect),
                Err(err) => log::warn!("Keeping previous saved geometry for {window:?}: {err}"),
            }
        }

        table.mark_updated(window, WindowFields::SWAP_CHAIN);
        log::debug!("Swap chain for {window:?} rebuilt at {}x{}", size.width, size.height);
        Ok(())
    }

    /// Push engine edits raised through the table's tracked setters to the OS
    fn sync_outbound(&mut self, id: WindowId, table: &mut WindowTable, host: &mut dyn Host) -> Result<(), BackendError> {
        let sync_error = |source| BackendError::Sync { window: id, source };
        let (handle, style) = match table.get(id) {
            Some(record) => match record.native_handle() {
                Some(handle) => (handle, record.style()),
                None => return Ok(()),
            },
            None => return Err(BackendError::UnknownWindow(id)),
        };

        if table.updated(id, WindowFields::TITLE) {
            if let Some(record) = table.get(id) {
                log::debug!("Retitling {id:?} to \"{}\"", record.title);
                self.platform.set_title(handle, &record.title).map_err(sync_error)?;
            }
        }

        if table.updated(id, WindowFields::DECORATED) {
            log::debug!("Switching {id:?} to {style:?}");
            self.platform.set_style(handle, style).map_err(sync_error)?;
        }

        if table.updated(id, WindowFields::SIZE) {
            let requested = table.get(id).map_or_else(Size::default, WindowRecord::size);
            log::debug!("Resizing {id:?} to {}x{}", requested.width, requested.height);
            self.platform.set_client_size(handle, requested, style).map_err(sync_error)?;
            let granted = self.platform.client_size(handle).map_err(sync_error)?;
            self.adopt_client_size(id, granted, table, host)?;
        }
        Ok(())
    }

    /// Mirror the size the OS granted after an engine resize request
    ///
    /// The record already holds the requested size, so the comparison is made
    /// against the swap chain descriptor, which still describes the last size
    /// actually presented.
    fn adopt_client_size(
        &mut self,
        id: WindowId,
        granted: Size,
        table: &mut WindowTable,
        host: &mut dyn Host,
    ) -> Result<(), BackendError> {
        let record = table.get_mut_raw(id).ok_or(BackendError::UnknownWindow(id))?;
        let presented = record.swap_chain_descriptor.size();
        if granted.is_empty() || granted == presented {
            record.apply_client_size(presented);
            return Ok(());
        }
        self.apply_resize(id, granted, true, table, host)?;
        self.events.push(Event::WindowResize { window: id, size: granted });
        Ok(())
    }
}
