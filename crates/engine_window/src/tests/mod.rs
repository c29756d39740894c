//! Backend tests driven through the scripted platform


use crate::backend::{BackendError, WindowBackend};
use crate::config::BackendConfig;
use crate::events::Event;
use crate::platform::NativeHandle;
use crate::testing::{MockHost, MockPlatform};
use crate::window::{WindowId, WindowRecord, WindowTable};

struct Fixture {
    platform: MockPlatform,
    backend: WindowBackend,
    table: WindowTable,
    host: MockHost,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(BackendConfig::default())
    }

    fn with_config(config: BackendConfig) -> Self {
        let platform = MockPlatform::new();
        Self {
            backend: WindowBackend::new(Box::new(platform.clone()), config),
            platform,
            table: WindowTable::new(),
            host: MockHost::default(),
        }
    }

    /// A fixture with one 800x600 window already created
    fn created() -> (Self, WindowId, NativeHandle) {
        let mut fixture = Self::new();
        let id = fixture.table.insert(WindowRecord::new("Main", 800, 600));
        fixture.tick().expect("window creation");
        let handle = fixture.handle(id);
        fixture.table.end_tick();
        (fixture, id, handle)
    }

    fn tick(&mut self) -> Result<(), BackendError> {
        self.backend.tick(&mut self.table, &mut self.host)
    }

    fn record(&self, id: WindowId) -> &WindowRecord {
        self.table.get(id).expect("live window")
    }

    fn handle(&self, id: WindowId) -> NativeHandle {
        self.record(id).native_handle().expect("native window")
    }

    fn events(&mut self) -> Vec<Event> {
        self.backend.drain_events().collect()
    }
}
