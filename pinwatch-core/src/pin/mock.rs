//! Scripted peripheral manager for tests

use pinwatch_hal::{EdgeWait, GpioError, Level, PeripheralManager, PinId, PinSettings};

/// Counts every call and fails on demand
pub struct MockManager {
    pub level: Level,
    pub open: bool,
    pub configured: Option<PinSettings>,
    pub opens: u32,
    pub closes: u32,
    pub reads: u32,
    pub waits: u32,
    pub open_error: Option<GpioError>,
    pub configure_error: Option<GpioError>,
    pub read_error: Option<GpioError>,
}

impl MockManager {
    pub fn new() -> Self {
        Self {
            level: Level::High,
            open: false,
            configured: None,
            opens: 0,
            closes: 0,
            reads: 0,
            waits: 0,
            open_error: None,
            configure_error: None,
            read_error: None,
        }
    }
}

impl PeripheralManager for MockManager {
    fn open_gpio(&mut self, _name: &str) -> Result<PinId, GpioError> {
        self.opens += 1;
        if let Some(e) = self.open_error {
            return Err(e);
        }
        if self.open {
            return Err(GpioError::Busy);
        }
        self.open = true;
        Ok(PinId(21))
    }

    fn configure(&mut self, _pin: PinId, settings: &PinSettings) -> Result<(), GpioError> {
        if let Some(e) = self.configure_error {
            return Err(e);
        }
        self.configured = Some(*settings);
        Ok(())
    }

    fn read_level(&mut self, _pin: PinId) -> Result<Level, GpioError> {
        self.reads += 1;
        match self.read_error {
            Some(e) => Err(e),
            None => Ok(self.level),
        }
    }

    fn close(&mut self, _pin: PinId) -> Result<(), GpioError> {
        self.closes += 1;
        if !self.open {
            return Err(GpioError::Closed);
        }
        self.open = false;
        self.configured = None;
        Ok(())
    }
}

impl EdgeWait for MockManager {
    async fn wait_for_edge(&mut self, _pin: PinId) -> Result<(), GpioError> {
        self.waits += 1;
        Ok(())
    }
}
