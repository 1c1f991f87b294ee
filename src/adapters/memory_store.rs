//! In-memory device store.
//!
//! Keeps each device as the same JSON record the flash key-value store
//! holds, keyed by name, so serialization problems show up on the host
//! too.  Optionally bounded to mimic a fixed-size partition.

use std::collections::BTreeMap;

use crate::app::ports::DeviceStore;
use crate::device::Device;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryDeviceStore {
    records: BTreeMap<String, Vec<u8>>,
    capacity: Option<usize>,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses new records beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { records: BTreeMap::new(), capacity: Some(capacity) }
    }

    /// Overwrite a raw record, bypassing serialization.
    pub fn put_raw(&mut self, name: &str, bytes: Vec<u8>) {
        self.records.insert(name.into(), bytes);
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.len())
    }

    fn get(&self, name: &str) -> Result<Option<Device>, StoreError> {
        self.records.get(name).map(|bytes| Device::from_json(bytes)).transpose()
    }

    fn list(&self) -> Result<Vec<Device>, StoreError> {
        self.records.values().map(|bytes| Device::from_json(bytes)).collect()
    }

    fn set(&mut self, device: &Device) -> Result<(), StoreError> {
        let is_new = !self.records.contains_key(&device.name);
        if is_new && self.capacity.is_some_and(|cap| self.records.len() >= cap) {
            return Err(StoreError::Full);
        }
        let bytes = device.to_json()?;
        self.records.insert(device.name.clone(), bytes);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.records.remove(name);
        Ok(())
    }

    fn drop_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        Ok(())
    }
}
