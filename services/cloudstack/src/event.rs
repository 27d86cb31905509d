use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use csgen_core::{Error, Result};

const BUNDLED_EVENT_TYPE_MAP: &str = include_str!("../data/command_event_map.json");

/// ApiDescriptor is implemented by the generator's API entities.
///
/// Only the command name matters for the event lookup.
pub trait ApiDescriptor {
    /// Name of the API command, for example `deployVirtualMachine`.
    fn name(&self) -> &str;
}

impl ApiDescriptor for str {
    fn name(&self) -> &str {
        self
    }
}

impl ApiDescriptor for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Read-only mapping from API command name to event type label.
#[derive(Clone, Default)]
pub struct EventTypeMap(Arc<HashMap<String, String>>);

impl EventTypeMap {
    /// Parse the map bundled with this crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_EVENT_TYPE_MAP)
    }

    /// Parse a JSON object of `command -> event type` pairs.
    pub fn from_json(content: &str) -> Result<Self> {
        let map: HashMap<String, String> = serde_json::from_str(content)
            .map_err(|e| Error::unexpected("failed to parse event type map").with_source(e))?;
        Ok(Self(Arc::new(map)))
    }

    /// Look up the event type of a command.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of mapped commands.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no command is mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for EventTypeMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTypeMap")
            .field("len", &self.0.len())
            .finish()
    }
}
