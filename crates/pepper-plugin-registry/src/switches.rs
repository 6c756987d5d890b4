//! Launch switches and filesystem checks consumed during registration.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Path to the legacy multimedia plugin binary.
pub const PPAPI_FLASH_PATH: &str = "ppapi-flash-path";
/// Version of the legacy multimedia plugin.
pub const PPAPI_FLASH_VERSION: &str = "ppapi-flash-version";
/// Path to the decryption module adapter.
pub const WIDEVINE_CDM_PATH: &str = "widevine-cdm-path";
/// Version of the decryption module.
pub const WIDEVINE_CDM_VERSION: &str = "widevine-cdm-version";
/// Comma-separated list of extra standard URL schemes.
pub const REGISTER_STANDARD_SCHEMES: &str = "register-standard-schemes";

/// Read-only view of the process launch switches.
pub trait SwitchSource {
    /// Value of the switch `name`, or an empty string when it is absent.
    fn switch_value(&self, name: &str) -> String;
}

impl SwitchSource for HashMap<String, String> {
    fn switch_value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl SwitchSource for BTreeMap<String, String> {
    fn switch_value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// Filesystem existence check.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl PathProbe for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
