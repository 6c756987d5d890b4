//! Host-wide information reported to peer processes.

use pepper_plugin_registry::switches::REGISTER_STANDARD_SCHEMES;
use pepper_plugin_registry::{BuildFeatures, SwitchSource};
use serde::{Deserialize, Serialize};

/// Browser version the host identifies as.
pub const CHROME_VERSION: &str = "45.0.2454.85";

/// Scheme every host treats as standard.
const EXTENSION_SCHEME: &str = "chrome-extension";

/// Product token, e.g. `"Chrome/45.0.2454.85"`.
pub fn product() -> String {
    format!("Chrome/{}", CHROME_VERSION)
}

/// Standard URL schemes to register in addition to the built-in ones.
///
/// Reads the comma-separated `register-standard-schemes` switch and always
/// appends `chrome-extension`.
pub fn additional_standard_schemes<S>(switches: &S) -> Vec<String>
where
    S: SwitchSource + ?Sized,
{
    let custom = switches.switch_value(REGISTER_STANDARD_SCHEMES);

    let mut schemes: Vec<String> = custom
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    schemes.push(EXTENSION_SCHEME.to_string());
    schemes
}

/// Reply to `host.info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub product: String,
    pub standard_schemes: Vec<String>,
    pub decryption_module_available: bool,
}

impl HostInfo {
    /// `decryption_module_available` reflects every build gate that can rule
    /// out registering the decryption module.
    pub fn collect<S>(switches: &S, features: &BuildFeatures) -> Self
    where
        S: SwitchSource + ?Sized,
    {
        Self {
            product: product(),
            standard_schemes: additional_standard_schemes(switches),
            decryption_module_available: features.allows_decryption_module_registration(),
        }
    }
}
