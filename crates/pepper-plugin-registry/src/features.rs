//! Build configuration that decides which plugin kinds may be registered.

use pepper_plugin_core::CodecSupport;
use serde::{Deserialize, Serialize};

/// Feature gates resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildFeatures {
    /// The decryption module can be used on this platform.
    pub decryption_module_supported: bool,

    /// Pepper plugins may run in a plugin host process.
    ///
    /// Also decides whether the availability query is handled at all.
    pub plugin_host_process_enabled: bool,

    /// The decryption module is delivered by a self-updating component
    /// instead of launch switches.
    pub self_updating_component: bool,

    /// AAC and H.264 are available to the decryption module.
    pub proprietary_codecs: bool,
}

impl Default for BuildFeatures {
    fn default() -> Self {
        Self {
            decryption_module_supported: true,
            plugin_host_process_enabled: true,
            self_updating_component: false,
            proprietary_codecs: false,
        }
    }
}

impl BuildFeatures {
    /// Whether the decryption module may be registered from launch switches.
    pub fn allows_decryption_module_registration(&self) -> bool {
        self.decryption_module_supported
            && self.plugin_host_process_enabled
            && !self.self_updating_component
    }

    pub fn codec_support(&self) -> CodecSupport {
        CodecSupport {
            proprietary_codecs: self.proprietary_codecs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_registration() {
        assert!(BuildFeatures::default().allows_decryption_module_registration());
    }

    #[test]
    fn test_each_gate_disables_registration() {
        let gates: [fn(&mut BuildFeatures); 3] = [
            |f| f.decryption_module_supported = false,
            |f| f.plugin_host_process_enabled = false,
            |f| f.self_updating_component = true,
        ];

        for gate in gates {
            let mut features = BuildFeatures::default();
            gate(&mut features);
            assert!(!features.allows_decryption_module_registration());
        }
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let features: BuildFeatures =
            serde_json::from_str(r#"{"proprietary_codecs": true}"#).unwrap();
        assert!(features.proprietary_codecs);
        assert!(features.decryption_module_supported);
        assert!(!features.self_updating_component);
    }
}
