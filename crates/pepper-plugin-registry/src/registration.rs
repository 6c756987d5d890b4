//! Registration of the known plugin kinds from launch switches.
//!
//! A missing switch or binary is not an error: the plugin is simply not
//! registered and the reason is recorded in the returned summary.

use crate::features::BuildFeatures;
use crate::registry::PluginRegistry;
use crate::switches::{
    PathProbe, SwitchSource, PPAPI_FLASH_PATH, PPAPI_FLASH_VERSION, WIDEVINE_CDM_PATH,
    WIDEVINE_CDM_VERSION,
};
use pepper_plugin_core::{build_content_decryption_descriptor, build_legacy_multimedia_descriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Why a plugin kind was not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Registration of this kind is compiled out by a feature gate.
    FeatureDisabled,
    /// The path switch is absent or empty.
    EmptyPath,
    /// The path switch names a file that does not exist.
    MissingFile,
    /// The version switch is absent or empty.
    EmptyVersion,
    /// The built descriptor was refused by the registry.
    Rejected,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::FeatureDisabled => "feature disabled",
            SkipReason::EmptyPath => "no path configured",
            SkipReason::MissingFile => "binary not found",
            SkipReason::EmptyVersion => "no version configured",
            SkipReason::Rejected => "descriptor rejected",
        };
        f.write_str(s)
    }
}

/// Outcome of registering one plugin kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Registration {
    Registered,
    Skipped(SkipReason),
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered)
    }
}

/// Per-kind outcome of [`register_from_configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub legacy_multimedia: Registration,
    pub content_decryption: Registration,
}

impl RegistrationSummary {
    /// Number of descriptors appended.
    pub fn registered_count(&self) -> usize {
        [self.legacy_multimedia, self.content_decryption]
            .iter()
            .filter(|r| r.is_registered())
            .count()
    }
}

/// Register the legacy multimedia plugin and the decryption module.
///
/// Appends at most one descriptor per kind, legacy plugin first.
pub fn register_from_configuration<S, P>(
    registry: &mut PluginRegistry,
    switches: &S,
    features: &BuildFeatures,
    probe: &P,
) -> RegistrationSummary
where
    S: SwitchSource + ?Sized,
    P: PathProbe + ?Sized,
{
    info!(
        decryption_module = features.allows_decryption_module_registration(),
        "Registering Pepper plugins from launch switches"
    );

    let summary = RegistrationSummary {
        legacy_multimedia: register_legacy_multimedia(registry, switches),
        content_decryption: register_content_decryption(registry, switches, features, probe),
    };

    info!(
        "Plugin registration complete: {} registered (legacy: {:?}, cdm: {:?})",
        summary.registered_count(),
        summary.legacy_multimedia,
        summary.content_decryption
    );
    summary
}

fn register_legacy_multimedia<S>(registry: &mut PluginRegistry, switches: &S) -> Registration
where
    S: SwitchSource + ?Sized,
{
    let path = switches.switch_value(PPAPI_FLASH_PATH);
    if path.is_empty() {
        debug!("Skipping legacy multimedia plugin: {}", SkipReason::EmptyPath);
        return Registration::Skipped(SkipReason::EmptyPath);
    }

    let version = switches.switch_value(PPAPI_FLASH_VERSION);
    let descriptor = build_legacy_multimedia_descriptor(Path::new(&path), &version);
    append(registry, descriptor)
}

fn register_content_decryption<S, P>(
    registry: &mut PluginRegistry,
    switches: &S,
    features: &BuildFeatures,
    probe: &P,
) -> Registration
where
    S: SwitchSource + ?Sized,
    P: PathProbe + ?Sized,
{
    if !features.allows_decryption_module_registration() {
        debug!("Skipping decryption module: {}", SkipReason::FeatureDisabled);
        return Registration::Skipped(SkipReason::FeatureDisabled);
    }

    // Checked strictly in order; the first failure wins.
    let path = switches.switch_value(WIDEVINE_CDM_PATH);
    if path.is_empty() {
        debug!("Skipping decryption module: {}", SkipReason::EmptyPath);
        return Registration::Skipped(SkipReason::EmptyPath);
    }

    let path = Path::new(&path);
    if !probe.exists(path) {
        warn!("Skipping decryption module: {} at {:?}", SkipReason::MissingFile, path);
        return Registration::Skipped(SkipReason::MissingFile);
    }

    let version = switches.switch_value(WIDEVINE_CDM_VERSION);
    if version.is_empty() {
        warn!("Skipping decryption module: {}", SkipReason::EmptyVersion);
        return Registration::Skipped(SkipReason::EmptyVersion);
    }

    let descriptor = build_content_decryption_descriptor(path, &version, features.codec_support());
    append(registry, descriptor)
}

fn append(
    registry: &mut PluginRegistry,
    descriptor: pepper_plugin_core::PluginDescriptor,
) -> Registration {
    match registry.register(descriptor) {
        Ok(()) => Registration::Registered,
        Err(e) => {
            warn!("Failed to register plugin: {}", e);
            Registration::Skipped(SkipReason::Rejected)
        }
    }
}
