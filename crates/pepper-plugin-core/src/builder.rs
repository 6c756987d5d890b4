//! Builders for the plugin kinds registered at startup.

use crate::descriptor::PluginDescriptor;
use crate::mime::MimeTypeEntry;
use crate::permission::Permissions;
use crate::version::LegacyVersion;
use std::path::Path;
use tracing::debug;

pub const FLASH_PLUGIN_NAME: &str = "Shockwave Flash";
pub const FLASH_SWF_MIME_TYPE: &str = "application/x-shockwave-flash";
pub const FLASH_SWF_EXTENSION: &str = "swf";
pub const FLASH_SWF_DESCRIPTION: &str = "Shockwave Flash";
pub const FLASH_SPL_MIME_TYPE: &str = "application/futuresplash";
pub const FLASH_SPL_EXTENSION: &str = "spl";
pub const FLASH_SPL_DESCRIPTION: &str = "FutureSplash Player";

pub const WIDEVINE_CDM_DISPLAY_NAME: &str = "Widevine Content Decryption Module";
pub const WIDEVINE_CDM_DESCRIPTION: &str =
    "Enables Widevine licenses for playback of HTML audio/video content.";
pub const WIDEVINE_CDM_MIME_TYPE: &str = "application/x-ppapi-widevine-cdm";
pub const WIDEVINE_CDM_EXTENSION: &str = "";
pub const WIDEVINE_CDM_MIME_TYPE_DESCRIPTION: &str = "Widevine Content Decryption Module";

/// Parameter carrying the codec list on the CDM's MIME type entry.
pub const CDM_SUPPORTED_CODECS_PARAM_NAME: &str = "codecs";
pub const CDM_SUPPORTED_CODECS_DELIMITER: char = ',';

pub const CDM_CODEC_VORBIS: &str = "vorbis";
pub const CDM_CODEC_VP8: &str = "vp8";
pub const CDM_CODEC_VP9: &str = "vp9.0";
pub const CDM_CODEC_AAC: &str = "aac";
pub const CDM_CODEC_AVC1: &str = "avc1";

/// Codec availability fixed by the build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecSupport {
    /// Whether AAC and H.264 decoding are available.
    pub proprietary_codecs: bool,
}

impl CodecSupport {
    /// Codecs the decryption module advertises, baseline codecs first.
    pub fn supported_codecs(&self) -> Vec<&'static str> {
        let mut codecs = vec![CDM_CODEC_VORBIS, CDM_CODEC_VP8, CDM_CODEC_VP9];
        if self.proprietary_codecs {
            codecs.push(CDM_CODEC_AAC);
            codecs.push(CDM_CODEC_AVC1);
        }
        codecs
    }

    /// Codec list as advertised in the MIME type parameter.
    pub fn codec_string(&self) -> String {
        self.supported_codecs()
            .join(CDM_SUPPORTED_CODECS_DELIMITER.to_string().as_str())
    }
}

/// Describe the legacy multimedia plugin at `path`.
///
/// Never fails: a malformed `version` is repaired, see [`LegacyVersion`].
pub fn build_legacy_multimedia_descriptor(path: &Path, version: &str) -> PluginDescriptor {
    let version = LegacyVersion::normalize(version);

    PluginDescriptor {
        name: FLASH_PLUGIN_NAME.to_string(),
        path: path.to_path_buf(),
        // e.g. "Shockwave Flash 10.2 r154"
        description: format!("{} {}", FLASH_PLUGIN_NAME, version.description_suffix()),
        version: version.to_string(),
        is_out_of_process: true,
        permissions: Permissions::all(),
        mime_types: vec![
            MimeTypeEntry::new(
                FLASH_SWF_MIME_TYPE,
                FLASH_SWF_EXTENSION,
                FLASH_SWF_DESCRIPTION,
            ),
            MimeTypeEntry::new(
                FLASH_SPL_MIME_TYPE,
                FLASH_SPL_EXTENSION,
                FLASH_SPL_DESCRIPTION,
            ),
        ],
    }
}

/// Describe the content decryption module at `path`.
///
/// The caller has already checked that `path` and `version` are non-empty.
/// `version` is used verbatim.
pub fn build_content_decryption_descriptor(
    path: &Path,
    version: &str,
    codecs: CodecSupport,
) -> PluginDescriptor {
    let codec_string = codecs.codec_string();
    debug!(
        param = CDM_SUPPORTED_CODECS_PARAM_NAME,
        value = %codec_string,
        "Advertising CDM codecs"
    );

    let mime_type = MimeTypeEntry::new(
        WIDEVINE_CDM_MIME_TYPE,
        WIDEVINE_CDM_EXTENSION,
        WIDEVINE_CDM_MIME_TYPE_DESCRIPTION,
    )
    .with_param(CDM_SUPPORTED_CODECS_PARAM_NAME, codec_string);

    PluginDescriptor {
        name: WIDEVINE_CDM_DISPLAY_NAME.to_string(),
        path: path.to_path_buf(),
        version: version.to_string(),
        description: format!("{} (version: {})", WIDEVINE_CDM_DESCRIPTION, version),
        is_out_of_process: true,
        permissions: Permissions::DEV | Permissions::PRIVATE,
        mime_types: vec![mime_type],
    }
}
