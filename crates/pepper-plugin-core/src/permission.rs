//! Permissions granted to a Pepper plugin.
//!
//! The host hands each plugin an opaque bitmask that crosses the process
//! boundary as a plain integer.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Interfaces a plugin may use, combinable with bitwise operations.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Permissions: u32 {
        /// Access to in-development interfaces
        const DEV = 1 << 0;
        /// Access to private interfaces
        const PRIVATE = 1 << 1;
        /// May act without a user gesture
        const BYPASS_USER_GESTURE = 1 << 2;
        /// Access to testing-only interfaces
        const TESTING = 1 << 3;
        /// Access to Flash-specific interfaces
        const FLASH = 1 << 4;
        /// Access to dev-channel interfaces
        const DEV_CHANNEL = 1 << 5;
    }
}
