//! Subscriber setup for binaries that use the optimizer crates

use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// How log output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, operation events down to debug
    Development,
    /// One JSON object per event, info and above
    Production,
    /// Installs nothing; tests attach the capture layer themselves
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset or unparsable
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "optimizer=debug",
            Profile::Production => "optimizer=info",
            Profile::Test => "off",
        }
    }
}

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the process-wide subscriber for `profile`, writing to stderr.
///
/// Stdout is left to the program's own output. Returns `true` only for the
/// call that actually installed a subscriber.
///
/// ```
/// use optimizer_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// assert!(!init(Profile::Production));
/// ```
pub fn init(profile: Profile) -> bool {
    if profile == Profile::Test || INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let installed = match profile {
        Profile::Production => builder.json().finish().try_init().is_ok(),
        _ => builder.finish().try_init().is_ok(),
    };
    if !installed {
        INSTALLED.store(false, Ordering::SeqCst);
    }
    installed
}
