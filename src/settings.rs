//! Internal settings for geoencoder.
//!
//! This module initializes the logging configuration at startup. The
//! logging behavior is controlled by the `GEOENCODER_DEBUG` environment
//! variable. If it is not set or is set to a falsy value ("0", "false", or
//! empty), logging stays disabled. Otherwise, logging is enabled with a
//! maximum level of DEBUG.

use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    // If GEOENCODER_DEBUG is not set or set to a falsy value, disable logging.
    // Otherwise, initialize a debug-level subscriber.
    if std::env::var("GEOENCODER_DEBUG").map_or(true, |v| v == "0" || v == "false" || v.is_empty())
    {
        // Logging stays disabled; tracing macros become no-ops without a subscriber.
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
