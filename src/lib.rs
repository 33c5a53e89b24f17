// Tone Bridge Core - control protocol for a native tone generator
// One command router and engine handle shared by the Android and iOS shells

// Module declarations
pub mod api;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod telemetry;

// Re-exports for convenience
pub use api::*;
pub use control::{ArgValue, Command, CommandKind, CommandResult, CommandRouter, ReplyValue};
pub use engine::{AudioEngineHandle, EngineState};

use std::sync::Once;

use log::info;

static LOGGING: Once = Once::new();

/// Install the platform log subscriber once per process.
///
/// `log` records from library code are bridged into `tracing`.
pub fn init_logging() {
    LOGGING.call_once(|| {
        cfg_if::cfg_if! {
            if #[cfg(target_os = "android")] {
                use tracing_subscriber::prelude::*;

                match tracing_android::layer("ToneBridge") {
                    Ok(layer) => {
                        let _ = tracing_subscriber::registry().with(layer).try_init();
                    }
                    Err(err) => eprintln!("Failed to create Android log layer: {}", err),
                }
            } else {
                // Another subscriber may already be installed by the host
                let _ = tracing_subscriber::fmt().try_init();
            }
        }
    });
}

/// flutter_rust_bridge entry point, run once when the Dart side loads the library
#[flutter_rust_bridge::frb(init)]
pub fn init_app() {
    init_logging();
    info!("Tone bridge {} loaded", env!("CARGO_PKG_VERSION"));
}

/// JNI_OnLoad is called when the native library is loaded by Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(
    _vm: jni::JavaVM,
    _reserved: *mut std::ffi::c_void,
) -> jni::sys::jint {
    init_logging();

    info!("JNI_OnLoad called - tone bridge library loaded");
    api::record_lifecycle(telemetry::LifecyclePhase::LibraryLoaded);

    // Return JNI version
    jni::sys::JNI_VERSION_1_6
}

/// JNI_OnUnload is called when the class loader holding the library is collected
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn JNI_OnUnload(_vm: jni::JavaVM, _reserved: *mut std::ffi::c_void) {
    info!("JNI_OnUnload called");
    api::record_lifecycle(telemetry::LifecyclePhase::LibraryUnloaded);
}
