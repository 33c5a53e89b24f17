//! C ABI for platform shells that do not go through flutter_rust_bridge.
//!
//! A Swift `FlutterMethodChannel` handler or a Kotlin/JNI shim forwards the
//! method name and a JSON arguments object, and relays the JSON reply as-is:
//!
//! - `{"status":"success","value":null|true|false|<number>}`
//! - `{"status":"not_implemented","method":"<name>"}`
//! - `{"status":"bridge_error","code":<i32>,"message":"..."}` when the call
//!   itself could not be decoded
//!
//! Replies are heap strings owned by the caller and must be returned through
//! [`tone_bridge_free_string`].

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::api;
use crate::control::Command;
use crate::error::{BridgeError, ErrorCode};

/// Borrow a NUL-terminated string from the caller.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
unsafe fn read_str<'a>(ptr: *const c_char, argument: &'static str) -> Result<&'a str, BridgeError> {
    if ptr.is_null() {
        return Err(BridgeError::NullPointer { argument });
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| BridgeError::InvalidUtf8 { argument })
}

/// Convert Rust string to C string (caller must free)
fn string_to_cstr(s: String) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

fn error_reply(err: &BridgeError) -> String {
    serde_json::json!({
        "status": "bridge_error",
        "code": err.code(),
        "message": err.message(),
    })
    .to_string()
}

/// # Safety
/// Same contract as [`tone_bridge_dispatch`].
unsafe fn dispatch_raw(
    method: *const c_char,
    arguments_json: *const c_char,
) -> Result<String, BridgeError> {
    let method = read_str(method, "method")?;
    let command = if arguments_json.is_null() {
        Command::new(method)
    } else {
        match read_str(arguments_json, "arguments_json") {
            Ok(json) => Command::from_json(method, json),
            Err(err) => {
                log::warn!("[FFI] Ignoring arguments for {}: {}", method, err);
                Command::new(method)
            }
        }
    };

    let result = api::dispatch_command(&command);
    Ok(serde_json::to_string(&result)?)
}

/// Dispatch one control command and return the JSON-encoded reply.
///
/// `arguments_json` may be null, which means no arguments.
///
/// # Safety
/// `method` and `arguments_json` must each be null or point to a
/// NUL-terminated string that stays valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn tone_bridge_dispatch(
    method: *const c_char,
    arguments_json: *const c_char,
) -> *mut c_char {
    let reply = dispatch_raw(method, arguments_json).unwrap_or_else(|err| {
        log::error!("[FFI] {}", err);
        error_reply(&err)
    });
    string_to_cstr(reply)
}

/// Free a reply returned by [`tone_bridge_dispatch`].
///
/// # Safety
/// `reply` must be null or a pointer obtained from `tone_bridge_dispatch`
/// that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn tone_bridge_free_string(reply: *mut c_char) {
    if !reply.is_null() {
        drop(CString::from_raw(reply));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(method: Option<&str>, arguments: Option<&str>) -> Value {
        let method = method.map(|m| CString::new(m).unwrap());
        let arguments = arguments.map(|a| CString::new(a).unwrap());
        unsafe {
            let reply = tone_bridge_dispatch(
                method.as_ref().map_or(ptr::null(), |m| m.as_ptr()),
                arguments.as_ref().map_or(ptr::null(), |a| a.as_ptr()),
            );
            assert!(!reply.is_null());
            let text = CStr::from_ptr(reply).to_str().unwrap().to_owned();
            tone_bridge_free_string(reply);
            serde_json::from_str(&text).unwrap()
        }
    }

    #[test]
    fn dispatch_round_trip() {
        let _guard = api::TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        call(Some("releaseAudio"), None);

        assert_eq!(
            call(Some("initializeAudio"), None),
            json!({"status": "success", "value": true})
        );
        assert_eq!(
            call(Some("setVolume"), Some(r#"{"volume": 0.25}"#)),
            json!({"status": "success", "value": null})
        );
        assert_eq!(
            call(Some("getCurrentVolume"), Some("{}")),
            json!({"status": "success", "value": 0.25})
        );
        call(Some("releaseAudio"), None);
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let _guard = api::TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        assert_eq!(
            call(Some("frobnicate"), None),
            json!({"status": "not_implemented", "method": "frobnicate"})
        );
    }

    #[test]
    fn null_method_is_a_bridge_error() {
        let reply = call(None, None);
        assert_eq!(reply["status"], "bridge_error");
        assert_eq!(reply["code"], 3001);
    }

    #[test]
    fn invalid_utf8_method_is_a_bridge_error() {
        let bytes = CString::new(vec![0xff, 0xfe]).unwrap();
        let text = unsafe {
            let reply = tone_bridge_dispatch(bytes.as_ptr(), ptr::null());
            let text = CStr::from_ptr(reply).to_str().unwrap().to_owned();
            tone_bridge_free_string(reply);
            text
        };
        let reply: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reply["code"], 3002);
    }

    #[test]
    fn free_accepts_null() {
        unsafe { tone_bridge_free_string(ptr::null_mut()) };
    }
}
