//! C-compatible FFI API for cross-language bindings.
//!
//! # ABI Contract
//!
//! All exported functions use `extern "C"` calling convention and `#[no_mangle]`
//! to ensure stable symbol names.
//!
//! ## Memory management
//! - Strings returned through `out_*` pointers are allocated on the Rust heap.
//! - Callers **must** free them with `mailforge_free_string`.
//! - Passing a null pointer to the free function is a no-op.
//!
//! ## Error handling
//! - Functions that can fail return a `c_int` (0 = success, non-zero = error):
//!   1 null pointer, 2 invalid UTF-8, 3 invalid config, 4 output not
//!   representable as a C string.
//! - Error details can be retrieved via `mailforge_last_error`.
//!
//! ## Thread safety
//! - The transpiler holds no shared state; `mailforge_last_error` uses a
//!   thread-local, so every entry point is safe to call from multiple threads.
//!
//! ## Usage from Go (cgo)
//! ```go
//! // #cgo LDFLAGS: -lmail_forge
//! // #include "mailforge.h"
//! import "C"
//! ```

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::config::{Dialect, EmailTemplateConfig, DEFAULT_MAX_WIDTH, MIN_MAX_WIDTH};
use crate::pipeline::generate_email;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

// ---------------------------------------------------------------------------
// C-compatible configuration type
// ---------------------------------------------------------------------------

/// Template configuration passed to [`mailforge_generate_email`].
///
/// `NULL` / `0` fields fall back to their defaults:
/// - `header_image`, `footer_image` → no image
/// - `max_width` → 600 (values below 100 are raised to 100)
/// - `font_family` → "Arial, sans-serif"
#[repr(C)]
pub struct MailforgeConfig {
    /// Null-terminated UTF-8 data URI or URL, or `NULL`.
    pub header_image: *const c_char,
    /// Null-terminated UTF-8 data URI or URL, or `NULL`.
    pub footer_image: *const c_char,
    /// `true` selects the Outlook (legacy) dialect.
    pub legacy: bool,
    /// Maximum content width in pixels. Pass `0` for the default.
    pub max_width: u32,
    /// Null-terminated CSS font-family value, or `NULL`.
    pub font_family: *const c_char,
}

/// # Safety
/// `p`, if non-null, must point to a valid null-terminated string.
unsafe fn optional_str(p: *const c_char, field: &str) -> Result<Option<String>, String> {
    if p.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(p)
        .to_str()
        .map(|s| Some(s.to_string()))
        .map_err(|e| format!("Invalid UTF-8 in {field}: {e}"))
}

/// Convert a `MailforgeConfig` (FFI) to an `EmailTemplateConfig` (Rust).
///
/// # Safety
/// Every non-null string field must point to a valid null-terminated string.
unsafe fn template_config_from_c(cfg: &MailforgeConfig) -> Result<EmailTemplateConfig, String> {
    let defaults = EmailTemplateConfig::default();

    let max_width = match cfg.max_width {
        0 => DEFAULT_MAX_WIDTH,
        w => w.max(MIN_MAX_WIDTH),
    };

    Ok(EmailTemplateConfig {
        max_width,
        font_family: optional_str(cfg.font_family, "font_family")?
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.font_family),
        dialect: Dialect::from_legacy_flag(cfg.legacy),
        header_image: optional_str(cfg.header_image, "header_image")?,
        footer_image: optional_str(cfg.footer_image, "footer_image")?,
    })
}

/// # Safety
/// `body_ptr` must point to `body_len` valid bytes.
unsafe fn body_from_raw<'a>(body_ptr: *const u8, body_len: u32) -> Result<&'a str, String> {
    let bytes = slice::from_raw_parts(body_ptr, body_len as usize);
    std::str::from_utf8(bytes).map_err(|e| format!("Invalid UTF-8: {e}"))
}

/// # Safety
/// `out` must be a valid pointer.
unsafe fn write_out(html: String, out: *mut *mut c_char) -> c_int {
    match CString::new(html) {
        Ok(cs) => {
            *out = cs.into_raw();
            0
        }
        Err(_) => {
            *out = ptr::null_mut();
            set_last_error("Generated HTML contained a null byte");
            4
        }
    }
}

// ---------------------------------------------------------------------------
// Core API
// ---------------------------------------------------------------------------

/// Generate an email document from an HTML body fragment.
///
/// # Parameters
/// - `body_ptr`, `body_len`: UTF-8 body HTML (not necessarily null-terminated)
/// - `cfg`: optional pointer to a [`MailforgeConfig`]; pass `NULL` for defaults
/// - `out_html`: on success, receives a null-terminated HTML string
///
/// # Returns
/// `0` on success, non-zero on error. On error, call `mailforge_last_error`.
///
/// # Safety
/// - `body_ptr` must point to `body_len` valid bytes.
/// - `cfg`, if non-null, must point to a fully-initialised [`MailforgeConfig`].
/// - `out_html` must be a valid pointer; free the result with
///   `mailforge_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mailforge_generate_email(
    body_ptr: *const u8,
    body_len: u32,
    cfg: *const MailforgeConfig,
    out_html: *mut *mut c_char,
) -> c_int {
    if body_ptr.is_null() || out_html.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    let body = match body_from_raw(body_ptr, body_len) {
        Ok(s) => s,
        Err(e) => {
            set_last_error(&e);
            return 2;
        }
    };

    let config = if cfg.is_null() {
        EmailTemplateConfig::default()
    } else {
        match template_config_from_c(&*cfg) {
            Ok(c) => c,
            Err(e) => {
                set_last_error(&e);
                return 3;
            }
        }
    };

    write_out(generate_email(body, &config), out_html)
}

/// Generate an email document using a JSON template configuration
/// (the serialized form of `EmailTemplateConfig`).
///
/// # Safety
/// Same as `mailforge_generate_email`; `config_json`, if non-null, must be a
/// valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mailforge_generate_email_json(
    body_ptr: *const u8,
    body_len: u32,
    config_json: *const c_char,
    out_html: *mut *mut c_char,
) -> c_int {
    if body_ptr.is_null() || out_html.is_null() {
        set_last_error("Null pointer argument");
        return 1;
    }

    let body = match body_from_raw(body_ptr, body_len) {
        Ok(s) => s,
        Err(e) => {
            set_last_error(&e);
            return 2;
        }
    };

    let config = match optional_str(config_json, "config_json") {
        Ok(None) => EmailTemplateConfig::default(),
        Ok(Some(json)) => match EmailTemplateConfig::from_json(&json) {
            Ok(c) => c,
            Err(e) => {
                set_last_error(&e.to_string());
                return 3;
            }
        },
        Err(e) => {
            set_last_error(&e);
            return 2;
        }
    };

    write_out(generate_email(body, &config), out_html)
}

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free a string returned through an `out_html` pointer.
///
/// # Safety
/// `s` must have been returned by this library (Rust's `CString::into_raw`).
#[no_mangle]
pub unsafe extern "C" fn mailforge_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}

/// Retrieve the last error message. Returns a null-terminated string.
///
/// The returned pointer is valid until the next failing `mailforge_*` call
/// on the same thread. The caller should **not** free this pointer.
///
/// Returns null if no error has occurred.
#[no_mangle]
pub extern "C" fn mailforge_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        let borrow = e.borrow();
        match borrow.as_ref() {
            Some(cs) => cs.as_ptr(),
            None => ptr::null(),
        }
    })
}

/// Return the library version as a null-terminated string.
/// The caller must **not** free this pointer.
#[no_mangle]
pub extern "C" fn mailforge_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take_string(p: *mut c_char) -> String {
        let s = CStr::from_ptr(p).to_str().unwrap().to_string();
        mailforge_free_string(p);
        s
    }

    #[test]
    fn ffi_generate_with_null_config_uses_defaults() {
        let body = b"<p>Hello ffi</p>";
        let mut out: *mut c_char = ptr::null_mut();

        let rc = unsafe {
            mailforge_generate_email(body.as_ptr(), body.len() as u32, ptr::null(), &mut out)
        };

        assert_eq!(rc, 0);
        assert!(!out.is_null());
        let html = unsafe { take_string(out) };
        assert!(html.contains(r#"<div class="email-content">"#));
        assert!(html.contains("font-family: Arial, sans-serif"));
    }

    #[test]
    fn ffi_generate_legacy_with_header() {
        let body = b"<p>Hi</p>";
        let header = CString::new("data:image/png;base64,AAAA").unwrap();
        let font = CString::new("Georgia, serif").unwrap();
        let cfg = MailforgeConfig {
            header_image: header.as_ptr(),
            footer_image: ptr::null(),
            legacy: true,
            max_width: 0,
            font_family: font.as_ptr(),
        };
        let mut out: *mut c_char = ptr::null_mut();

        let rc = unsafe {
            mailforge_generate_email(body.as_ptr(), body.len() as u32, &cfg, &mut out)
        };

        assert_eq!(rc, 0, "Expected success");
        let html = unsafe { take_string(out) };
        assert!(html.contains("<!--[if gte mso 9]>"));
        assert!(html.contains(r#"width="600" alt="Header""#));
        assert!(html.contains("font-family: Georgia, serif !important;"));
    }

    #[test]
    fn ffi_null_input() {
        let mut out: *mut c_char = ptr::null_mut();
        let rc = unsafe { mailforge_generate_email(ptr::null(), 0, ptr::null(), &mut out) };
        assert_eq!(rc, 1, "Should fail on null input");
        let err = unsafe { CStr::from_ptr(mailforge_last_error()) };
        assert_eq!(err.to_str().unwrap(), "Null pointer argument");
    }

    #[test]
    fn ffi_invalid_utf8() {
        let body = b"<p>\xff</p>";
        let mut out: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            mailforge_generate_email(body.as_ptr(), body.len() as u32, ptr::null(), &mut out)
        };
        assert_eq!(rc, 2);
    }

    #[test]
    fn ffi_json_config() {
        let body = b"<p>json</p>";
        let json = CString::new(r#"{"dialect":"legacy","max_width":700}"#).unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            mailforge_generate_email_json(body.as_ptr(), body.len() as u32, json.as_ptr(), &mut out)
        };
        assert_eq!(rc, 0);
        let html = unsafe { take_string(out) };
        assert!(html.contains(r#"width="700" align="center""#));
    }

    #[test]
    fn ffi_bad_json_config() {
        let body = b"<p>json</p>";
        let json = CString::new("{not json").unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        let rc = unsafe {
            mailforge_generate_email_json(body.as_ptr(), body.len() as u32, json.as_ptr(), &mut out)
        };
        assert_eq!(rc, 3);
    }

    #[test]
    fn ffi_version() {
        let v = mailforge_version();
        let version = unsafe { CStr::from_ptr(v) }.to_str().unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
