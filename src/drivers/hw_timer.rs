//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Creates periodic timers that push events into the lock-free SPSC queue.
//! On simulation targets, the main loop's sleep cadence stands in.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event().

#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut CONTROL_TIMER: esp_timer_handle_t = core::ptr::null_mut();
#[cfg(target_os = "espidf")]
static mut STATUS_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::ControlTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn status_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::StatusTick);
}

/// Start the hardware tick timers.
///
/// - control tick at `control_interval_ms` (deadline evaluation)
/// - status tick at `status_interval_secs` (periodic status report)
#[cfg(target_os = "espidf")]
pub fn start_timers(control_interval_ms: u32, status_interval_secs: u32) {
    // SAFETY: CONTROL_TIMER and STATUS_TIMER are written here once at boot
    // from the single main-task context before any timer callbacks fire.
    // The callbacks themselves only call push_event(), which is ISR-safe.
    unsafe {
        let control_args = esp_timer_create_args_t {
            callback: Some(control_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"control\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&control_args, &raw mut CONTROL_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: control timer create failed (rc={}) — continuing without ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(CONTROL_TIMER, u64::from(control_interval_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: control timer start failed (rc={})", ret);
            return;
        }

        let status_args = esp_timer_create_args_t {
            callback: Some(status_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"status\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&status_args, &raw mut STATUS_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: status timer create failed (rc={}) — continuing without status",
                ret
            );
            return;
        }
        let ret =
            esp_timer_start_periodic(STATUS_TIMER, u64::from(status_interval_secs) * 1_000_000);
        if ret != ESP_OK {
            log::error!("hw_timer: status timer start failed (rc={})", ret);
            return;
        }

        info!(
            "hw_timer: control@{}ms + status@{}s started",
            control_interval_ms, status_interval_secs
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timers(_control_interval_ms: u32, _status_interval_secs: u32) {
    log::info!("hw_timer(sim): timers not started (events driven by sleep loop)");
}

/// Stop all hardware tick timers.
#[cfg(target_os = "espidf")]
pub fn stop_timers() {
    // SAFETY: handles are valid if start_timers() succeeded; null-check
    // prevents double-free.
    unsafe {
        if !CONTROL_TIMER.is_null() {
            esp_timer_stop(CONTROL_TIMER);
        }
        if !STATUS_TIMER.is_null() {
            esp_timer_stop(STATUS_TIMER);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_timers() {}
