//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): routes through defmt
//! - Host tests: uses `println!`
//! - Host non-test without `defmt`: no-op, arguments still borrowed so
//!   callers compile warning-free
//!
//! Format strings must be valid for both defmt and `core::fmt`, so stick
//! to plain `{}` placeholders with integer arguments.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[INFO] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[WARN] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(not(feature = "defmt"), test))]
        println!(concat!("[DEBUG] ", $s) $(, $x)*);
        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ($( & $x ),*);
    }};
}
