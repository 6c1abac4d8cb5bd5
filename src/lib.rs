//! `htc_charge` switches HTC handsets between charging and not charging
//! from the USB bus.
//!
//! The handset's charging controller listens for one vendor control request
//! on interface 0:
//! 1. `bmRequestType` vendor, host-to-device, `bRequest` `0x40`.
//! 2. `wValue` is the extra current (500 mA) allowed while suspended.
//! 3. `wIndex` is the extra charging current, 2000 mA to charge or 0 to stop.
//!
//! Devices are picked either by bus number and device address, or by
//! looking up their vendor and product IDs in [`device::PRODUCTS`].

#![deny(rust_2018_idioms)]

pub use owo_colors;
pub use rusb;

#[macro_use]
pub mod macros;

pub mod device;
mod error;
pub mod select;
pub mod usb;

pub use error::{code, Error};
pub use select::{select, Selector};
pub use usb::{charge_all, set_charging_mode, ChargeMode};
