//! Picks the devices the charging request is sent to.

use crate::{device, usb::Candidate, Error};
use std::env;

/// Which devices a run acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The single device at this bus number and device address, as handed
    /// over by udev.
    Address { bus: i64, address: i64 },
    /// Every attached HTC device listed in [`device::PRODUCTS`].
    Table,
}

impl Selector {
    /// Builds the selector from the `BUSNUM` and `DEVNUM` environment variables.
    ///
    /// Values that are not valid UTF-8 are still read up to their first
    /// invalid byte.
    pub fn from_env() -> Self {
        let bus = env::var_os("BUSNUM");
        let dev = env::var_os("DEVNUM");
        Self::from_vars(
            bus.as_ref().map(|v| v.to_string_lossy()).as_deref(),
            dev.as_ref().map(|v| v.to_string_lossy()).as_deref(),
        )
    }

    /// Address selection needs both values present and non-zero.
    pub fn from_vars(bus: Option<&str>, dev: Option<&str>) -> Self {
        match (bus.map(parse_number), dev.map(parse_number)) {
            (Some(bus), Some(address)) if bus != 0 && address != 0 => {
                Selector::Address { bus, address }
            }
            _ => Selector::Table,
        }
    }
}

/// Parses the leading decimal number of `s` the way `atoi` does, `0` if
/// there is none.
fn parse_number(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Returns the devices matching `selector`, in enumeration order.
///
/// A device whose descriptor cannot be read is reported and skipped.
pub fn select<'a, D, I>(devices: I, selector: &Selector) -> Vec<&'a D>
where
    D: Candidate + 'a,
    I: IntoIterator<Item = &'a D>,
{
    match *selector {
        Selector::Address { bus, address } => devices
            .into_iter()
            .find(|d| i64::from(d.bus_number()) == bus && i64::from(d.address()) == address)
            .into_iter()
            .collect(),
        Selector::Table => devices
            .into_iter()
            .filter(|d| match d.ids() {
                Ok((vid, pid)) => device::lookup(vid, pid).is_some(),
                Err(err) => {
                    warn!(
                        "Skipping",
                        "device on bus {:03} device {:03}",
                        d.bus_number(),
                        d.address()
                    );
                    warn!("Failed", "{}", Error::Descriptor(err));
                    false
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::HTC_VID;
    use crate::usb::mock::{Call, MockDevice};

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("004"), 4);
        assert_eq!(parse_number("  14"), 14);
        assert_eq!(parse_number("7abc"), 7);
        assert_eq!(parse_number("+3"), 3);
        assert_eq!(parse_number("-2"), -2);
        assert_eq!(parse_number("abc"), 0);
        assert_eq!(parse_number(""), 0);
    }

    #[test]
    fn test_selector_from_vars() {
        assert_eq!(
            Selector::from_vars(Some("004"), Some("014")),
            Selector::Address { bus: 4, address: 14 }
        );
        assert_eq!(Selector::from_vars(None, None), Selector::Table);
        assert_eq!(Selector::from_vars(Some("4"), None), Selector::Table);
        assert_eq!(Selector::from_vars(None, Some("14")), Selector::Table);
        assert_eq!(Selector::from_vars(Some("0"), Some("14")), Selector::Table);
        assert_eq!(Selector::from_vars(Some("4"), Some("x")), Selector::Table);
    }

    #[test]
    fn test_selector_from_env() {
        env::remove_var("BUSNUM");
        env::remove_var("DEVNUM");
        assert_eq!(Selector::from_env(), Selector::Table);

        env::set_var("BUSNUM", "004");
        assert_eq!(Selector::from_env(), Selector::Table);

        env::set_var("DEVNUM", "014");
        assert_eq!(
            Selector::from_env(),
            Selector::Address { bus: 4, address: 14 }
        );

        env::set_var("DEVNUM", "0");
        assert_eq!(Selector::from_env(), Selector::Table);

        #[cfg(unix)]
        {
            use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

            env::set_var("BUSNUM", OsStr::from_bytes(b"4\xff"));
            env::set_var("DEVNUM", "14");
            assert_eq!(
                Selector::from_env(),
                Selector::Address { bus: 4, address: 14 }
            );
        }

        env::remove_var("BUSNUM");
        env::remove_var("DEVNUM");
    }

    #[test]
    fn test_table_selection_keeps_order() {
        let devices = vec![
            MockDevice::new(1, 1, HTC_VID, 0x07ca),
            MockDevice::new(1, 2, 0x05ac, 0x07ca),
            MockDevice::new(1, 3, HTC_VID, 0x0001),
            MockDevice::new(2, 1, HTC_VID, 0x0df9),
            MockDevice::new(2, 2, HTC_VID, 0x07ca),
        ];
        let selected: Vec<_> = select(&devices, &Selector::Table)
            .iter()
            .map(|d| (d.bus, d.address))
            .collect();
        assert_eq!(selected, vec![(1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_table_selection_skips_unreadable_descriptor() {
        let devices = vec![
            MockDevice {
                descriptor_error: Some(rusb::Error::Io),
                ..MockDevice::new(1, 1, HTC_VID, 0x07ca)
            },
            MockDevice::new(1, 2, HTC_VID, 0x07ae),
        ];
        let selected = select(&devices, &Selector::Table);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].address, 2);
    }

    #[test]
    fn test_table_selection_does_not_open() {
        let devices = vec![MockDevice::new(1, 1, HTC_VID, 0x07ca)];
        select(&devices, &Selector::Table);
        assert_eq!(devices[0].calls(), Vec::<Call>::new());
    }

    #[test]
    fn test_address_selection_takes_first_match() {
        let devices = vec![
            MockDevice::new(4, 13, HTC_VID, 0x07ca),
            MockDevice::new(4, 14, 0x05ac, 0x1234),
            MockDevice::new(4, 14, HTC_VID, 0x07ca),
        ];
        let selector = Selector::from_vars(Some("004"), Some("014"));
        let selected = select(&devices, &selector);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].ids, (0x05ac, 0x1234));
    }

    #[test]
    fn test_address_selection_without_match() {
        let devices = vec![MockDevice::new(1, 1, HTC_VID, 0x07ca)];
        let selector = Selector::from_vars(Some("004"), Some("014"));
        assert!(select(&devices, &selector).is_empty());
    }

    #[test]
    fn test_address_selection_ignores_descriptor() {
        let devices = vec![MockDevice {
            descriptor_error: Some(rusb::Error::Io),
            ..MockDevice::new(4, 14, HTC_VID, 0x07ca)
        }];
        let selector = Selector::Address { bus: 4, address: 14 };
        assert_eq!(select(&devices, &selector).len(), 1);
    }

    #[test]
    fn test_unmatched_address_exits_with_3() {
        let devices = vec![MockDevice::new(1, 1, HTC_VID, 0x07ca)];
        let selector = Selector::from_vars(Some("004"), Some("014"));
        let err = crate::usb::charge_all(select(&devices, &selector), crate::ChargeMode::On)
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(devices[0].calls(), Vec::<Call>::new());
    }
}
