//! USB primitives for switching an HTC handset's charging mode.

use crate::{device, Error};
use rusb::{Device, DeviceHandle, Direction, Recipient, RequestType, UsbContext};
use std::time::Duration;

/// The interface that is claimed while the request is sent.
const INTERFACE: u8 = 0;
/// Vendor request understood by the handset's charging controller.
const CHARGE_REQUEST: u8 = 0x40;
/// Extra current in mA the handset may draw while the bus is suspended.
const SUSPEND_CURRENT: u16 = 500;
/// Extra current in mA requested on top of `SUSPEND_CURRENT` when charging.
const CHARGE_CURRENT: u16 = 2000;
const TIMEOUT: Duration = Duration::from_millis(2000);

/// Whether the handset should charge from the bus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChargeMode {
    #[default]
    On,
    Off,
}

impl ChargeMode {
    /// The `wIndex` value of the charging request.
    pub fn w_index(self) -> u16 {
        match self {
            ChargeMode::On => CHARGE_CURRENT,
            ChargeMode::Off => 0,
        }
    }
}

/// `bmRequestType` of the charging request: vendor, host-to-device, device.
pub fn request_type() -> u8 {
    rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device)
}

/// An open device the charging request can be sent over.
///
/// Dropping the port closes it.
pub trait ControlPort {
    fn claim_interface(&mut self, iface: u8) -> rusb::Result<()>;

    fn release_interface(&mut self, iface: u8) -> rusb::Result<()>;

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;
}

impl<T: UsbContext> ControlPort for DeviceHandle<T> {
    fn claim_interface(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::claim_interface(self, iface)
    }

    fn release_interface(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::release_interface(self, iface)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        DeviceHandle::write_control(self, request_type, request, value, index, buf, timeout)
    }
}

/// An enumerated device that may be selected and opened.
pub trait Candidate {
    type Port: ControlPort;

    fn bus_number(&self) -> u8;

    fn address(&self) -> u8;

    /// Reads `(idVendor, idProduct)` from the device descriptor.
    fn ids(&self) -> rusb::Result<(u16, u16)>;

    fn open(&self) -> rusb::Result<Self::Port>;

    /// Human readable label used in status messages.
    fn describe(&self) -> String {
        let name = self
            .ids()
            .ok()
            .and_then(|(vid, pid)| device::lookup(vid, pid))
            .map(|p| p.name)
            .unwrap_or("device");
        format!(
            "{} on bus {:03} device {:03}",
            name,
            self.bus_number(),
            self.address()
        )
    }
}

impl<T: UsbContext> Candidate for Device<T> {
    type Port = DeviceHandle<T>;

    fn bus_number(&self) -> u8 {
        Device::bus_number(self)
    }

    fn address(&self) -> u8 {
        Device::address(self)
    }

    fn ids(&self) -> rusb::Result<(u16, u16)> {
        let descriptor = self.device_descriptor()?;
        Ok((descriptor.vendor_id(), descriptor.product_id()))
    }

    fn open(&self) -> rusb::Result<DeviceHandle<T>> {
        Device::open(self)
    }
}

/// A claimed interface, released again when dropped.
struct Claimed<'a, P: ControlPort> {
    port: &'a mut P,
    iface: u8,
}

impl<'a, P: ControlPort> Claimed<'a, P> {
    fn new(port: &'a mut P, iface: u8) -> rusb::Result<Self> {
        port.claim_interface(iface)?;
        Ok(Claimed { port, iface })
    }
}

impl<P: ControlPort> Drop for Claimed<'_, P> {
    fn drop(&mut self) {
        let _ = self.port.release_interface(self.iface);
    }
}

/// Opens the device and sends it the charging request.
///
/// Once the device is open, the interface is released and the handle
/// closed on every path, whether the claim or the transfer failed or not.
pub fn set_charging_mode<D: Candidate>(device: &D, mode: ChargeMode) -> Result<(), Error> {
    let mut port = device.open().map_err(Error::Open)?;
    let claimed = Claimed::new(&mut port, INTERFACE).map_err(Error::Claim)?;

    claimed
        .port
        .write_control(
            request_type(),
            CHARGE_REQUEST,
            SUSPEND_CURRENT,
            mode.w_index(),
            &[],
            TIMEOUT,
        )
        .map_err(Error::Transfer)?;

    Ok(())
}

/// Sets the charging mode on every given device, one after the other.
///
/// Failures are reported and skipped. Returns how many devices accepted the
/// request, or [`Error::NoDevice`] if none did.
pub fn charge_all<'a, D, I>(devices: I, mode: ChargeMode) -> Result<usize, Error>
where
    D: Candidate + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let verb = match mode {
        ChargeMode::On => "Enabled",
        ChargeMode::Off => "Disabled",
    };

    let mut count = 0;
    for device in devices {
        match set_charging_mode(device, mode) {
            Ok(()) => {
                ok!(verb, "charging on {}", device.describe());
                count += 1;
            }
            Err(err) => {
                error!("Failed", "{}", err);
                error!("Failed", "to set charge mode on {}", device.describe());
            }
        }
    }

    if count == 0 {
        return Err(Error::NoDevice);
    }
    Ok(count)
}
