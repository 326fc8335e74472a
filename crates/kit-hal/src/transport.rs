//! Transport trait implemented by every device bus driver.

use kit_common::KitStatus;

use crate::interface::DeviceInfo;

/// Operations a device bus driver provides.
///
/// Handles are bus addresses as reported by [`Transport::discover`]. Byte
/// buffers are in/out: `send` consumes the command packet, `receive` fills
/// the buffer with the response, `talk` does both.
pub trait Transport: Send {
    /// Bring the bus up.
    fn init(&mut self) -> KitStatus;

    /// Release the bus.
    fn deinit(&mut self) -> KitStatus;

    /// Scan the bus, returning at most `limit` devices.
    fn discover(&mut self, limit: usize) -> Vec<DeviceInfo>;

    fn wake(&mut self, handle: u32) -> KitStatus;

    fn idle(&mut self, handle: u32) -> KitStatus;

    fn sleep(&mut self, handle: u32) -> KitStatus;

    fn send(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus;

    fn receive(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus;

    /// Send a command and read back its response into the same buffer.
    fn talk(&mut self, handle: u32, data: &mut Vec<u8>) -> KitStatus {
        let status = self.send(handle, data);
        if !status.is_success() {
            return status;
        }
        self.receive(handle, data)
    }
}
