pub mod clipboard;
pub mod notify;
pub mod system;

pub use system::DeviceInfo;
