mod device;
mod event;
mod in_memory;
mod result;

pub use device::*;
pub use event::*;
pub use in_memory::*;
pub use result::*;
