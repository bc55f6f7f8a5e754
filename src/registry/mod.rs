pub mod conversion;
pub mod descriptor;
pub mod loader;

pub use conversion::*;
pub use descriptor::*;
pub use loader::*;
