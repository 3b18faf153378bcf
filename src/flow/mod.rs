pub mod conversion;
pub mod definition;
pub mod reference;

pub use conversion::*;
pub use definition::*;
pub use reference::*;
