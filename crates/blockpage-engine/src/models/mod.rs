pub mod block;
pub mod site;

pub use block::*;
pub use site::*;
