mod format;
mod mapper;
mod phone;

pub use format::*;
pub use mapper::*;
pub use phone::*;
