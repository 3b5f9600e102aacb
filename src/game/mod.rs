mod scores;
mod session;

pub use scores::*;
pub use session::*;
