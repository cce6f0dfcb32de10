mod feedback;
mod idle;
mod question;
mod results;

pub use self::feedback::*;
pub use self::idle::*;
pub use self::question::*;
pub use self::results::*;
