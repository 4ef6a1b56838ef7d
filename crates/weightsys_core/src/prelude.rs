pub use crate::options::*;
pub use crate::system::*;
pub use crate::weighted::*;
