pub mod atom;
pub mod decomposition;
pub mod node;
pub mod summary;

pub use atom::*;
pub use decomposition::*;
pub use node::*;
pub use summary::*;
