/// Event field conversion command.
pub mod event;
/// Typed value tree printing command.
pub mod inspect;
/// Stderr log subscriber setup.
pub mod logging;
/// Native value conversion command.
pub mod value;

mod util;

pub use util::InputArgs;
