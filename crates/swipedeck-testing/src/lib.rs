//! Testing utilities and harness for SwipeDeck

pub mod robot;

pub use robot::*;

pub mod prelude {
    pub use crate::robot::*;
}
