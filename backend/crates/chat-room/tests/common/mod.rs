#![allow(unused_imports)]

pub(crate) mod gated_store;
pub(crate) mod test_room;

pub use failing_store::*;
pub use gated_store::*;
pub use test_room::*;
