pub mod error;
pub mod nullable;
pub mod optional;
pub mod pipeline;
pub mod test_framework;
pub mod web;

mod shared;


pub use error::*;
pub use nullable::*;
pub use optional::*;
