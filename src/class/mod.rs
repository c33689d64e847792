//! Classes whose methods can carry contracts.
//!
//! A [`ClassBuilder`] plays the part of a class body: contracts are declared on
//! it, then methods are defined, and each definition runs the interception
//! engine. [`ClassBuilder::build`] yields the finished [`Class`].

pub use self::builder::ClassBuilder;
pub use self::object::{method, Class, Instance, Method, MethodBody, Receiver};

// --- MODULE DECLARATIONS ---
mod builder;
mod interception;
mod object;
