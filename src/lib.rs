#![no_std]

extern crate embedded_hal;
extern crate hal;
extern crate heapless;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod command;
pub mod config;
pub mod controller;
pub mod mux;
pub mod output;
pub mod router;
pub mod scheduler;
pub mod servo;
pub mod types;

#[cfg(test)]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[cfg(test)]
mod mock;
