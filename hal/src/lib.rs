#![no_std]

pub mod clock;
pub mod pwm;
