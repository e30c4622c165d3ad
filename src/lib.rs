//! # redmock
//!
//! An in-process emulator of Redis's sorted-set and set commands.
//!
//! Store-dependent code can run its commands against an [`Emulator`] instead of
//! a live server. The emulator reproduces the rank and score range rules of
//! `ZRANGE`/`ZRANGEBYSCORE` and their reverse forms, along with `ZADD`,
//! `SADD`, `SISMEMBER`, `SMEMBERS`, `SCARD` and `SDIFF`. The `redmock` binary is a
//! line-oriented debug shell over the same engine, reading stdin or a script file.

pub mod command;
pub mod config;
pub mod emulator;
pub mod error;
pub mod session;
pub mod store;
pub mod types;
pub mod value;

pub use command::{Command, Reply};
pub use emulator::Emulator;
pub use error::{MockError, MockResult};
pub use value::{Options, Value};
