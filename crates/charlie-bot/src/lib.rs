//! Turn interpreter for the Charlie bot.
//!
//! One inbound event in, one reply out. The interpreter classifies message
//! text against a fixed command table and delegates to the stateless
//! utility services in [`codec`] and [`weather`].

pub mod codec;
pub mod commands;
pub mod error;
pub mod interpreter;
pub mod weather;

pub use commands::{classify, Classified, Command};
pub use error::{CodecError, TurnError, WeatherError};
pub use interpreter::TurnInterpreter;
pub use weather::{WeatherClient, WeatherLookup, WeatherReport};
