pub mod logging;
pub mod mr;
pub mod mrapps;
pub mod mrrt;
mod util;
