mod bridge;
mod config;
mod context;
mod error;
mod gas;
mod keeper;
mod lifecycle;
mod middleware;
mod receive;
mod send;
mod state;
mod traits;

pub use {
    bridge::*, config::*, context::*, error::*, gas::*, keeper::*, middleware::*, state::*,
    traits::*,
};
