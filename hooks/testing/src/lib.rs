mod bank;
mod builder;
mod channel;
mod migration;
mod packets;
mod suite;
mod tracing;
mod transfer;
mod vm;

pub use {
    bank::*, builder::*, channel::*, migration::*, packets::*, suite::*, tracing::*, transfer::*,
    vm::*,
};
