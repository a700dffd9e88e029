mod denom;
mod packet;
mod transfer;

pub use {denom::*, packet::*, transfer::*};
