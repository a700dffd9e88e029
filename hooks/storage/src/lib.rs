mod bound;
mod codec;
mod key;
mod map;
mod path;
mod prefix;

pub use {bound::*, codec::*, key::*, map::*, path::*, prefix::*};
