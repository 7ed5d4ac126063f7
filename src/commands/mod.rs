mod fingerprint;
mod pack;

pub use fingerprint::*;
pub use pack::*;
