use crate::{data::format_fingerprint, options::FingerprintOptions};

pub fn fingerprint(options: FingerprintOptions) {
    println!("{}", format_fingerprint(atlasmith::fingerprint(&options.names)));
}
