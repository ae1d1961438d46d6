//! Collision-resistant destination names for uploaded payment proofs.

use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Builds `<unix-millis>_<base36 suffix>.<ext>` for an attachment.
pub fn object_name<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    rng: &mut R,
    file_name: &str,
    content_type: &str,
) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "{}_{}.{}",
        now.timestamp_millis(),
        suffix,
        extension(file_name, content_type)
    )
}

/// The file name's extension, or the MIME subtype when the name has none.
fn extension(file_name: &str, content_type: &str) -> String {
    let usable = |ext: &&str| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric());
    let from_name = file_name.rsplit_once('.').map(|(_, ext)| ext).filter(usable);
    // `svg+xml` and `png; q=1` keep only the leading subtype.
    let ext = from_name.unwrap_or_else(|| {
        content_type
            .split_once('/')
            .and_then(|(_, subtype)| subtype.split([';', '+']).next())
            .map(str::trim)
            .filter(usable)
            .unwrap_or("bin")
    });
    ext.to_ascii_lowercase()
}
