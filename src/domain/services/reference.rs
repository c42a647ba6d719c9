use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const REFERENCE_PREFIX: &str = "GR-";

/// Human-facing confirmation code, `GR-` followed by eight uppercase base-36 characters.
///
/// The first four characters are the tail of the creation timestamp, the last four
/// are random. Uniqueness is probabilistic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn generate() -> Self {
        Self::generate_with(Utc::now().timestamp_millis(), &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(epoch_millis: i64, rng: &mut R) -> Self {
        let stamp = to_base36(epoch_millis.unsigned_abs());
        let tail = &stamp[stamp.len().saturating_sub(4)..];
        let random: String = (0..4).map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())])).collect();
        Self(format!("{}{}{}", REFERENCE_PREFIX, tail, random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
