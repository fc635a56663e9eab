use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Fingerprint of a stored schedule.
///
/// Hosts keep it next to the schedule column to tell whether a record's schedule
/// changed without decoding it, or to group records that recur identically. It is
/// computed over the canonical CBOR form, so a schedule that went through text
/// storage any number of times keeps its key. The text form is 64 lowercase hex
/// digits and parses back with [`str::parse`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleKey([u8; 32]);

impl ScheduleKey {
    /// Fingerprints canonical schedule bytes, as produced by `Schedule::to_bytes`.
    pub(crate) fn of_canonical(bytes: &[u8]) -> Self {
        ScheduleKey(*blake3::hash(bytes).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleKey({})", self)
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for ScheduleKey {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ScheduleError::Format(format!("invalid schedule key: {:?}", s));
        if s.len() != 64 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut bytes = [0u8; 32];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(ScheduleKey(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_key() {
        assert_eq!(
            ScheduleKey::of_canonical(b"daily(3)"),
            ScheduleKey::of_canonical(b"daily(3)")
        );
        assert_ne!(
            ScheduleKey::of_canonical(b"daily(3)"),
            ScheduleKey::of_canonical(b"weekly(3)")
        );
    }

    #[test]
    fn text_form_parses_back() {
        let key = ScheduleKey::of_canonical(b"test");
        let text = key.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(format!("{:?}", key), format!("ScheduleKey({})", text));

        let parsed: ScheduleKey = text.parse().unwrap();
        assert_eq!(parsed, key);
        let upper: ScheduleKey = text.to_uppercase().parse().unwrap();
        assert_eq!(upper, key);
    }

    #[test]
    fn malformed_text_is_rejected() {
        let text = ScheduleKey::of_canonical(b"test").to_string();
        let bad = [
            String::new(),
            text[..62].to_string(),
            format!("{}00", text),
            format!("zz{}", &text[2..]),
            format!("+{}", &text[1..]),
            format!("é{}", &text[2..]),
        ];
        for bad in &bad {
            assert!(
                matches!(bad.parse::<ScheduleKey>(), Err(ScheduleError::Format(_))),
                "accepted {:?}",
                bad
            );
        }
    }
}
