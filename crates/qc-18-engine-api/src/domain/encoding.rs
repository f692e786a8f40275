//! `0x`-prefixed hex encoding for byte fields on the wire.
//!
//! Used through `serde_with`, so it composes with `Option<_>` and `Vec<_>`:
//!
//! ```rust,ignore
//! #[serde_as(as = "Option<PrefixedHex>")]
//! pub extra_data: Option<Vec<u8>>,
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Marker type for `#[serde_as(as = "PrefixedHex")]`.
pub struct PrefixedHex;

/// Decode a hex string with or without the `0x` prefix.
pub fn decode_prefixed(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

impl<T: AsRef<[u8]>> SerializeAs<T> for PrefixedHex {
    fn serialize_as<S: Serializer>(source: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(source.as_ref())))
    }
}

impl<'de> DeserializeAs<'de, Vec<u8>> for PrefixedHex {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_prefixed(&s).map_err(D::Error::custom)
    }
}

impl<'de, const N: usize> DeserializeAs<'de, [u8; N]> for PrefixedHex {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<[u8; N], D::Error> {
        let bytes =
            <PrefixedHex as DeserializeAs<'de, Vec<u8>>>::deserialize_as(deserializer)?;
        let len = bytes.len();
        bytes
            .try_into()
            .map_err(|_| D::Error::custom(format!("expected {} bytes, got {}", N, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_with::serde_as;

    #[serde_as]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde_as(as = "PrefixedHex")]
        data: Vec<u8>,
        #[serde_as(as = "PrefixedHex")]
        fixed: [u8; 4],
        #[serde_as(as = "Vec<PrefixedHex>")]
        list: Vec<Vec<u8>>,
    }

    #[test]
    fn test_encodes_with_prefix() {
        let sample = Sample {
            data: vec![0xde, 0xad],
            fixed: [0, 1, 2, 3],
            list: vec![vec![], vec![0xff]],
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["data"], "0xdead");
        assert_eq!(json["fixed"], "0x00010203");
        assert_eq!(json["list"][0], "0x");
        assert_eq!(json["list"][1], "0xff");
    }

    #[test]
    fn test_decodes_with_or_without_prefix() {
        let json = r#"{"data":"dead","fixed":"0x00010203","list":["0x01"]}"#;
        let sample: Sample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.data, vec![0xde, 0xad]);
        assert_eq!(sample.list, vec![vec![0x01]]);
    }

    #[test]
    fn test_fixed_length_enforced() {
        let json = r#"{"data":"0x","fixed":"0x0001","list":[]}"#;
        let err = serde_json::from_str::<Sample>(json).unwrap_err();
        assert!(err.to_string().contains("expected 4 bytes, got 2"));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(decode_prefixed("0xzz").is_err());
    }
}
