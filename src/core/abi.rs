//! Contract interfaces of the project registry and round contracts, and the
//! hex plumbing between their ABI types and JSON-RPC strings.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use std::fmt;
use std::str::FromStr;

sol! {
    #![sol(all_derives)]

    /// Content pointer stored on chain.
    struct MetaPtr {
        uint256 protocol;
        string pointer;
    }

    event ProjectCreated(uint256 indexed projectID, address indexed owner);
    event MetadataUpdated(uint256 indexed projectID, MetaPtr metaPtr);

    function projectsMetaPtr() returns (MetaPtr);
    function projects(uint256) returns (uint256 id, MetaPtr metadata);
}

pub mod signature_hash {
    use super::{MetadataUpdated, ProjectCreated};
    use alloy_sol_types::SolEvent;

    pub const PROJECT_CREATED: [u8; 32] = ProjectCreated::SIGNATURE_HASH.0;
    pub const METADATA_UPDATED: [u8; 32] = MetadataUpdated::SIGNATURE_HASH.0;
}

#[derive(Debug, Clone, PartialEq)]
pub enum AbiError {
    InvalidHex(String),
    InvalidAddress(String),
    InvalidQuantity(String),
    Decode(String),
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::InvalidHex(msg) => write!(f, "Invalid hex: {}", msg),
            AbiError::InvalidAddress(addr) => write!(f, "Invalid address: {}", addr),
            AbiError::InvalidQuantity(value) => write!(f, "Invalid quantity: {}", value),
            AbiError::Decode(msg) => write!(f, "ABI decoding failed: {}", msg),
        }
    }
}

impl From<alloy_sol_types::Error> for AbiError {
    fn from(e: alloy_sol_types::Error) -> Self {
        AbiError::Decode(e.to_string())
    }
}

pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn decode_hex(value: &str) -> Result<Vec<u8>, AbiError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    if stripped.len() % 2 == 1 {
        return hex::decode(format!("0{}", stripped)).map_err(|e| AbiError::InvalidHex(e.to_string()));
    }
    hex::decode(stripped).map_err(|e| AbiError::InvalidHex(e.to_string()))
}

/// A 32-byte topic or word.
pub fn parse_word(value: &str) -> Result<B256, AbiError> {
    let bytes = decode_hex(value)?;
    B256::try_from(bytes.as_slice())
        .map_err(|_| AbiError::InvalidHex(format!("expected 32 bytes, got {}", bytes.len())))
}

/// Topic hash as sent in `eth_getLogs` filters.
pub fn topic_hex(topic: B256) -> String {
    to_hex(topic)
}

/// Left-pad an address to a 32-byte topic.
pub fn address_topic(address: &str) -> Result<String, AbiError> {
    let address = Address::from_str(address.trim())
        .map_err(|_| AbiError::InvalidAddress(address.to_string()))?;
    Ok(topic_hex(address.into_word()))
}

/// Topic of an indexed `uint256` argument.
pub fn uint_topic(value: U256) -> String {
    topic_hex(B256::from(value.to_be_bytes::<32>()))
}

/// JSON-RPC quantity (`"0x64"`) as a u64.
pub fn parse_quantity(value: &str) -> Result<u64, AbiError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    u64::from_str_radix(stripped, 16).map_err(|_| AbiError::InvalidQuantity(value.to_string()))
}

/// Hex calldata of a contract call.
pub fn encode_call<C: SolCall>(call: &C) -> String {
    to_hex(call.abi_encode())
}

/// Decode the hex return data of `C`.
pub fn decode_returns<C: SolCall>(return_data: &str) -> Result<C::Return, AbiError> {
    let data = decode_hex(return_data)?;
    Ok(C::abi_decode_returns(&data, true)?)
}

/// `keccak256(abi.encodePacked(uint256 a, uint256 b))`
pub fn packed_uint_hash(a: U256, b: U256) -> B256 {
    alloy_primitives::keccak256((a, b).abi_encode_packed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolEvent;

    fn meta_ptr(pointer: &str) -> MetaPtr {
        MetaPtr { protocol: U256::from(1), pointer: pointer.to_string() }
    }

    #[test]
    fn test_event_signatures() {
        assert_eq!(ProjectCreated::SIGNATURE, "ProjectCreated(uint256,address)");
        assert_eq!(MetadataUpdated::SIGNATURE, "MetadataUpdated(uint256,(uint256,string))");
        assert_eq!(signature_hash::PROJECT_CREATED, alloy_primitives::keccak256("ProjectCreated(uint256,address)").0);
    }

    #[test]
    fn test_address_topic_pads_to_32_bytes() {
        let topic = address_topic("0xAbCdEf0123456789aBcDeF0123456789AbCdEf01").unwrap();
        assert_eq!(
            topic,
            "0x000000000000000000000000abcdef0123456789abcdef0123456789abcdef01"
        );
        assert!(address_topic("0x1234").is_err());
        assert!(address_topic("not-an-address").is_err());
    }

    #[test]
    fn test_uint_topic_and_parse_word() {
        let topic = uint_topic(U256::from(7));
        assert_eq!(topic, format!("0x{:0>64}", "7"));
        assert_eq!(U256::from_be_bytes(parse_word(&topic).unwrap().0), U256::from(7));
        assert!(parse_word("0x07").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x64").unwrap(), 100);
        assert_eq!(parse_quantity("0x1").unwrap(), 1);
        assert!(parse_quantity("0x010000000000000000").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_projects_meta_ptr_round_trip_through_hex() {
        let encoded = to_hex(projectsMetaPtrCall::abi_encode_returns(&(meta_ptr("QmRound"),)));
        let decoded = decode_returns::<projectsMetaPtrCall>(&encoded).unwrap();
        assert_eq!(decoded._0, meta_ptr("QmRound"));
    }

    #[test]
    fn test_projects_call_encoding() {
        let calldata = encode_call(&projectsCall { _0: U256::from(7) });
        assert_eq!(calldata.len(), 2 + 2 * (4 + 32));
        assert!(calldata.starts_with(&to_hex(projectsCall::SELECTOR)));
        assert!(calldata.ends_with(&format!("{:0>64}", "7")));
    }

    #[test]
    fn test_truncated_return_data_is_an_error() {
        assert!(matches!(
            decode_returns::<projectsMetaPtrCall>("0x0000"),
            Err(AbiError::Decode(_))
        ));
    }

    #[test]
    fn test_huge_offset_is_an_error() {
        let mut data = [0u8; 96];
        data[24..32].copy_from_slice(&u64::MAX.to_be_bytes());
        assert!(matches!(
            decode_returns::<projectsMetaPtrCall>(&to_hex(data)),
            Err(AbiError::Decode(_))
        ));
    }

    #[test]
    fn test_huge_string_length_is_an_error() {
        // head offset 0x20, tuple {protocol: 1, pointer offset: 0x40}, length u64::MAX
        let mut data = vec![0u8; 4 * 32];
        data[31] = 0x20;
        data[63] = 1;
        data[95] = 0x40;
        data[96 + 24..128].copy_from_slice(&u64::MAX.to_be_bytes());
        assert!(matches!(
            decode_returns::<projectsMetaPtrCall>(&to_hex(data)),
            Err(AbiError::Decode(_))
        ));
    }

    #[test]
    fn test_packed_uint_hash() {
        let mut packed = [0u8; 64];
        packed[31] = 5;
        packed[63] = 7;
        assert_eq!(
            packed_uint_hash(U256::from(5), U256::from(7)),
            alloy_primitives::keccak256(packed)
        );
    }
}
