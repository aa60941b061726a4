use alloy_primitives::U256;

use super::abi::{self, projectsCall, projectsMetaPtrCall, MetaPtr};
use super::error::ActionError;
use super::rpc_base::ChainProvider;

/// Identifier a project's round applications are filed under:
/// `keccak256(abi.encodePacked(uint256 chainId, uint256 projectNumber))`.
pub fn generate_unique_round_application_id(chain_id: u64, project_number: U256) -> String {
    abi::topic_hex(abi::packed_uint_hash(U256::from(chain_id), project_number))
}

/// Pointer to the round's document of project applications.
pub async fn projects_meta_ptr(provider: &dyn ChainProvider, round_address: &str) -> Result<MetaPtr, ActionError> {
    let data = abi::encode_call(&projectsMetaPtrCall {});
    let result = provider.call(round_address, &data).await?;
    Ok(abi::decode_returns::<projectsMetaPtrCall>(&result)?._0)
}

/// Metadata pointer of a registered project.
pub async fn project_metadata_ptr(
    provider: &dyn ChainProvider,
    registry: &str,
    project_number: U256,
) -> Result<MetaPtr, ActionError> {
    let data = abi::encode_call(&projectsCall { _0: project_number });
    let result = provider.call(registry, &data).await?;
    Ok(abi::decode_returns::<projectsCall>(&result)?.metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abi::AbiError;
    use crate::core::rpc_base::RpcError;
    use crate::core::test_support::{meta_ptr_return, project_return, FakeProvider, REGISTRY};
    use alloy_sol_types::SolCall;
    use futures::executor::block_on;

    #[test]
    fn test_application_id_is_deterministic_per_chain() {
        let seven = U256::from(7);
        let id = generate_unique_round_application_id(5, seven);
        assert_eq!(id.len(), 66);
        assert!(id.starts_with("0x"));
        assert_eq!(id, generate_unique_round_application_id(5, seven));
        assert_ne!(id, generate_unique_round_application_id(10, seven));
        assert_ne!(id, generate_unique_round_application_id(5, U256::from(8)));
    }

    #[test]
    fn test_application_id_matches_packed_keccak() {
        let mut packed = [0u8; 64];
        packed[31] = 5;
        packed[63] = 7;
        assert_eq!(
            generate_unique_round_application_id(5, U256::from(7)),
            abi::to_hex(alloy_primitives::keccak256(packed))
        );
    }

    #[test]
    fn test_projects_meta_ptr_call() {
        let provider = FakeProvider::new().with_call_result("0xround", &meta_ptr_return("QmApplications"));
        let meta_ptr = block_on(projects_meta_ptr(&provider, "0xround")).unwrap();
        assert_eq!(meta_ptr.pointer, "QmApplications");

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("0xround".to_string(), abi::to_hex(projectsMetaPtrCall::SELECTOR)));
    }

    #[test]
    fn test_projects_meta_ptr_revert() {
        let provider = FakeProvider::new().with_call_error(
            "0xround",
            RpcError::ProviderError { code: 3, message: "execution reverted".to_string() },
        );
        assert!(matches!(
            block_on(projects_meta_ptr(&provider, "0xround")),
            Err(ActionError::Rpc(RpcError::ProviderError { .. }))
        ));
    }

    #[test]
    fn test_projects_meta_ptr_malformed_return_data() {
        // offset word far past the end of the buffer
        let bad_offset = format!("0x{:0>64}", "ffffffffffffffff");
        // valid offsets, string length u64::MAX
        let bad_length = format!(
            "0x{:0>64}{:0>64}{:0>64}{:0>64}",
            "20", "1", "40", "ffffffffffffffff"
        );

        for data in [bad_offset, bad_length, "0x".to_string()] {
            let provider = FakeProvider::new().with_call_result("0xround", &data);
            assert!(matches!(
                block_on(projects_meta_ptr(&provider, "0xround")),
                Err(ActionError::Abi(AbiError::Decode(_)))
            ));
        }
    }

    #[test]
    fn test_project_metadata_ptr() {
        let provider = FakeProvider::new().with_call_result(REGISTRY, &project_return(7, "QmProject7"));
        let meta_ptr = block_on(project_metadata_ptr(&provider, REGISTRY, U256::from(7))).unwrap();
        assert_eq!(meta_ptr, MetaPtr { protocol: U256::from(1), pointer: "QmProject7".to_string() });
        assert!(provider.calls()[0].1.ends_with(&format!("{:0>64}", "7")));
    }
}
