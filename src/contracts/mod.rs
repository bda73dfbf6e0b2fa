//! Contract ABI definitions and EIP-712 typehashes used by Safe

use alloy::primitives::{b256, B256};
use alloy::sol;

sol! {
    /// Safe owner-management and approval entry points
    interface ISafe {
        /// Marks a hash as approved by `msg.sender` (used by nested Safe owners)
        function approveHash(bytes32 hashToApprove) external;

        function addOwnerWithThreshold(address owner, uint256 _threshold) external;
        function removeOwner(address prevOwner, address owner, uint256 _threshold) external;
        function swapOwner(address prevOwner, address oldOwner, address newOwner) external;
        function changeThreshold(uint256 _threshold) external;

        function enableModule(address module) external;
        function disableModule(address prevModule, address module) external;
        function setGuard(address guard) external;
        function setFallbackHandler(address handler) external;

        /// Returns the Safe version string, e.g. `1.3.0`
        function VERSION() external view returns (string memory);
    }

    /// MultiSendCallOnly - batches calls without allowing DelegateCall
    interface IMultiSendCallOnly {
        function multiSend(bytes memory transactions) external payable;
    }

    /// SignMessageLib - marks a message as signed by the Safe (delegatecalled)
    interface ISignMessageLib {
        function signMessage(bytes calldata _data) external;
    }
}

/// EIP-712 domain type hash for Safe >= 1.2.0
/// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: B256 =
    b256!("0x47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218");

/// EIP-712 domain type hash for Safe < 1.2.0
/// keccak256("EIP712Domain(address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH_OLD: B256 =
    b256!("0x035aff83d86937d35b32e04f0ddc6ff469290eef2f1b692d8a815c89404d4749");

/// EIP-712 type hash for SafeTx struct (Safe >= 1.0.0)
/// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)")
pub const SAFE_TX_TYPEHASH: B256 =
    b256!("0xbb8310d486368db6bd6f849402fdd73ad53d316b5a4b2644ad6efe0f941286d8");

/// EIP-712 type hash for SafeTx struct (Safe < 1.0.0, `dataGas` instead of `baseGas`)
pub const SAFE_TX_TYPEHASH_OLD: B256 =
    b256!("0x14d461bc7412367e924637b363c7bf29b8f47e2f84869f4426e5633d8af47b20");

/// EIP-712 type hash for SafeMessage struct
/// keccak256("SafeMessage(bytes message)")
pub const SAFE_MSG_TYPEHASH: B256 =
    b256!("0x60b3cbf8b4a223d68d641b3b6ddf9a298e7f33710cf3d3a9d1146b5a6150fbca");
