//! Contracts that are safe targets for a Safe `DelegateCall`

use alloy::primitives::{address, Address};

/// Canonical, EIP-155 and zkSync deployments of MultiSendCallOnly,
/// SafeMigration and SignMessageLib.
pub const TRUSTED_DELEGATE_TARGETS: [Address; 12] = [
    // MultiSendCallOnly v1.3.0 (canonical, eip155, zksync)
    address!("40A2aCCbd92BCA938b02010E17A5b8929b49130D"),
    address!("A1dabEF33b3B82c7814B6D82A79e50F4AC44102B"),
    address!("f220D3b4DFb23C4ade8C88E526C1353AbAcbC38F"),
    // MultiSendCallOnly v1.4.1 (canonical, zksync)
    address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"),
    address!("0408EF011960d02349d50286D20531229BCef773"),
    // SafeMigration v1.4.1 (canonical, zksync)
    address!("526643F69b81B008F46d95CD5ced5eC0edFFDaC6"),
    address!("817756C6c555A94BCEE39eB5a102AbC1678b09A7"),
    // SignMessageLib v1.3.0 (canonical, eip155, zksync)
    address!("A65387F16B013cf2Af4605Ad8aA5ec25a2cbA3a2"),
    address!("98FFBBF51bb33A056B08ddf711f289936AafF717"),
    address!("357147caf9C0cCa67DFA0CF5369318d8193c8407"),
    // SignMessageLib v1.4.1 (canonical, zksync)
    address!("d53cd0aB83D845Ac265BE939c57F53AD838012c9"),
    address!("Aca1ec0a1A575CDCCF1DC3d5d296202Eb6061888"),
];

/// Returns true if `target` is a known delegate-call library
pub fn is_trusted_delegate(target: Address) -> bool {
    TRUSTED_DELEGATE_TARGETS.contains(&target)
}
