//! Solidity interface of the cheatcode address.
//!
//! Overloads are numbered in declaration order by `sol!`, e.g. `toString(address)` is
//! `toString_0Call` and `toString(int256)` is `toString_5Call`.

use alloy_sol_types::sol;

sol! {
#[derive(Debug, PartialEq, Eq)]
interface Vm {
    /// Gets the address for a given private key.
    function addr(uint256 privateKey) external pure returns (address keyAddr);

    /// Sets an address' balance.
    function deal(address account, uint256 newBalance) external;

    /// Sets an address' code.
    function etch(address target, bytes calldata newRuntimeBytecode) external;

    /// Gets the nonce of an account.
    function getNonce(address account) external view returns (uint64 nonce);

    /// Loads a storage slot from an address.
    function load(address target, bytes32 slot) external view returns (bytes32 data);

    /// Sets `block.number`.
    function roll(uint256 newHeight) external;

    /// Sets the nonce of an account. Lower values than the current nonce are accepted.
    function setNonce(address account, uint64 newNonce) external;

    /// Sets all subsequent calls' `msg.sender` to be the input address until `stopPrank` is called.
    function startPrank(address msgSender) external;

    /// Sets all subsequent calls' `msg.sender` to be the input address until `stopPrank` is called,
    /// and the `tx.origin` to be the second input.
    function startPrank(address msgSender, address txOrigin) external;

    /// Resets subsequent calls' `msg.sender` to be `address(this)`.
    function stopPrank() external;

    /// Stores a value to an address' storage slot.
    function store(address target, bytes32 slot, bytes32 value) external;

    /// Converts the given value to a `string`.
    function toString(address value) external pure returns (string memory stringifiedValue);
    /// Converts the given value to a `string`.
    function toString(bytes calldata value) external pure returns (string memory stringifiedValue);
    /// Converts the given value to a `string`.
    function toString(bytes32 value) external pure returns (string memory stringifiedValue);
    /// Converts the given value to a `string`.
    function toString(bool value) external pure returns (string memory stringifiedValue);
    /// Converts the given value to a `string`.
    function toString(uint256 value) external pure returns (string memory stringifiedValue);
    /// Converts the given value to a `string`.
    function toString(int256 value) external pure returns (string memory stringifiedValue);

    /// Sets `block.timestamp`.
    function warp(uint256 newTimestamp) external;
}
}
