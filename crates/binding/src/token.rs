//! Token contract bindings.
//!
//! The token is ERC20-like but exposes its own surface: supply changes go
//! through `mint`/`burn`, transfers through `transferFunds`, and the caller's
//! balance is read with `getBalance` (keyed on `msg.sender`). Every state
//! change emits an event carrying a human-readable message.

use alloy_sol_types::sol;

sol! {
    /// Mintable/burnable token with caller-relative reads
    #[sol(rpc)]
    interface IERC20Token {
        /// Emitted after a successful mint
        event MintMore(uint256 amount, string message);

        /// Emitted after a successful burn
        event BurnToken(uint256 amount, string message);

        /// Emitted after a successful `transferFunds`
        event TransferFund(uint256 amount, address to, string message);

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get the balance of `msg.sender`
        function getBalance() external view returns (uint256);

        /// Whether `msg.sender` is the contract owner
        function checkOwner() external view returns (bool);

        /// Mint new tokens to `msg.sender`
        function mint(uint256 amount) external;

        /// Burn tokens (owner only, enforced by the contract)
        function burn(uint256 amount) external;

        /// Transfer tokens from `msg.sender` to `to`
        function transferFunds(address to, uint256 amount) external;
    }
}
