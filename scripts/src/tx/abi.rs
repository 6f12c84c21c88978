use alloy::sol;

sol! {
#[sol(rpc, all_derives)]
interface IKipuBank {
    error AlreadyInitialized();
    error InvalidInitialize();
    error AmountZero();
    error BankCapExceeded(uint256 attempted, uint256 available);
    error WithdrawLimitExceeded(uint256 requested, uint256 limit);
    error InsufficientBalance(uint256 requested, uint256 available);
    error TransferFailed();

    event Deposit(address indexed user, uint256 amount);
    event Withdraw(address indexed user, uint256 amount);

    function initialize(uint256 bankCap, uint256 maxWithdrawPerTx) external;

    function deposit() external payable;

    function withdraw(uint256 amount) external;

    function bankCap() external view returns (uint256);

    function maxWithdrawPerTx() external view returns (uint256);

    function totalDeposited() external view returns (uint256);

    function balanceOf(address user) external view returns (uint256);

    function depositCount() external view returns (uint256);

    function withdrawCount() external view returns (uint256);
}

}
