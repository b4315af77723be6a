/// Greedy assembly loop, state threading, and observers
pub mod assembler;
/// Monotonic set of consumed edge slots
pub mod exclusion;
/// Edge similarity oracle trait and the distance table oracle
pub mod oracle;
/// Frontier construction and global best-match search
pub mod search;
