//! ABI of the root registry: the built-in contract governing which contracts exist on a
//! chain, how they were initialized, what fees they charge, and who may deploy new ones.

mod chain_info;
mod constants;
mod contract_record;

use once_cell::sync::Lazy;

use crate::Hname;

pub use chain_info::ChainInfo;
pub use constants::*;
pub use contract_record::{ContractRecord, InvalidFee};

/// The root registry's own `Hname`, derived from [`CONTRACT_NAME`].
pub static ROOT_HNAME: Lazy<Hname> = Lazy::new(|| Hname::from_name(CONTRACT_NAME));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_hname_matches_derivation() {
        assert_eq!(*ROOT_HNAME, Hname::from_name("root"));
        assert_ne!(*ROOT_HNAME, Hname::NIL);
    }
}
