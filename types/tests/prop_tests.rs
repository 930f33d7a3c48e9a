use proptest::prelude::*;

use wrap_types::{BlockHeight, Principal};

proptest! {
    /// BlockHeight ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn height_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ha = BlockHeight::new(a);
        let hb = BlockHeight::new(b);
        prop_assert_eq!(ha <= hb, a <= b);
        prop_assert_eq!(ha.has_reached(hb), a >= b);
    }

    /// blocks_until is zero exactly when the target has been reached.
    #[test]
    fn blocks_until_zero_iff_reached(a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let now = BlockHeight::new(a);
        let target = BlockHeight::new(b);
        prop_assert_eq!(now.blocks_until(target) == 0, now.has_reached(target));
    }

    /// checked_add only fails past u64::MAX.
    #[test]
    fn checked_add_overflow(a in 0u64..u64::MAX, d in 0u64..u64::MAX) {
        let h = BlockHeight::new(a).checked_add(d);
        prop_assert_eq!(h.is_none(), a.checked_add(d).is_none());
    }

    /// Alphanumeric account addresses always parse as standard principals.
    #[test]
    fn alphanumeric_addresses_parse(raw in "[A-Z0-9]{1,41}") {
        let p = Principal::parse(raw.clone()).unwrap();
        prop_assert!(!p.is_contract());
        prop_assert_eq!(p.as_str(), raw.as_str());
    }

    /// Principal bincode serialization roundtrip.
    #[test]
    fn principal_bincode_roundtrip(addr in "[A-Z0-9]{1,41}", name in "[a-z][a-z0-9-]{0,20}") {
        let deployer = Principal::parse(addr).unwrap();
        let p = Principal::contract(&deployer, &name).unwrap();
        let encoded = bincode::serialize(&p).unwrap();
        let decoded: Principal = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, p);
    }
}
