use proptest::prelude::*;

use wrap_exchange::{BlockHeight, Exchange, ExchangeParams, Principal};
use wrap_nullables::{NullEventSink, NullReserve};

#[derive(Clone, Debug)]
enum Op {
    Deposit(usize, u128),
    Withdraw(usize, u128),
    Transfer(usize, usize, u128),
    Enable,
    Disable,
    Mine(u64),
}

const HOLDERS: usize = 4;

fn holder(i: usize) -> Principal {
    Principal::parse(format!("ST{i}HOLDER")).unwrap()
}

fn custodian() -> Principal {
    Principal::parse("ST1CUSTODIAN").unwrap()
}

fn escrow() -> Principal {
    Principal::parse("ST1CUSTODIAN.usabtc-token").unwrap()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..HOLDERS, 0u128..50_000).prop_map(|(h, a)| Op::Deposit(h, a)),
        4 => (0..HOLDERS, 0u128..50_000).prop_map(|(h, a)| Op::Withdraw(h, a)),
        3 => (0..HOLDERS, 0..HOLDERS, 0u128..50_000).prop_map(|(f, t, a)| Op::Transfer(f, t, a)),
        1 => Just(Op::Enable),
        1 => Just(Op::Disable),
        2 => (0u64..8).prop_map(Op::Mine),
    ]
}

proptest! {
    /// Whatever happens, claims in circulation are exactly backed by the
    /// reserve in escrow, and reserve is neither created nor destroyed.
    #[test]
    fn escrow_always_backs_supply(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let params = ExchangeParams { activation_delay_blocks: 5, ..Default::default() };
        let mut reserve = NullReserve::new();
        for i in 0..HOLDERS {
            reserve.fund(&holder(i), 1_000_000);
        }
        let mut ex = Exchange::new(&params, escrow(), custodian(), reserve, NullEventSink::new())
            .unwrap();
        let mut height = BlockHeight::new(1);

        for op in ops {
            let _ = match op {
                Op::Deposit(h, a) => ex.deposit(a, &holder(h)).map(|_| ()),
                Op::Withdraw(h, a) => ex.withdraw(a, &holder(h), height).map(|_| ()),
                Op::Transfer(f, t, a) => {
                    ex.transfer(a, &holder(f), &holder(t), &holder(f), None).map(|_| ())
                }
                Op::Enable => ex.enable_tax(&custodian(), height).map(|_| ()),
                Op::Disable => ex.disable_tax(&custodian(), height).map(|_| ()),
                Op::Mine(n) => {
                    height = BlockHeight::new(height.as_u64() + n);
                    Ok(())
                }
            };
            prop_assert!(ex.check_conservation().is_ok());
            prop_assert_eq!(ex.reserve().balance_of(&escrow()), ex.total_supply());
        }

        let reserve_total: u128 = (0..HOLDERS)
            .map(|i| ex.reserve().balance_of(&holder(i)))
            .sum::<u128>()
            + ex.reserve().balance_of(&escrow())
            + ex.reserve().balance_of(&custodian());
        prop_assert_eq!(reserve_total, HOLDERS as u128 * 1_000_000);
    }

    /// A withdrawal splits the burned amount exactly into net and tax.
    #[test]
    fn withdraw_splits_exactly(amount in 1u128..1_000_000, mined in 0u64..10) {
        let params = ExchangeParams { activation_delay_blocks: 5, ..Default::default() };
        let mut reserve = NullReserve::new();
        reserve.fund(&holder(0), amount);
        let mut ex = Exchange::new(&params, escrow(), custodian(), reserve, NullEventSink::new())
            .unwrap();
        ex.enable_tax(&custodian(), BlockHeight::new(1)).unwrap();
        ex.deposit(amount, &holder(0)).unwrap();

        let now = BlockHeight::new(1 + mined);
        let expected_tax = ex.tax_for_amount(amount, now);
        let net = ex.withdraw(amount, &holder(0), now).unwrap();

        prop_assert_eq!(net + expected_tax, amount);
        prop_assert_eq!(ex.reserve().balance_of(&holder(0)), net);
        prop_assert_eq!(ex.reserve().balance_of(&custodian()), expected_tax);
        if mined < 5 {
            prop_assert_eq!(expected_tax, 0);
        } else {
            prop_assert_eq!(expected_tax, amount / 10);
        }
    }
}
