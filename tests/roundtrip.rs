//! Property tests: every value decodes from its own encoding, consuming
//! exactly the bytes written, and re-encodes to the same bytes.

use bcs_model::{from_bytes, marshal, uleb128, unmarshal, Address, Decode, Encode, U256};
use proptest::prelude::*;

fn check<T>(value: &T) -> Result<(), TestCaseError>
where
    T: Encode + Decode + Default + PartialEq + std::fmt::Debug,
{
    let bytes = marshal(value).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(value.enc_len(), Ok(bytes.len()));

    let mut dest = T::default();
    prop_assert_eq!(unmarshal(&bytes, &mut dest), Ok(bytes.len()));
    prop_assert_eq!(&dest, value);
    prop_assert_eq!(marshal(&dest).ok(), Some(bytes));
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Encode, Decode)]
struct Transfer {
    recipient: Address,
    amount: u64,
    #[bcs = "optional"]
    memo: Option<String>,
    #[bcs = "-"]
    seen: bool,
    tags: Vec<u16>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Encode, Decode)]
enum Command {
    #[default]
    Noop,
    Pay(Transfer),
    Split { amounts: Vec<u64>, coin: [u8; 32] },
    Publish(Vec<Vec<u8>>),
}

prop_compose! {
    fn arb_address()(bytes in any::<[u8; 32]>()) -> Address {
        Address::new(bytes)
    }
}

prop_compose! {
    fn arb_u256()(bytes in any::<[u8; 32]>()) -> U256 {
        U256::from_le_bytes(bytes)
    }
}

prop_compose! {
    fn arb_transfer()(
        recipient in arb_address(),
        amount in any::<u64>(),
        memo in proptest::option::of(".{0,40}"),
        tags in proptest::collection::vec(any::<u16>(), 0..8),
    ) -> Transfer {
        Transfer { recipient, amount, memo, seen: false, tags }
    }
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Noop),
        arb_transfer().prop_map(Command::Pay),
        (proptest::collection::vec(any::<u64>(), 0..6), any::<[u8; 32]>())
            .prop_map(|(amounts, coin)| Command::Split { amounts, coin }),
        proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..200), 0..4)
            .prop_map(Command::Publish),
    ]
}

proptest! {
    #[test]
    fn integers(a in any::<u8>(), b in any::<u16>(), c in any::<u32>(), d in any::<u64>(), e in any::<u128>(), f in any::<i64>()) {
        check(&a)?;
        check(&b)?;
        check(&c)?;
        check(&d)?;
        check(&e)?;
        check(&f)?;
    }

    #[test]
    fn strings(s in ".*") {
        check(&s)?;
    }

    #[test]
    fn byte_vectors(v in proptest::collection::vec(any::<u8>(), 0..300)) {
        check(&v)?;
    }

    #[test]
    fn integer_vectors(v in proptest::collection::vec(any::<u16>(), 0..200)) {
        check(&v)?;
    }

    #[test]
    fn byte_arrays(arr in any::<[u8; 32]>()) {
        check(&arr)?;
    }

    #[test]
    fn options(v in proptest::option::of(any::<u64>())) {
        check(&v)?;
    }

    #[test]
    fn addresses(addr in arb_address()) {
        check(&addr)?;
        prop_assert_eq!(marshal(&addr).ok(), Some(addr.bytes().to_vec()));
    }

    #[test]
    fn wide_integers(n in arb_u256()) {
        check(&n)?;
    }

    #[test]
    fn records(t in arb_transfer()) {
        check(&t)?;
        let noted = Transfer { seen: true, ..t.clone() };
        prop_assert_eq!(from_bytes::<Transfer>(&marshal(&noted).unwrap()), Ok(t));
    }

    #[test]
    fn enums(cmd in arb_command()) {
        check(&cmd)?;
    }

    #[test]
    fn uleb128_values(n in any::<u64>()) {
        let bytes = uleb128::to_vec(n);
        prop_assert_eq!(bytes.len(), uleb128::encoded_len(n));
        prop_assert_eq!(uleb128::from_slice(&bytes), Ok((n, bytes.len())));
    }
}
