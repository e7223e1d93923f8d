//! Tests for the panic channel

use felt_primitives::{assert, panic, panic_with, Felt, PanicPayload, U128, U256};

mod assertions {
    use super::*;

    #[test]
    fn true_condition_returns() {
        assert(true, "unreachable");
        assert(1 + 1 == 2, "math works");
    }

    #[test]
    #[should_panic]
    fn false_condition_panics() {
        assert(false, "expected failure");
    }

    #[test]
    fn payload_is_the_message() {
        let payload = panic::catch(|| assert(false, "balance too low")).unwrap_err();
        assert_eq!(payload.len(), 1);
        assert_eq!(
            payload.values()[0],
            Felt::from_short_string("balance too low").unwrap()
        );
        assert_eq!(payload.to_string(), "balance too low");
    }

    #[test]
    fn long_message_is_still_found() {
        let message = "withdrawal amount exceeds the available account balance";
        let payload = panic::catch(|| assert(false, message)).unwrap_err();
        assert!(payload.len() > 1);
        assert!(payload.contains_message(message));
        assert_eq!(payload.to_string(), message);
    }
}

mod raising {
    use super::*;

    #[test]
    #[should_panic]
    fn explicit_payload() {
        panic_with(PanicPayload::new(vec![Felt::from(1u8), Felt::from(2u8)]));
    }

    #[test]
    fn payload_order_is_kept() {
        let values = vec![Felt::from(3u8), Felt::from(1u8), Felt::from(2u8)];
        let payload = panic::catch(|| panic_with(values.clone().into())).unwrap_err();
        assert_eq!(payload.values(), values.as_slice());
    }

    #[test]
    fn unwinds_through_nested_calls() {
        fn inner(x: U128) -> U128 {
            x - U128::ONE
        }
        fn outer(x: U128) -> U128 {
            inner(x) + U128::ONE
        }
        assert_eq!(panic::catch(|| outer(U128::new(5))), Ok(U128::new(5)));
        let payload = panic::catch(|| outer(U128::ZERO)).unwrap_err();
        assert!(payload.contains_message("u128_sub Overflow"));
    }

    fn payload_of<R>(f: impl FnOnce() -> R) -> PanicPayload {
        match panic::catch(f) {
            Ok(_) => panic!("expected a panic"),
            Err(payload) => payload,
        }
    }

    #[test]
    fn each_fault_kind_has_a_message() {
        assert!(payload_of(|| U128::MAX + U128::ONE).contains_message("u128_add Overflow"));
        assert!(payload_of(|| U128::ZERO - U128::ONE).contains_message("u128_sub Overflow"));
        assert!(payload_of(|| U128::MAX * U128::MAX).contains_message("u128_mul Overflow"));
        assert!(payload_of(|| U128::ONE / U128::ZERO).contains_message("Division by 0"));
        assert!(payload_of(|| U256::MAX + U256::ONE).contains_message("u256_add Overflow"));
        assert!(payload_of(|| U256::ZERO - U256::ONE).contains_message("u256_sub Overflow"));
        assert!(payload_of(|| U256::MAX * U256::MAX).contains_message("u256_mul Overflow"));
        assert!(payload_of(|| U256::ONE % U256::ZERO).contains_message("Division by 0"));
    }
}
