//! Property tests: arbitrary string claims survive build/verify, and any
//! content change is caught by the signature.

mod common;

use common::*;
use cryypt_token::{Claims, TokenBuilder, TokenConfig, TokenError, TokenVerifier};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn claim_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    // `exp` is reserved and validated, keep it out of arbitrary keys
    prop::collection::btree_map("[a-df-z_][a-z0-9_]{0,12}", any::<String>(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_returns_original_claims(map in claim_map()) {
        let claims = Claims::from(map);
        let token = TokenBuilder::new(TokenConfig::default())
            .build(&claims, &signing_key_a())
            .expect("build should succeed");
        let verified = TokenVerifier::new(TokenConfig::default())
            .verify(token.as_str(), &verifying_key_a())
            .expect("verify should succeed");
        prop_assert_eq!(verified, claims);
    }

    #[test]
    fn prop_payload_swap_is_detected(a in claim_map(), b in claim_map()) {
        prop_assume!(a != b);
        let builder = TokenBuilder::new(TokenConfig::default());
        let key = signing_key_a();
        let first = builder.build(&Claims::from(a), &key).expect("build");
        let second = builder.build(&Claims::from(b), &key).expect("build");

        let first = first.segments().expect("split");
        let second = second.segments().expect("split");
        let spliced = format!("{}.{}.{}", first.header, second.payload, first.signature);

        let result = TokenVerifier::new(TokenConfig::default())
            .verify(&spliced, &verifying_key_a());
        prop_assert_eq!(result, Err(TokenError::Signature));
    }
}
