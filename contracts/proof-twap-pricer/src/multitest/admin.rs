use cosmwasm_std::{Addr, Uint128, Uint256};
use proof_twap::{Denomination, FreshnessWindow, Token, TwapError};
use twap_tests::builder::proof_for_block;

use super::suite::{SuiteBuilder, ADMIN, FINALIZER, JUNO, USDC};
use crate::ContractError;

#[test]
fn setters_require_admin() {
    let mut suite = SuiteBuilder::new().build();

    let owner = suite.owner.clone();
    let pair = suite.twap.pair.address.clone();
    for sender in [FINALIZER, owner.as_str()] {
        let err = suite
            .update_proof(sender, proof_for_block(1))
            .unwrap_err();
        assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

        let err = suite.update_pair(sender, &pair).unwrap_err();
        assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

        let err = suite.update_window(sender, 1, 10).unwrap_err();
        assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

        let err = suite.update_admin(sender, sender).unwrap_err();
        assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    }

    let config = suite.query_config().unwrap();
    assert_eq!(Addr::unchecked(ADMIN), config.admin);
    assert_eq!(FreshnessWindow::new(5, 200).unwrap(), config.window);
}

#[test]
fn update_window() {
    let mut suite = SuiteBuilder::new().build();

    let err = suite.update_window(ADMIN, 3, 2).unwrap_err();
    assert_eq!(
        ContractError::Twap(TwapError::InvalidWindow { min: 3, max: 2 }),
        err.downcast().unwrap()
    );

    suite.update_window(ADMIN, 1, 20).unwrap();
    assert_eq!(
        FreshnessWindow::new(1, 20).unwrap(),
        suite.query_config().unwrap().window
    );

    // a reference one block after the proof is accepted now
    let expiry = suite.block_time();
    let reference_block = suite.proof_block + 1;
    suite
        .finalize_expiry_price(FINALIZER, expiry, reference_block)
        .unwrap();
}

#[test]
fn update_proof() {
    let mut suite = SuiteBuilder::new().build();

    suite.advance_blocks(3);
    let proof = suite.prove_current_block().unwrap();
    let proven_height = suite.block_height();
    suite.update_proof(ADMIN, proof.clone()).unwrap();
    assert_eq!(proof, suite.query_proof().unwrap());

    suite.advance_blocks(5);
    let expiry = suite.block_time();
    let reference_block = suite.block_height();
    let res = suite
        .finalize_expiry_price(FINALIZER, expiry, reference_block)
        .unwrap();
    assert!(res.events.iter().any(|event| event
        .attributes
        .iter()
        .any(|attr| attr.key == "block_number" && attr.value == proven_height.to_string())));
}

#[test]
fn update_admin_transfers_role() {
    let mut suite = SuiteBuilder::new().build();

    suite.update_admin(ADMIN, "new_admin").unwrap();
    assert_eq!(
        Addr::unchecked("new_admin"),
        suite.query_config().unwrap().admin
    );

    let err = suite.update_window(ADMIN, 1, 10).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    suite.update_window("new_admin", 1, 10).unwrap();
}

#[test]
fn update_pair_switches_denomination() {
    let mut suite = SuiteBuilder::new().build();

    // same market with the assets in reverse order
    let pair = suite.twap.create_pair(
        &mut suite.app,
        &[Token::new_native(JUNO), Token::new_native(USDC)],
        (Uint128::new(1_000_000), Uint128::new(2_000_000)),
    );
    suite.advance_blocks(1);
    let (proof, _) = suite
        .twap
        .prove_pair_at_current_block(&mut suite.app, &pair)
        .unwrap();

    suite.update_pair(ADMIN, &pair).unwrap();
    suite.update_proof(ADMIN, proof).unwrap();

    let config = suite.query_config().unwrap();
    assert_eq!(pair, config.pair);
    assert_eq!(Denomination::Second, config.denomination);
    assert_eq!(Token::new_native(USDC), config.denomination_asset);

    suite.advance_blocks(10);
    assert_eq!(
        Uint256::from(200_000_000u128),
        suite.query_current_price().unwrap().price
    );
}

#[test]
fn update_pair_requires_subject() {
    let mut suite = SuiteBuilder::new().build();

    let pair = suite.twap.create_pair(
        &mut suite.app,
        &[Token::new_native(USDC), Token::new_native("uatom")],
        (Uint128::new(1_000_000), Uint128::new(1_000_000)),
    );
    let err = suite.update_pair(ADMIN, &pair).unwrap_err();
    assert_eq!(
        ContractError::SubjectNotInPair {
            subject: Token::new_native(JUNO),
            asset_a: Token::new_native(USDC),
            asset_b: Token::new_native("uatom"),
        },
        err.downcast().unwrap()
    );
    assert_eq!(
        suite.twap.pair.address,
        suite.query_config().unwrap().pair
    );
}
