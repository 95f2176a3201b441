//! # Custody and Authorization Integration Tests
//!
//! The guarantees participants rely on: payments escrow in the sale record
//! until the owner sweeps them, privileged operations stay with the owner,
//! vault stock drains exactly, and a rejected purchase moves nothing.

#[cfg(test)]
mod tests {
    use crowdsale_engine::{
        authority_address, holding_address, Address, BincodeRecordCodec, CrowdsaleApi,
        CrowdsaleDependencies, CrowdsaleError, CrowdsaleService, CrowdsaleStatus, InMemoryLedger,
        Ledger, SaleAddresses, SaleId,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    type Service = CrowdsaleService<InMemoryLedger, BincodeRecordCodec>;

    fn make_service() -> Service {
        CrowdsaleService::new(CrowdsaleDependencies {
            ledger: InMemoryLedger::default(),
            codec: BincodeRecordCodec,
        })
    }

    fn random_address() -> Address {
        Address::new(rand::random())
    }

    /// Open a sale and stock its vault in one step.
    fn open_stocked_sale(
        service: &mut Service,
        owner: Address,
        cost: u64,
        stock: u64,
    ) -> (SaleId, Address, SaleAddresses) {
        let id = random_address();
        let mint = random_address();
        service.ledger_mut().airdrop(owner, 10_000_000_000).unwrap();
        let addresses = service.initialize(owner, id, mint, cost).unwrap();
        service.ledger_mut().mint_to(addresses.vault, stock).unwrap();
        (id, mint, addresses)
    }

    // =========================================================================
    // CUSTODY GUARANTEES
    // =========================================================================

    #[test]
    fn test_payments_escrow_until_withdrawn() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        service.ledger_mut().airdrop(buyer, 1_000_000).unwrap();

        let (id, _, addresses) = open_stocked_sale(&mut service, owner, 3, 1_000);
        let owner_after_setup = service.ledger().base_balance(&owner);
        let escrow_floor = service.ledger().base_balance(&addresses.record);

        service.buy_tokens(buyer, id, 40).unwrap();
        service.buy_tokens(buyer, id, 60).unwrap();

        // Proceeds sit in the record account, not with the owner.
        assert_eq!(service.ledger().base_balance(&owner), owner_after_setup);
        assert_eq!(
            service.ledger().base_balance(&addresses.record),
            escrow_floor + 300
        );

        assert_eq!(service.withdraw_funds(owner, id).unwrap(), 300);
        assert_eq!(
            service.ledger().base_balance(&owner),
            owner_after_setup + 300
        );
        assert_eq!(service.ledger().base_balance(&addresses.record), escrow_floor);
    }

    #[test]
    fn test_only_owner_exercises_privileges() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        let stranger = random_address();
        service.ledger_mut().airdrop(buyer, 1_000_000).unwrap();

        let (id, _, addresses) = open_stocked_sale(&mut service, owner, 5, 1_000);
        service.buy_tokens(buyer, id, 10).unwrap();
        let escrowed = service.ledger().base_balance(&addresses.record);

        assert!(matches!(
            service.close_crowdsale(stranger, id),
            Err(CrowdsaleError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.withdraw_funds(stranger, id),
            Err(CrowdsaleError::Unauthorized { .. })
        ));

        // Nothing about the sale moved.
        assert_eq!(
            service.get_crowdsale(&id).unwrap().status,
            CrowdsaleStatus::Open
        );
        assert_eq!(service.ledger().base_balance(&addresses.record), escrowed);
        assert_eq!(service.ledger().base_balance(&stranger), 0);
    }

    #[test]
    fn test_failed_purchase_moves_nothing() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        // One base unit short of the payment.
        service.ledger_mut().airdrop(buyer, 499).unwrap();

        let (id, mint, addresses) = open_stocked_sale(&mut service, owner, 5, 1_000);
        let record_before = service.ledger().base_balance(&addresses.record);

        let result = service.buy_tokens(buyer, id, 100);
        assert!(matches!(
            result,
            Err(CrowdsaleError::InsufficientFunds { .. })
        ));

        assert_eq!(service.ledger().base_balance(&buyer), 499);
        assert_eq!(service.ledger().base_balance(&addresses.record), record_before);
        assert_eq!(service.vault_balance(&id).unwrap(), 1_000);
        assert!(service
            .ledger()
            .token_account(&holding_address(&buyer, &mint))
            .is_none());
    }

    #[test]
    fn test_token_accounts_carry_expected_bindings() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        service.ledger_mut().airdrop(buyer, 1_000_000).unwrap();

        let (id, mint, addresses) = open_stocked_sale(&mut service, owner, 2, 500);
        service.buy_tokens(buyer, id, 5).unwrap();

        // The vault answers to the keyless derived authority, never to the
        // owner's wallet.
        let vault = service.ledger().token_account(&addresses.vault).unwrap();
        assert_eq!(vault.mint, mint);
        assert_eq!(vault.authority, authority_address(&id));
        assert_ne!(vault.authority, owner);

        let holding = service
            .ledger()
            .token_account(&holding_address(&buyer, &mint))
            .unwrap();
        assert_eq!(holding.mint, mint);
        assert_eq!(holding.authority, buyer);
    }

    #[test]
    fn test_vault_drains_to_exactly_zero() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        service.ledger_mut().airdrop(buyer, 1_000_000).unwrap();

        let (id, _, _) = open_stocked_sale(&mut service, owner, 1, 250);

        // Buying the entire remaining stock is allowed.
        service.buy_tokens(buyer, id, 250).unwrap();
        assert_eq!(service.vault_balance(&id).unwrap(), 0);

        // After that there is nothing left to sell.
        assert!(matches!(
            service.buy_tokens(buyer, id, 1),
            Err(CrowdsaleError::InsufficientVaultBalance {
                requested: 1,
                available: 0,
            })
        ));
    }

    #[test]
    fn test_reservation_outlives_full_drain() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        service.ledger_mut().airdrop(buyer, 1_000_000).unwrap();

        let (id, _, addresses) = open_stocked_sale(&mut service, owner, 5, 1_000);
        service.buy_tokens(buyer, id, 100).unwrap();
        service.withdraw_funds(owner, id).unwrap();
        service.close_crowdsale(owner, id).unwrap();

        // The record keeps its reservation and stays readable after the
        // sale is fully wound down.
        let record_len = service.ledger().record(&addresses.record).unwrap().len();
        assert_eq!(
            service.ledger().base_balance(&addresses.record),
            service.ledger().minimum_balance(record_len)
        );
        let sale = service.get_crowdsale(&id).unwrap();
        assert_eq!(sale.status, CrowdsaleStatus::Closed);
        assert_eq!(sale.owner, owner);
    }
}
