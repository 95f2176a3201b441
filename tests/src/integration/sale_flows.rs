//! # Sale Flow Integration Tests
//!
//! End-to-end crowdsale lifecycles driven through the public API against
//! the in-memory ledger: derive addresses offline, initialize, stock the
//! vault, purchase, close, withdraw.

#[cfg(test)]
mod tests {
    use crowdsale_engine::{
        holding_address, record_address, sale_addresses, Address, BincodeRecordCodec, Crowdsale,
        CrowdsaleApi, CrowdsaleDependencies, CrowdsaleError, CrowdsaleService, CrowdsaleStatus,
        InMemoryLedger, Ledger, SaleAddresses, SaleId,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    type Service = CrowdsaleService<InMemoryLedger, BincodeRecordCodec>;

    const OWNER_FUNDS: u64 = 10_000_000_000;

    fn make_service() -> Service {
        CrowdsaleService::new(CrowdsaleDependencies {
            ledger: InMemoryLedger::default(),
            codec: BincodeRecordCodec,
        })
    }

    fn random_address() -> Address {
        Address::new(rand::random())
    }

    /// Fund an account from the host faucet.
    fn fund(service: &mut Service, account: Address, amount: u64) {
        service.ledger_mut().airdrop(account, amount).unwrap();
    }

    /// Open a sale under a freshly funded owner.
    fn open_sale(service: &mut Service, owner: Address, cost: u64) -> (SaleId, Address, SaleAddresses) {
        let id = random_address();
        let mint = random_address();
        fund(service, owner, OWNER_FUNDS);
        let addresses = service.initialize(owner, id, mint, cost).unwrap();
        (id, mint, addresses)
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    #[test]
    fn test_full_sale_lifecycle() {
        let mut service = make_service();
        let owner = random_address();
        let buyer = random_address();
        let id = random_address();
        let mint = random_address();

        fund(&mut service, owner, OWNER_FUNDS);
        fund(&mut service, buyer, 1_000_000_000);

        // Open at one base unit per asset unit and stock the vault.
        let addresses = service.initialize(owner, id, mint, 1).unwrap();
        service
            .ledger_mut()
            .mint_to(addresses.vault, 1_000_000_000_000)
            .unwrap();

        service.buy_tokens(buyer, id, 100_000_000).unwrap();

        let holding = holding_address(&buyer, &mint);
        assert_eq!(
            service.ledger().token_account(&holding).unwrap().amount,
            100_000_000
        );
        assert_eq!(service.vault_balance(&id).unwrap(), 999_900_000_000);
        assert_eq!(
            service.ledger().base_balance(&buyer),
            1_000_000_000 - 100_000_000
        );

        // Close stops purchases for good.
        service.close_crowdsale(owner, id).unwrap();
        assert_eq!(
            service.get_crowdsale(&id).unwrap().status,
            CrowdsaleStatus::Closed
        );
        assert!(matches!(
            service.buy_tokens(buyer, id, 1),
            Err(CrowdsaleError::CrowdsaleClosed { .. })
        ));

        // The owner sweeps exactly the escrowed proceeds, once.
        let owner_before = service.ledger().base_balance(&owner);
        assert_eq!(service.withdraw_funds(owner, id).unwrap(), 100_000_000);
        assert_eq!(
            service.ledger().base_balance(&owner),
            owner_before + 100_000_000
        );
        assert!(matches!(
            service.withdraw_funds(owner, id),
            Err(CrowdsaleError::NothingToWithdraw { .. })
        ));
    }

    #[test]
    fn test_addresses_derive_offline() {
        let mut service = make_service();
        let owner = random_address();
        let id = random_address();
        let mint = random_address();

        // A client computes the addresses before the sale exists.
        let expected = sale_addresses(&id, &mint);

        fund(&mut service, owner, OWNER_FUNDS);
        let addresses = service.initialize(owner, id, mint, 3).unwrap();

        assert_eq!(addresses, expected);
        assert_eq!(record_address(&id), expected.record);
        assert_eq!(service.get_crowdsale(&id).unwrap().vault, expected.vault);
    }

    #[test]
    fn test_record_bytes_decode_to_api_view() {
        let mut service = make_service();
        let owner = random_address();
        let (id, _, addresses) = open_sale(&mut service, owner, 7);
        service.close_crowdsale(owner, id).unwrap();

        // A host reading the raw record sees what the API reports.
        let raw = service.ledger().record(&addresses.record).unwrap();
        let decoded: Crowdsale = bincode::deserialize(&raw).unwrap();
        assert_eq!(decoded, service.get_crowdsale(&id).unwrap());
        assert_eq!(decoded.status, CrowdsaleStatus::Closed);
    }

    #[test]
    fn test_two_sales_share_one_ledger_independently() {
        let mut service = make_service();
        let owner_a = random_address();
        let owner_b = random_address();
        let buyer = random_address();
        fund(&mut service, buyer, 1_000_000);

        let (id_a, _, addresses_a) = open_sale(&mut service, owner_a, 2);
        let (id_b, _, addresses_b) = open_sale(&mut service, owner_b, 9);
        service.ledger_mut().mint_to(addresses_a.vault, 5_000).unwrap();
        service.ledger_mut().mint_to(addresses_b.vault, 300).unwrap();

        service.buy_tokens(buyer, id_a, 100).unwrap();

        // Only sale A moved.
        assert_eq!(service.vault_balance(&id_a).unwrap(), 4_900);
        assert_eq!(service.vault_balance(&id_b).unwrap(), 300);
        assert_eq!(service.withdraw_funds(owner_a, id_a).unwrap(), 200);
        assert!(matches!(
            service.withdraw_funds(owner_b, id_b),
            Err(CrowdsaleError::NothingToWithdraw { .. })
        ));
    }

    #[test]
    fn test_scripted_close_then_withdraw() {
        let mut service = make_service();
        let owner = random_address();
        let first = random_address();
        let second = random_address();
        fund(&mut service, first, 1_000_000);
        fund(&mut service, second, 1_000_000);

        let (id, _, addresses) = open_sale(&mut service, owner, 4);
        service.ledger_mut().mint_to(addresses.vault, 10_000).unwrap();

        service.buy_tokens(first, id, 25).unwrap();
        service.buy_tokens(second, id, 75).unwrap();

        // Operators retry closes; the second one is a no-op.
        service.close_crowdsale(owner, id).unwrap();
        service.close_crowdsale(owner, id).unwrap();

        let owner_before = service.ledger().base_balance(&owner);
        let swept = service.withdraw_funds(owner, id).unwrap();
        assert_eq!(swept, 25 * 4 + 75 * 4);
        assert_eq!(service.ledger().base_balance(&owner), owner_before + swept);
    }
}
