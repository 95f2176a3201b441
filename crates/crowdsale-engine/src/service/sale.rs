//! Sale lifecycle handlers: initialize, buy, close, withdraw.

use super::CrowdsaleService;
use crate::domain::derivation::{self, SaleAddresses};
use crate::domain::entities::{Address, Crowdsale, CrowdsaleStatus, SaleId};
use crate::domain::errors::CrowdsaleError;
use crate::domain::guard;
use crate::domain::vault::EscrowVault;
use crate::ports::inbound::CrowdsaleApi;
use crate::ports::outbound::{Ledger, LedgerOp, RecordCodec};

impl<L, C> CrowdsaleApi for CrowdsaleService<L, C>
where
    L: Ledger,
    C: RecordCodec,
{
    fn initialize(
        &mut self,
        caller: Address,
        id: SaleId,
        mint: Address,
        cost: u64,
    ) -> Result<SaleAddresses, CrowdsaleError> {
        if cost == 0 {
            return Err(CrowdsaleError::InvalidCost);
        }
        let addresses = derivation::sale_addresses(&id, &mint);
        if self.ledger.record_exists(&addresses.record) {
            return Err(CrowdsaleError::AccountExists {
                record: addresses.record,
            });
        }
        // The derived vault address may already be occupied (a prior setup
        // step, or a retried initialize whose record creation failed). An
        // account with the right binding is adopted; anything else is
        // refused.
        let vault = EscrowVault::for_new_sale(&id, &mint);
        if let Some(existing) = self.ledger.token_account(&vault.address()) {
            vault.verify_binding(&existing)?;
            tracing::warn!(
                "[crowdsale] sale {}: adopting pre-existing vault account {}",
                id.short_hex(),
                vault.address().short_hex()
            );
        }

        let sale = Crowdsale::new(id, cost, mint, vault.address(), caller);
        let data = self.codec.encode(&sale)?;
        let reservation = self.ledger.minimum_balance(data.len());
        let available = self.ledger.base_balance(&caller);
        if available < reservation {
            return Err(CrowdsaleError::InsufficientFunds {
                required: reservation,
                available,
            });
        }

        self.ledger.commit(&[
            LedgerOp::CreateRecord {
                address: addresses.record,
                data,
                payer: caller,
            },
            LedgerOp::EnsureTokenAccount {
                address: vault.address(),
                mint: vault.mint(),
                authority: vault.authority().address(),
            },
        ])?;

        tracing::info!(
            "[crowdsale] sale {} opened: cost {} per unit, vault {}",
            id.short_hex(),
            cost,
            addresses.vault.short_hex()
        );
        Ok(addresses)
    }

    fn buy_tokens(
        &mut self,
        buyer: Address,
        id: SaleId,
        amount: u64,
    ) -> Result<(), CrowdsaleError> {
        let record = derivation::record_address(&id);
        let (sale, _) = self.load_sale(&record)?;
        if !sale.is_open() {
            return Err(CrowdsaleError::CrowdsaleClosed { id: sale.id });
        }
        if amount == 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        let payment = amount
            .checked_mul(sale.cost)
            .ok_or(CrowdsaleError::Overflow {
                amount,
                cost: sale.cost,
            })?;

        let vault = EscrowVault::bind(&sale);
        let stock = self
            .ledger
            .token_account(&vault.address())
            .map(|account| account.amount)
            .unwrap_or(0);
        if stock < amount {
            return Err(CrowdsaleError::InsufficientVaultBalance {
                requested: amount,
                available: stock,
            });
        }
        let funds = self.ledger.base_balance(&buyer);
        if funds < payment {
            return Err(CrowdsaleError::InsufficientFunds {
                required: payment,
                available: funds,
            });
        }

        // Payment escrows in the record account; asset units leave the
        // vault under the engine's capability. One batch, so either both
        // legs settle or neither does.
        let holding = derivation::holding_address(&buyer, &sale.mint);
        self.ledger.commit(&[
            LedgerOp::DebitBase {
                account: buyer,
                amount: payment,
            },
            LedgerOp::CreditBase {
                account: record,
                amount: payment,
            },
            LedgerOp::EnsureTokenAccount {
                address: holding,
                mint: sale.mint,
                authority: buyer,
            },
            LedgerOp::DebitToken {
                account: vault.address(),
                amount,
                authority: vault.authority().clone(),
            },
            LedgerOp::CreditToken {
                account: holding,
                amount,
            },
        ])?;

        tracing::info!(
            "[crowdsale] ✓ sale {}: released {} units to {} for {}",
            sale.id.short_hex(),
            amount,
            buyer.short_hex(),
            payment
        );
        Ok(())
    }

    fn close_crowdsale(&mut self, caller: Address, id: SaleId) -> Result<(), CrowdsaleError> {
        let record = derivation::record_address(&id);
        let (sale, _) = self.load_sale(&record)?;
        guard::require_owner(&sale, &caller)?;
        if sale.status == CrowdsaleStatus::Closed {
            // Retried closes land here; nothing left to do.
            return Ok(());
        }

        let mut updated = sale;
        updated.status = CrowdsaleStatus::Closed;
        let data = self.codec.encode(&updated)?;
        self.ledger.commit(&[LedgerOp::WriteRecord {
            address: record,
            data,
        }])?;

        tracing::info!("[crowdsale] sale {} closed", updated.id.short_hex());
        Ok(())
    }

    fn withdraw_funds(&mut self, caller: Address, id: SaleId) -> Result<u64, CrowdsaleError> {
        let record = derivation::record_address(&id);
        let (sale, record_len) = self.load_sale(&record)?;
        guard::require_owner(&sale, &caller)?;

        let balance = self.ledger.base_balance(&record);
        let reservation = self.ledger.minimum_balance(record_len);
        let transferable = balance.saturating_sub(reservation);
        if transferable == 0 {
            return Err(CrowdsaleError::NothingToWithdraw {
                balance,
                reservation,
            });
        }

        self.ledger.commit(&[
            LedgerOp::DebitBase {
                account: record,
                amount: transferable,
            },
            LedgerOp::CreditBase {
                account: caller,
                amount: transferable,
            },
        ])?;

        tracing::info!(
            "[crowdsale] ✓ sale {}: swept {} to owner {}",
            sale.id.short_hex(),
            transferable,
            caller.short_hex()
        );
        Ok(transferable)
    }

    fn get_crowdsale(&self, id: &SaleId) -> Result<Crowdsale, CrowdsaleError> {
        let record = derivation::record_address(id);
        let (sale, _) = self.load_sale(&record)?;
        Ok(sale)
    }

    fn vault_balance(&self, id: &SaleId) -> Result<u64, CrowdsaleError> {
        let sale = self.get_crowdsale(id)?;
        Ok(self
            .ledger
            .token_account(&sale.vault)
            .map(|account| account.amount)
            .unwrap_or(0))
    }
}
