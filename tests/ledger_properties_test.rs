mod common;

use common::reading;
use rand::Rng;
use rfid_till::application::engine::LedgerEngine;
use rfid_till::domain::card::{Card, DEFAULT_MONEY};
use rfid_till::domain::event::TransactionOutcome;
use rfid_till::domain::ports::LedgerStore;
use rfid_till::infrastructure::in_memory::InMemoryLedger;

#[tokio::test]
async fn test_provisioning_happens_once_per_card() {
    let ledger = InMemoryLedger::new();
    let engine = LedgerEngine::new(Box::new(ledger.clone()));

    for price in [0u64, 1, 250, 500] {
        let id = format!("NEW{}", price);
        engine.transact(&reading(&id), price).await.unwrap();
        let outcome = engine.transact(&reading(&id), price).await.unwrap();
        assert_eq!(
            outcome,
            TransactionOutcome::Approved {
                money: DEFAULT_MONEY - 2 * price,
                points: 0
            }
        );
    }

    assert_eq!(ledger.all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_debit_sequence_sums_to_balance() {
    let mut rng = rand::thread_rng();

    for round in 0..20 {
        let ledger = InMemoryLedger::new();
        let engine = LedgerEngine::new(Box::new(ledger.clone()));
        let id = format!("SEQ{}", round);
        let mut remaining = DEFAULT_MONEY;
        let mut spent = 0;

        while remaining > 0 {
            let price = rng.gen_range(0..=remaining.min(150));
            let outcome = engine.transact(&reading(&id), price).await.unwrap();
            remaining -= price;
            spent += price;
            assert_eq!(
                outcome,
                TransactionOutcome::Approved {
                    money: remaining,
                    points: 0
                }
            );
            if price == 0 {
                break;
            }
        }

        let card = ledger.get(&id.as_str().into()).await.unwrap().unwrap();
        assert_eq!(card.money, DEFAULT_MONEY - spent);
    }
}

#[tokio::test]
async fn test_debit_is_guarded_by_ledger_balance() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let balance: u64 = rng.gen_range(0..2000);
        let price: u64 = rng.gen_range(0..2000);
        let ledger = InMemoryLedger::with_cards([Card::new("G1".into(), balance, 3)]);
        let engine = LedgerEngine::new(Box::new(ledger.clone()));

        let outcome = engine.transact(&reading("G1"), price).await.unwrap();
        let stored = ledger.get(&"G1".into()).await.unwrap().unwrap();

        if price <= balance {
            assert_eq!(
                outcome,
                TransactionOutcome::Approved {
                    money: balance - price,
                    points: 3
                }
            );
            assert_eq!(stored.money, balance - price);
        } else {
            assert_eq!(outcome, TransactionOutcome::Declined { balance, price });
            assert_eq!(stored.money, balance);
        }
    }
}
