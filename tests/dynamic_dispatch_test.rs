use rfid_till::domain::card::Card;
use rfid_till::domain::ports::LedgerStoreBox;
use rfid_till::infrastructure::in_memory::InMemoryLedger;

#[tokio::test]
async fn test_ledger_as_trait_object_across_tasks() {
    let ledger: LedgerStoreBox = Box::new(InMemoryLedger::new());

    // Verify Send + Sync by moving the boxed store into a task
    let handle = tokio::spawn(async move {
        ledger.put(Card::new("T1".into(), 42, 1)).await.unwrap();
        ledger.get(&"T1".into()).await.unwrap().unwrap()
    });

    let card = handle.await.unwrap();
    assert_eq!(card.money, 42);
    assert_eq!(card.points, 1);
}
