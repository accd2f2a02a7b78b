use walletlib::{
    formats::{csv::Csv, json::Json},
    model::ContactId,
    store::MemoryStore,
    traits::{ReadFormat, WriteFormat},
    WalletLedger,
};
use std::io::Cursor;

#[test]
fn csv_statement_reads_back() {
    let mut ledger = WalletLedger::with_defaults(MemoryStore::new()).unwrap();
    ledger.deposit(25_000).unwrap();
    ledger.send_to(&ContactId::from("c1"), 12_000).unwrap();
    let history = ledger.list_transactions(None).unwrap();

    let mut out = Vec::new();
    Csv::write(&mut out, &history).expect("write csv");
    let text = String::from_utf8(out.clone()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,kind,description,amount,timestamp,contact_id"));
    assert!(lines.next().unwrap().contains(",send,Envío a John Doe,-12000,"));
    assert!(lines.next().unwrap().contains(",deposit,Depósito,25000,"));

    let back = Csv::read(Cursor::new(out)).expect("read csv");
    assert_eq!(back.len(), 2);
    assert_eq!(back[0].id, history[0].id);
    assert_eq!(back[0].contact_id(), Some(&ContactId::from("c1")));
    assert_eq!(back[1].amount, 25_000);
    assert_eq!(back[1].timestamp, history[1].timestamp);
}

#[test]
fn csv_rejects_unknown_kind() {
    let input = "id,kind,description,amount,timestamp,contact_id\n1,refund,x,10,2025-10-01T00:00:00Z,\n";
    assert!(Csv::read(Cursor::new(input)).is_err());
}

#[test]
fn json_export_reads_back() {
    let mut ledger = WalletLedger::with_defaults(MemoryStore::new()).unwrap();
    ledger.receive_from(Some("Ana"), 3_000).unwrap();
    let history = ledger.list_transactions(None).unwrap();

    let mut out = Vec::new();
    Json::write(&mut out, &history).expect("write json");
    assert_eq!(Json::read(Cursor::new(out)).expect("read json"), history);
}
