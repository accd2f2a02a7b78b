use walletlib::{
    display::format_currency,
    formats::csv::Csv,
    store::MemoryStore,
    traits::WriteFormat,
    ContactId, WalletLedger,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: несколько операций в памяти и выписка в CSV (stdout)
    let mut ledger = WalletLedger::with_defaults(MemoryStore::new())?;
    ledger.deposit(25_000)?;
    ledger.withdraw(5_000)?;
    ledger.send_to(&ContactId::from("c1"), 12_000)?;
    eprintln!("saldo: {}", format_currency(ledger.balance()?));
    Csv::write(std::io::stdout(), &ledger.list_transactions(None)?)?;
    Ok(())
}
