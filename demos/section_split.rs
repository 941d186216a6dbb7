//! Section-split statement example

use statement_core::{logging, DocumentRouter, EngineConfig, Line, ParsedDocument};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("debug")?;

    println!("🏦 Statement Core - Section Split Example\n");

    let texts = [
        "Bank of Example",
        "Account Holder: JANE DOE",
        "Account Number 0000-1234-5678",
        "Statement period 04/01/2024 to 04/30/2024",
        "Beginning balance 1,000.00",
        "Deposits and other credits",
        "Date Description Amount",
        "04/03 PAYROLL ACME CORP 2,500.00",
        "Withdrawals and other debits",
        "04/05 RENT 1,800.00",
        "04/09 GROCERY STORE 123.45",
        "Total withdrawals 1,923.45",
        "Ending balance 1,576.55",
    ];
    let lines: Vec<Line> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| Line::new(1, i as u32, *text))
        .collect();

    let router = DocumentRouter::with_config(EngineConfig::default());
    let ParsedDocument::BankStatement(ledger) = router.process(&lines)? else {
        println!("Not a bank statement");
        return Ok(());
    };

    println!(
        "📄 {} ({}) {}",
        ledger.metadata.institution,
        ledger.metadata.account_holder,
        ledger.metadata.account_number.as_deref().unwrap_or("-")
    );

    for tx in &ledger.transactions {
        let (side, amount) = match (&tx.debit, &tx.credit) {
            (Some(debit), _) => ("DR", debit.to_string()),
            (_, Some(credit)) => ("CR", credit.to_string()),
            _ => ("??", "-".to_string()),
        };
        println!("  {} {:<24} {} {:>10}", tx.date, tx.description, side, amount);
    }

    println!(
        "\n⚖️  calculated {} / expected {} / delta {} -> {}",
        ledger.reconciliation.calculated_closing,
        ledger.reconciliation.expected_closing,
        ledger.reconciliation.delta,
        if ledger.reconciliation.valid { "balanced" } else { "MISMATCH" }
    );
    println!("📊 confidence {:.2}", ledger.confidence.overall);

    Ok(())
}
