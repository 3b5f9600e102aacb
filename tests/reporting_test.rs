mod common;

use anyhow::Result;
use common::{add_ok, test_service};
use fintrack::application::LedgerService;
use fintrack::domain::TransactionKind;

#[test]
fn test_totals_on_empty_ledger() -> Result<()> {
    let (service, _temp) = test_service()?;

    let totals = service.totals();
    assert_eq!(totals.income, 0);
    assert_eq!(totals.expenses, 0);
    assert_eq!(totals.investments, 0);
    assert_eq!(totals.balance, 0);
    Ok(())
}

#[test]
fn test_totals_balance_subtracts_expenses_and_investments() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    add_ok(&mut service, "Salary", "2000.00", "01/03/2024", TransactionKind::Income)?;
    add_ok(&mut service, "Rent", "700.00", "05/03/2024", TransactionKind::Expense)?;
    add_ok(&mut service, "ETF", "300.00", "10/03/2024", TransactionKind::Investment)?;

    let totals = service.totals();
    assert_eq!(totals.income, 200000);
    assert_eq!(totals.expenses, 70000);
    assert_eq!(totals.investments, 30000);
    assert_eq!(totals.balance, 100000);
    assert_eq!(
        totals.balance,
        totals.income - totals.expenses - totals.investments
    );
    Ok(())
}

#[test]
fn test_worked_example_salary_and_rent() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    add_ok(&mut service, "Salary", "1000.00", "01/03/2024", TransactionKind::Income)?;
    add_ok(&mut service, "Rent", "500.00", "05/03/2024", TransactionKind::Expense)?;

    let totals = service.totals();
    assert_eq!(totals.income, 100000);
    assert_eq!(totals.expenses, 50000);
    assert_eq!(totals.investments, 0);
    assert_eq!(totals.balance, 50000);

    let profit = service.profit_by_period();
    assert_eq!(profit.monthly.len(), 1);
    assert_eq!(profit.monthly.get("03/2024"), Some(&50000));
    assert_eq!(profit.yearly.get("2024"), Some(&50000));
    Ok(())
}

#[test]
fn test_monthly_profit_matches_manual_signed_sum() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    add_ok(&mut service, "Salary", "1500.00", "01/04/2024", TransactionKind::Income)?;
    add_ok(&mut service, "Freelance", "300.00", "12/04/2024", TransactionKind::Income)?;
    add_ok(&mut service, "Rent", "600.00", "05/04/2024", TransactionKind::Expense)?;
    add_ok(&mut service, "Stocks", "200.00", "20/04/2024", TransactionKind::Investment)?;
    add_ok(&mut service, "Salary", "1500.00", "01/05/2024", TransactionKind::Income)?;

    let manual: i64 = service
        .transactions()
        .iter()
        .filter(|t| t.date.ends_with("/04/2024"))
        .map(|t| t.signed_cents())
        .sum();

    let profit = service.profit_by_period();
    assert_eq!(profit.monthly.get("04/2024"), Some(&manual));
    assert_eq!(profit.monthly.get("04/2024"), Some(&100000));
    assert_eq!(profit.monthly.get("05/2024"), Some(&150000));
    assert_eq!(profit.yearly.get("2024"), Some(&250000));
    Ok(())
}

#[test]
fn test_invalid_historical_date_contributes_to_neither_map() -> Result<()> {
    let temp = tempfile::TempDir::new()?;
    let path = temp.path().join("transactions.csv");
    // A hand-edited file with one corrupt date among valid rows
    std::fs::write(
        &path,
        concat!(
            "id,description,amount,date,kind,category\n",
            ",Salary,1000.00,01/03/2024,income,Salary\n",
            ",Old row,50.00,99/99/1999,expense,Other\n",
        ),
    )?;

    let service = LedgerService::open(&path)?;
    assert_eq!(service.transactions().len(), 2);
    assert!(service.load_errors().is_empty());

    // Totals still count the corrupt-date row...
    assert_eq!(service.totals().expenses, 5000);

    // ...but period reports skip it entirely.
    let profit = service.profit_by_period();
    assert_eq!(profit.monthly.len(), 1);
    assert_eq!(profit.yearly.len(), 1);
    assert_eq!(profit.monthly.get("03/2024"), Some(&100000));
    assert_eq!(profit.yearly.get("2024"), Some(&100000));
    Ok(())
}
