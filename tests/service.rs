use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, TimeZone, Utc};

use minted::config::{Settings, Tier};
use minted::ledger::InMemoryLedger;
use minted::models::{DateRange, Transaction};
use minted::services::DashboardService;
use minted::MintedError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn spend(y: i32, m: u32, d: u32, category: &str, amount: f64) -> Transaction {
    Transaction::new(date(y, m, d), format!("{} purchase", category))
        .with_posting(format!("expenses:{}", category), amount)
        .with_posting("liabilities:Card", -amount)
}

fn journal() -> Vec<Transaction> {
    let mut txns = vec![
        Transaction::new(date(2024, 1, 1), "Payday")
            .with_posting("assets:Checking", 3000.0)
            .with_posting("income:Salary", -3000.0),
        Transaction::new(date(2024, 2, 1), "Payday")
            .with_posting("assets:Checking", 3000.0)
            .with_posting("income:Salary", -3000.0),
        Transaction::new(date(2024, 2, 20), "Card payment")
            .with_posting("liabilities:Card", 500.0)
            .with_posting("assets:Checking", -500.0),
    ];
    for month in 1..=4 {
        txns.push(spend(2024, month, 10, "Groceries", 200.0 + month as f64));
        txns.push(spend(2024, month, 12, "Dining:Lunch", 45.5));
    }
    txns.push(spend(2024, 3, 15, "Hobbies", 80.0));
    txns.push(spend(2024, 4, 15, "Hobbies", 500.0));
    txns
}

/// "Today" is in April 2024
fn service(ledger: Arc<InMemoryLedger>) -> DashboardService {
    DashboardService::new(ledger, Settings::default())
        .with_clock(|| Utc.with_ymd_and_hms(2024, 4, 20, 8, 0, 0).unwrap())
}

#[test]
fn test_concurrent_rebuilds_are_single_flight() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(Arc::clone(&ledger));

    ledger.close_gate();
    thread::scope(|scope| {
        let first = scope.spawn(|| service.rebuild_cache());

        // The first rebuild holds the slot while it waits on the ledger
        ledger.wait_for_waiters(1);
        assert!(service.cache_status().unwrap().rebuild_in_progress);

        let second = service.rebuild_cache();
        assert!(matches!(second, Err(MintedError::RefreshInProgress)));

        ledger.open_gate();
        assert!(first.join().unwrap().is_ok());
    });

    let status = service.cache_status().unwrap();
    assert!(status.has_snapshot);
    assert!(!status.stale);
    assert!(!status.rebuild_in_progress);
}

#[test]
fn test_readers_are_served_during_rebuild() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(Arc::clone(&ledger));
    let before = service.rebuild_cache().unwrap();

    ledger.close_gate();
    thread::scope(|scope| {
        let rebuild = scope.spawn(|| service.rebuild_cache());
        ledger.wait_for_waiters(1);

        let spending = service.category_spending(None).unwrap();
        assert_eq!(spending, before.reports.category_spending);

        ledger.open_gate();
        rebuild.join().unwrap().unwrap();
    });

    assert!(!Arc::ptr_eq(&service.snapshot().unwrap(), &before));
}

#[test]
fn test_settings_update_marks_snapshot_stale() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(Arc::clone(&ledger));
    service.rebuild_cache().unwrap();

    let old_trends = service.category_trends(None).unwrap();
    assert!(old_trends.iter().any(|t| t.category == "Essential"));

    let mut settings = (*service.settings().unwrap()).clone();
    settings.tiers.insert(
        0,
        Tier::new("Food", "#f39c12").with_categories(["Groceries", "Dining"]),
    );
    service.update_settings(settings).unwrap();

    let status = service.cache_status().unwrap();
    assert!(status.stale);
    assert!(status.has_snapshot);
    assert_eq!(service.category_trends(None).unwrap(), old_trends);

    service.rebuild_cache().unwrap();
    assert!(!service.cache_status().unwrap().stale);
    let trends = service.category_trends(None).unwrap();
    let food = trends.iter().find(|t| t.category == "Food").unwrap();
    assert_eq!(food.categories, vec!["Dining", "Groceries"]);
    assert!(!trends.iter().any(|t| t.category == "Essential"));
}

#[test]
fn test_filtered_path_matches_cache_over_all_time() {
    let txns = journal();
    let range = DateRange::covering(&txns).unwrap();
    let ledger = Arc::new(InMemoryLedger::new(txns));
    let service = service(Arc::clone(&ledger));
    service.rebuild_cache().unwrap();

    let calls = ledger.call_count();
    assert_eq!(
        service.category_spending(Some(range)).unwrap(),
        service.category_spending(None).unwrap()
    );
    assert_eq!(
        service.budget_history(Some(range)).unwrap(),
        service.budget_history(None).unwrap()
    );
    assert_eq!(
        service.budget(Some(range)).unwrap(),
        service.budget(None).unwrap()
    );
    assert_eq!(
        service.net_worth_over_time(Some(range)).unwrap(),
        service.net_worth_over_time(None).unwrap()
    );
    assert_eq!(
        service.year_over_year(Some(range)).unwrap(),
        service.year_over_year(None).unwrap()
    );
    assert_eq!(
        service.monthly_metrics(Some(range)).unwrap(),
        service.monthly_metrics(None).unwrap()
    );

    // Each filtered call re-queried the ledger; cached reads did not
    assert_eq!(ledger.call_count(), calls + 12);
    let status = service.cache_status().unwrap();
    assert!(!status.stale);
}

#[test]
fn test_budget_needs_two_completed_months() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(ledger);
    service.rebuild_cache().unwrap();

    let budget = service.budget(None).unwrap();
    let names: Vec<_> = budget.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(names, vec!["Dining", "Groceries"]);

    let groceries = &budget[1];
    assert_eq!(groceries.history_months, 3);
    assert_eq!(groceries.average, 202.0);
    assert_eq!(groceries.current_month, 204.0);
    assert!(groceries.over_budget);
}

#[test]
fn test_upstream_failure_leaves_snapshot_in_place() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(Arc::clone(&ledger));
    let installed = service.rebuild_cache().unwrap();

    ledger.set_failing(true);
    assert!(matches!(
        service.rebuild_cache(),
        Err(MintedError::Upstream(_))
    ));
    assert!(matches!(
        service.category_spending(Some(DateRange::parse("2024-01-01", "2024-02-01").unwrap())),
        Err(MintedError::Upstream(_))
    ));

    assert!(Arc::ptr_eq(&service.snapshot().unwrap(), &installed));
    assert_eq!(
        service.category_spending(None).unwrap(),
        installed.reports.category_spending
    );
}

#[test]
fn test_detail_views() {
    let ledger = Arc::new(InMemoryLedger::new(journal()));
    let service = service(ledger);

    let dining = service.category_detail("Dining", None).unwrap();
    assert_eq!(dining.transactions.len(), 4);
    assert_eq!(dining.breakdown[0].name, "Dining:Lunch");
    assert_eq!(dining.breakdown[0].amount, 182.0);

    let march = DateRange::parse("2024-03-01", "2024-04-01").unwrap();
    let hobbies = service.category_detail("Hobbies", Some(march)).unwrap();
    assert_eq!(hobbies.transactions.len(), 1);

    // Known account with no activity in the range is empty, not missing
    let january = DateRange::parse("2024-01-01", "2024-02-01").unwrap();
    let quiet = service.category_detail("Hobbies", Some(january)).unwrap();
    assert!(quiet.transactions.is_empty());

    let card = service.account_detail("liabilities:Card", None).unwrap();
    // 810 groceries + 182 dining + 580 hobbies charged, 500 paid off
    assert_eq!(card.balance_history.last().unwrap().balance, -1072.0);

    let salary = service.income_detail("Salary", None).unwrap();
    assert_eq!(salary.breakdown[0].amount, 6000.0);

    assert!(service.tier_detail("Nope", None).unwrap_err().is_not_found());
    assert!(service.account_detail("assets:Nope", None).unwrap_err().is_not_found());
}
